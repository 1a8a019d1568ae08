#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;

    use crate::builder::{Builder, BuilderInvalidReason, MachineBuilder};
    use crate::graph::{reference_distance, state_graph};
    use crate::indicator::Indicator;
    use crate::parse::{parse_machine, parse_machines, ParseError};
    use crate::search::{minimum_toggles, shortest_sequence, SearchFailure};
    use crate::state::{State, Toggle};

    const SAMPLE: &str = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    fn toggles(masks: &[u64]) -> Vec<Toggle> {
        masks.iter().map(|mask| Toggle(*mask)).collect_vec()
    }

    // every optimal sequence presses each distinct toggle at most once, so subsets suffice
    fn brute_force(target: State, toggles: &[Toggle]) -> Option<usize> {
        toggles.iter()
            .powerset()
            .filter(|subset| subset.iter().fold(State::ZERO, |state, toggle| state ^ **toggle) == target)
            .map(|subset| subset.len())
            .min()
    }

    #[test]
    fn solve_sample() {
        let machines = parse_machines(SAMPLE).unwrap();
        let presses = machines.iter().map(|machine| machine.minimum_presses().unwrap()).collect_vec();

        assert_eq!(presses, vec![2, 3, 2]);
        assert_eq!(presses.iter().sum::<usize>(), 7);
    }

    #[test]
    fn sample_press_sequence() {
        let machine = parse_machine("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}").unwrap();

        // (1,3) then (2,3)
        assert_eq!(machine.press_sequence().unwrap(), vec![1, 3]);
    }

    #[test]
    fn zero_target_needs_nothing() {
        assert_eq!(minimum_toggles(State::ZERO, &toggles(&[0b01, 0b10])), Ok(0));
        assert_eq!(minimum_toggles(State::ZERO, &[]), Ok(0));
        assert_eq!(shortest_sequence(State::ZERO, &toggles(&[0b01])), Ok(vec![]));
    }

    #[test]
    fn unreachable_targets() {
        assert_eq!(
            minimum_toggles(State(0b11), &toggles(&[0b01])),
            Err(SearchFailure::NotFound { target: State(0b11) })
        );
        assert_eq!(
            minimum_toggles(State(0b1), &[]),
            Err(SearchFailure::NotFound { target: State(0b1) })
        );
        // only {0, 1, 6, 7} can be reached
        assert_eq!(
            minimum_toggles(State(0b101), &toggles(&[0b001, 0b110])),
            Err(SearchFailure::NotFound { target: State(0b101) })
        );
        assert_eq!(minimum_toggles(State(0b111), &toggles(&[0b001, 0b110])), Ok(2));
    }

    #[test]
    fn small_machines() {
        assert_eq!(minimum_toggles(State(0b111), &toggles(&[0b001, 0b010, 0b100])), Ok(3));
        assert_eq!(minimum_toggles(State(0b110), &toggles(&[0b011, 0b101])), Ok(2));
        assert_eq!(minimum_toggles(State(0b1111), &toggles(&[0b0011, 0b0110, 0b1100])), Ok(2));
        assert_eq!(minimum_toggles(State(0b0110), &toggles(&[0b0011, 0b0110, 0b1100])), Ok(1));
    }

    #[test]
    fn duplicate_and_noop_toggles() {
        assert_eq!(minimum_toggles(State(0b11), &toggles(&[0b01, 0b01, 0b10])), Ok(2));
        assert_eq!(minimum_toggles(State(0b11), &toggles(&[0b00, 0b11])), Ok(1));
        assert_eq!(shortest_sequence(State(0b11), &toggles(&[0b00, 0b11])), Ok(vec![1]));
        assert_eq!(
            minimum_toggles(State(0b10), &toggles(&[0b00])),
            Err(SearchFailure::NotFound { target: State(0b10) })
        );
    }

    #[test]
    fn build_machine() {
        let machine = MachineBuilder::with_width(4)
            .light(1, Indicator::On)
            .light(2, Indicator::On)
            .add_button(&[3])
            .add_button(&[3, 1])
            .add_button(&[0])
            .pop_button()
            .build()
            .unwrap();

        assert_eq!(machine.target(), State(0b0110));
        assert_eq!(machine.toggles(), &[Toggle(0b1000), Toggle(0b1010)]);
        assert_eq!(machine.wiring_of(1), Some(vec![1, 3]));
        assert_eq!(machine.wiring_of(2), None);
        assert_eq!(format!("{}", machine), "[.##.] (3) (1,3)");
    }

    #[test]
    fn pop_button_without_buttons() {
        let machine = MachineBuilder::with_width(2)
            .pop_button()
            .light(0, Indicator::On)
            .add_button(&[0])
            .pop_button()
            .pop_button()
            .build()
            .unwrap();

        assert!(machine.toggles().is_empty());
        assert_eq!(machine.target(), State(0b01));
        assert_eq!(format!("{}", machine), "[#.]");
    }

    #[test]
    fn builder_rejects_bad_machines() {
        assert_eq!(
            MachineBuilder::with_width(0).build().unwrap_err(),
            &vec![BuilderInvalidReason::WidthOutOfRange { width: 0 }]
        );
        assert_eq!(
            MachineBuilder::with_width(65).add_button(&[0]).build().unwrap_err(),
            &vec![BuilderInvalidReason::WidthOutOfRange { width: 65 }]
        );

        // once invalid, later calls are ignored
        let mut builder = MachineBuilder::with_width(4);
        builder.add_button(&[0, 4]).add_button(&[7]).light(9, Indicator::On);
        assert_eq!(
            builder.is_valid(),
            Some(&vec![BuilderInvalidReason::LightOutOfRange { index: 4, width: 4 }])
        );

        assert_eq!(
            MachineBuilder::with_width(3).light(3, Indicator::On).build().unwrap_err(),
            &vec![BuilderInvalidReason::LightOutOfRange { index: 3, width: 3 }]
        );

        assert_eq!(
            MachineBuilder::with_width(3).target_pattern(&[Indicator::On]).build().unwrap_err(),
            &vec![BuilderInvalidReason::PatternWidthMismatch { expected: 3, found: 1 }]
        );
    }

    #[test]
    fn saved_builder_state() {
        let mut builder = MachineBuilder::with_width(2);
        builder.target_pattern(&[Indicator::On, Indicator::On]).add_button(&[0]);
        let saved = builder.clone();
        builder.add_button(&[1]);

        assert_eq!(saved.build().unwrap().minimum_presses(), Err(SearchFailure::NotFound { target: State(0b11) }));
        assert_eq!(builder.build().unwrap().minimum_presses(), Ok(2));
    }

    #[test]
    fn display_is_canonical() {
        let machine = parse_machine("  [#..#] ( 3, 0 ,3) () (1,2)   {1,2}").unwrap();
        assert_eq!(format!("{}", machine), "[#..#] (0,3) () (1,2)");
        assert_eq!(parse_machine(&machine.to_string()).unwrap(), machine);
        assert_eq!(machine.minimum_presses(), Ok(1));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_machine("(0) (1)"), Err(ParseError::MissingPattern));
        assert_eq!(parse_machine("[.#] [#.]"), Err(ParseError::DuplicatePattern));
        assert_eq!(parse_machine("[.x.]"), Err(ParseError::BadIndicator('x')));
        assert_eq!(parse_machine("[..] (0,a)"), Err(ParseError::BadIndex("a".to_string())));
        assert_eq!(parse_machine("[..] 0"), Err(ParseError::UnexpectedToken('0')));
        assert_eq!(parse_machine("[..] (0"), Err(ParseError::Unterminated('(')));
        assert_eq!(
            parse_machine("[..] (2)"),
            Err(ParseError::Invalid(vec![BuilderInvalidReason::LightOutOfRange { index: 2, width: 2 }]))
        );
        assert_eq!(
            parse_machine("[] (0)"),
            Err(ParseError::Invalid(vec![BuilderInvalidReason::WidthOutOfRange { width: 0 }]))
        );
    }

    #[test]
    fn parse_errors_name_their_line() {
        let error = parse_machines("[.#] (1)\n\nbad").unwrap_err();
        assert_eq!(error, ParseError::Line { line: 3, source: Box::new(ParseError::UnexpectedToken('b')) });
        assert_eq!(error.to_string(), "line 3: unexpected 'b'");
        assert_eq!(
            std::error::Error::source(&error).map(|source| source.to_string()),
            Some("unexpected 'b'".to_string())
        );
    }

    #[test]
    fn state_graph_shape() {
        let graph = state_graph(&toggles(&[0b01, 0b10]));
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        let graph = state_graph(&toggles(&[0b01, 0b01, 0b00]));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(State(0), State(1)), Some(&0));
    }

    #[test]
    fn sample_matches_reference() {
        for machine in parse_machines(SAMPLE).unwrap() {
            assert_eq!(
                reference_distance(machine.target(), machine.toggles()),
                machine.minimum_presses().ok()
            );
        }
    }

    fn machine_parts() -> impl Strategy<Value = (u64, Vec<u64>)> {
        (1usize..=6).prop_flat_map(|width| {
            let limit = 1u64 << width;
            (0..limit, prop::collection::vec(0..limit, 0..=6))
        })
    }

    proptest! {
        #[test]
        fn agrees_with_brute_force((target, masks) in machine_parts()) {
            let target = State(target);
            let toggles = toggles(&masks);

            prop_assert_eq!(minimum_toggles(target, &toggles).ok(), brute_force(target, &toggles));
            prop_assert_eq!(minimum_toggles(target, &toggles).ok(), reference_distance(target, &toggles));
        }

        #[test]
        fn sequence_reaches_target((target, masks) in machine_parts()) {
            let target = State(target);
            let toggles = toggles(&masks);

            match shortest_sequence(target, &toggles) {
                Ok(presses) => {
                    let reached = presses.iter().fold(State::ZERO, |state, index| state ^ toggles[*index]);
                    prop_assert_eq!(reached, target);
                    prop_assert_eq!(Ok(presses.len()), minimum_toggles(target, &toggles));
                }
                Err(failure) => {
                    prop_assert_eq!(failure, SearchFailure::NotFound { target });
                    prop_assert!(minimum_toggles(target, &toggles).is_err());
                }
            }
        }

        #[test]
        fn toggle_order_is_irrelevant((target, masks) in machine_parts(), rotation in 0usize..6) {
            let target = State(target);
            let forward = toggles(&masks);
            let mut reversed = forward.clone();
            reversed.reverse();
            let mut rotated = forward.clone();
            if !rotated.is_empty() {
                let by = rotation % rotated.len();
                rotated.rotate_left(by);
            }

            let expected = minimum_toggles(target, &forward);
            prop_assert_eq!(minimum_toggles(target, &reversed), expected);
            prop_assert_eq!(minimum_toggles(target, &rotated), expected);
        }

        #[test]
        fn toggling_is_an_involution(state in any::<u64>(), mask in any::<u64>()) {
            prop_assert_eq!(State(state) ^ Toggle(mask) ^ Toggle(mask), State(state));
        }
    }
}
