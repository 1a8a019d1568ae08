use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use thiserror::Error;

use crate::state::{State, Toggle};

/// Reasons a search may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SearchFailure {
    /// No sequence of toggles turns the all-off state into the target.
    /// The machine as described is unsolvable; retrying cannot help.
    #[error("target pattern {target:#b} cannot be reached with the given toggles")]
    NotFound {
        /// The state that was searched for.
        target: State,
    },
}

#[derive(Copy, Clone, Debug)]
struct Visit {
    distance: usize,
    // predecessor, and the index of the toggle which led here from it
    via: Option<(State, usize)>,
}

/// One breadth-first search from [`State::ZERO`] towards `target`.
///
/// The visited map and work queue belong to this search alone and are dropped with it.
struct StateSearch<'a> {
    target: State,
    toggles: &'a [Toggle],
    visited: HashMap<State, Visit>,
    queue: VecDeque<(State, usize)>,
}

impl<'a> StateSearch<'a> {
    fn new(target: State, toggles: &'a [Toggle]) -> Self {
        let mut visited = HashMap::new();
        visited.insert(State::ZERO, Visit { distance: 0, via: None });

        Self {
            target,
            toggles,
            visited,
            queue: VecDeque::from([(State::ZERO, 0)]),
        }
    }

    /// Explore until the target is first reached, returning how it was reached.
    ///
    /// States leave the queue in non-decreasing distance order, so the first visit to any state,
    /// the target included, is along a shortest path.
    fn run(&mut self) -> Result<Visit, SearchFailure> {
        if self.target.is_zero() {
            return Ok(Visit { distance: 0, via: None });
        }

        let mut frontier = 0;
        while let Some((state, distance)) = self.queue.pop_front() {
            if distance > frontier {
                trace!("frontier at distance {distance}, {} states recorded", self.visited.len());
                frontier = distance;
            }

            for (index, toggle) in self.toggles.iter().enumerate() {
                // can only lead back to `state`, which is already recorded
                if toggle.is_noop() {
                    continue;
                }

                let next = state ^ *toggle;
                let visit = Visit { distance: distance + 1, via: Some((state, index)) };

                if next == self.target {
                    self.visited.insert(next, visit);
                    debug!("reached {:#b} in {} toggles after recording {} states", self.target, visit.distance, self.visited.len());
                    return Ok(visit);
                }

                // first write wins; later discoveries are never shorter
                if let Entry::Vacant(slot) = self.visited.entry(next) {
                    slot.insert(visit);
                    self.queue.push_back((next, visit.distance));
                }
            }
        }

        debug!("exhausted {} reachable states without reaching {:#b}", self.visited.len(), self.target);
        Err(SearchFailure::NotFound { target: self.target })
    }

    /// Walk predecessors back from `end` to the zero state, yielding toggle indices in press order.
    fn presses_to(&self, end: State) -> Vec<usize> {
        let mut presses = Vec::new();
        let mut current = end;
        while let Some(Visit { via: Some((previous, index)), .. }) = self.visited.get(&current) {
            presses.push(*index);
            current = *previous;
        }

        presses.reverse();
        presses
    }
}

/// The fewest toggle applications turning [`State::ZERO`] into `target`.
///
/// Any toggle may be applied any number of times; the search discovers on its own that pressing
/// a toggle twice is wasted. `toggles` may be empty, contain duplicates, or contain no-op masks.
///
/// Returns `Ok(0)` when `target` is already the zero state, and [`SearchFailure::NotFound`] when no
/// combination of `toggles` reaches it.
pub fn minimum_toggles(target: State, toggles: &[Toggle]) -> Result<usize, SearchFailure> {
    StateSearch::new(target, toggles).run().map(|visit| visit.distance)
}

/// One shortest sequence of toggles turning [`State::ZERO`] into `target`, as indices into `toggles`
/// in the order they are applied.
///
/// The sequence always has [`minimum_toggles`] elements. When several sequences are equally short,
/// the one reported depends on the order of `toggles`.
pub fn shortest_sequence(target: State, toggles: &[Toggle]) -> Result<Vec<usize>, SearchFailure> {
    let mut search = StateSearch::new(target, toggles);
    search.run()?;
    Ok(search.presses_to(target))
}
