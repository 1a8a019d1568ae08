use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::indicator::Indicator;
use crate::search;
use crate::search::SearchFailure;
use crate::state::{State, Toggle};

/// A machine: a row of lights which all start off, the pattern they should show, and the buttons which toggle them.
///
/// [`Machine`]s should be built using a [`Builder`](crate::builder::Builder) such as [`MachineBuilder`](crate::builder::MachineBuilder),
/// or parsed from their diagram with [`parse_machine`](crate::parse::parse_machine).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Machine {
    width: usize,
    target: State,
    toggles: Vec<Toggle>,
}

impl Machine {
    pub(crate) fn new(width: usize, target: State, toggles: Vec<Toggle>) -> Self {
        Self { width, target, toggles }
    }

    /// Number of lights.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The light pattern the machine should end up showing.
    pub fn target(&self) -> State {
        self.target
    }

    /// Each button's effect, in the order the buttons were added.
    pub fn toggles(&self) -> &[Toggle] {
        &self.toggles
    }

    /// The lights wired to `button`, ascending, or `None` if there is no such button.
    pub fn wiring_of(&self, button: usize) -> Option<Vec<usize>> {
        self.toggles.get(button).map(Toggle::lights)
    }

    /// The fewest button presses that make this machine show its target pattern.
    ///
    /// See [`search::minimum_toggles`].
    pub fn minimum_presses(&self) -> Result<usize, SearchFailure> {
        search::minimum_toggles(self.target, &self.toggles)
    }

    /// One shortest sequence of button indices to press, in order.
    ///
    /// See [`search::shortest_sequence`].
    pub fn press_sequence(&self) -> Result<Vec<usize>, SearchFailure> {
        search::shortest_sequence(self.target, &self.toggles)
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pattern: String = (0..self.width)
            .map(|index| Indicator::from(self.target.is_lit(index)).symbol())
            .collect();
        write!(f, "[{pattern}]")?;

        for toggle in &self.toggles {
            write!(f, " ({})", toggle.lights().iter().join(","))?;
        }

        Ok(())
    }
}
