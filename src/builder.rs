use itertools::Itertools;
use ndarray::{s, Array2};
use thiserror::Error;

use crate::indicator::Indicator;
use crate::machine::Machine;
use crate::state::{State, Toggle, MAX_WIDTH};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// The machine has no lights, or more than a [`State`] can hold.
    #[error("a machine must have between 1 and {MAX_WIDTH} lights, not {width}")]
    WidthOutOfRange {
        /// The rejected width.
        width: usize,
    },
    /// A light or button wire referred to a light past the end of the machine.
    #[error("light {index} does not exist on a machine with {width} lights")]
    LightOutOfRange {
        /// The offending light index.
        index: usize,
        /// Width of the machine being built.
        width: usize,
    },
    /// A full target pattern was given with the wrong number of lights.
    #[error("pattern has {found} lights but the machine has {expected}")]
    PatternWidthMismatch {
        /// Width of the machine being built.
        expected: usize,
        /// Length of the rejected pattern.
        found: usize,
    },
}

/// Functionality all machine builders must implement.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder: Clone {
    /// Construct a new [`Self`] for a machine with `width` lights, all wanted off and no buttons.
    ///
    /// May cause the builder to enter a [`WidthOutOfRange`](BuilderInvalidReason::WidthOutOfRange) invalid state.
    fn with_width(width: usize) -> Self;
    /// Set the wanted state of the light at `index`.
    ///
    /// May cause the builder to enter a [`LightOutOfRange`](BuilderInvalidReason::LightOutOfRange) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    fn light(&mut self, index: usize, indicator: Indicator) -> &mut Self;
    /// Set every light's wanted state at once, in index order.
    ///
    /// May cause the builder to enter a [`PatternWidthMismatch`](BuilderInvalidReason::PatternWidthMismatch) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    fn target_pattern(&mut self, pattern: &[Indicator]) -> &mut Self;
    /// Add a button wired to the lights at `lights`. The order of `lights` does not matter and repeats are ignored.
    /// A button wired to nothing is allowed.
    ///
    /// May cause the builder to enter a [`LightOutOfRange`](BuilderInvalidReason::LightOutOfRange) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    fn add_button(&mut self, lights: &[usize]) -> &mut Self;
    /// Remove the most recently added button.
    ///
    /// If the builder is in an invalid state or no buttons are present, this function does nothing.
    fn pop_button(&mut self) -> &mut Self;
    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a [`Machine`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    fn build(&self) -> Result<Machine, &Vec<BuilderInvalidReason>>;
}

/// A builder for single-row light machines as found in the factory puzzle.
#[derive(Clone, Debug)]
pub struct MachineBuilder {
    width: usize,
    lights: Vec<Indicator>,
    // buttons x lights; true where a button is wired to a light
    wiring: Array2<bool>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl MachineBuilder {
    fn check_light(&mut self, index: usize) -> bool {
        if index >= self.width {
            self.invalid_reasons.push(BuilderInvalidReason::LightOutOfRange { index, width: self.width });
            return false;
        }

        true
    }
}

impl Builder for MachineBuilder {
    fn with_width(width: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if !(1..=MAX_WIDTH).contains(&width) {
            invalid_reasons.push(BuilderInvalidReason::WidthOutOfRange { width });
        }
        // nothing is stored for a width which cannot be built anyway
        let stored = if invalid_reasons.is_empty() { width } else { 0 };

        Self {
            width,
            lights: vec![Indicator::Off; stored],
            wiring: Array2::default((0, stored)),
            invalid_reasons,
        }
    }

    fn light(&mut self, index: usize, indicator: Indicator) -> &mut Self {
        if !self.invalid_reasons.is_empty() || !self.check_light(index) {
            return self;
        }

        self.lights[index] = indicator;
        self
    }

    fn target_pattern(&mut self, pattern: &[Indicator]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if pattern.len() != self.width {
            self.invalid_reasons.push(BuilderInvalidReason::PatternWidthMismatch { expected: self.width, found: pattern.len() });
            return self;
        }

        self.lights.copy_from_slice(pattern);
        self
    }

    fn add_button(&mut self, lights: &[usize]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for index in lights {
            if !self.check_light(*index) {
                return self;
            }
        }

        let buttons = self.wiring.nrows();
        let previous = &self.wiring;
        let wiring = Array2::from_shape_fn((buttons + 1, self.width), |(button, light)| match button < buttons {
            true => previous[(button, light)],
            false => lights.contains(&light),
        });

        self.wiring = wiring;
        self
    }

    fn pop_button(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() || self.wiring.nrows() == 0 {
            return self;
        }

        let keep = self.wiring.nrows() - 1;
        self.wiring = self.wiring.slice(s![..keep, ..]).to_owned();
        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        match self.invalid_reasons.is_empty() {
            true => None,
            false => Some(&self.invalid_reasons),
        }
    }

    fn build(&self) -> Result<Machine, &Vec<BuilderInvalidReason>> {
        if let Some(reasons) = self.is_valid() {
            return Err(reasons);
        }

        // both hold exactly `width` flags, and `with_width` bounded that by MAX_WIDTH
        let target = State::from_flags(self.lights.iter().map(Indicator::is_on));
        let toggles = self.wiring.rows()
            .into_iter()
            .map(|row| Toggle::from_flags(row.iter().copied()))
            .collect_vec();

        Ok(Machine::new(self.width, target, toggles))
    }
}
