use std::fmt::{Display, Formatter};

use strum::VariantArray;

/// One indicator light as written in a machine's diagram.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Default)]
pub enum Indicator {
    /// Written `.`.
    #[default]
    Off,
    /// Written `#`.
    On,
}

impl Indicator {
    /// The character used for this indicator in a diagram.
    pub fn symbol(&self) -> char {
        match self {
            Self::Off => '.',
            Self::On => '#',
        }
    }

    /// Look up the indicator drawn as `symbol`, if any.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::VARIANTS.iter().find(|ind| ind.symbol() == symbol).copied()
    }

    /// Whether this light must be on in the final pattern.
    pub fn is_on(&self) -> bool {
        *self == Self::On
    }
}

impl From<bool> for Indicator {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl Display for Indicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
