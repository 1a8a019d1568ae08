use std::fmt::{Binary, Formatter};
use std::ops::BitXor;

/// Number of lights a single [`State`] can describe.
pub const MAX_WIDTH: usize = u64::BITS as usize;

type Bits = u64;

/// A pattern of lights, one bit per light. Bit `i` set means light `i` is on.
///
/// Every machine starts from [`State::ZERO`], all lights off.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(pub Bits);

/// A button's effect: every set bit flips the corresponding light when applied to a [`State`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Toggle(pub Bits);

impl State {
    /// All lights off.
    pub const ZERO: Self = Self(0);

    /// Build a state from the indices of the lights that are on.
    ///
    /// Returns `None` if any index is [`MAX_WIDTH`] or more, since no state can hold that light.
    pub fn from_lights(lights: impl IntoIterator<Item = usize>) -> Option<Self> {
        bits_of(lights).map(Self)
    }

    pub(crate) fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        Self(bits_of_flags(flags))
    }

    /// Whether light `index` is on.
    pub fn is_lit(&self, index: usize) -> bool {
        index < MAX_WIDTH && self.0 & (1 << index) != 0
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The state with `toggle` applied, i.e. `self XOR toggle`.
    #[inline]
    pub fn apply(self, toggle: Toggle) -> Self {
        Self(self.0 ^ toggle.0)
    }
}

impl Toggle {
    /// Build a toggle flipping the given light indices. Repeated indices flip once.
    ///
    /// Returns `None` if any index is [`MAX_WIDTH`] or more.
    pub fn from_lights(lights: impl IntoIterator<Item = usize>) -> Option<Self> {
        bits_of(lights).map(Self)
    }

    pub(crate) fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        Self(bits_of_flags(flags))
    }

    /// A toggle which flips nothing.
    pub fn is_noop(&self) -> bool {
        self.0 == 0
    }

    /// Indices of the lights this toggle flips, ascending.
    pub fn lights(&self) -> Vec<usize> {
        (0..MAX_WIDTH).filter(|i| self.0 & (1 << i) != 0).collect()
    }
}

fn bits_of(lights: impl IntoIterator<Item = usize>) -> Option<Bits> {
    lights.into_iter().try_fold(0, |acc: Bits, index| {
        let shift = u32::try_from(index).ok()?;
        Some(acc | Bits::checked_shl(1, shift)?)
    })
}

// flag `i` sets bit `i`; callers hold at most MAX_WIDTH flags
fn bits_of_flags(flags: impl IntoIterator<Item = bool>) -> Bits {
    flags.into_iter()
        .take(MAX_WIDTH)
        .enumerate()
        .filter(|(_, on)| *on)
        .fold(0, |acc, (index, _)| acc | (1 << index))
}

impl BitXor<Toggle> for State {
    type Output = State;

    fn bitxor(self, rhs: Toggle) -> Self::Output {
        self.apply(rhs)
    }
}

impl Binary for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Binary::fmt(&self.0, f)
    }
}

impl Binary for Toggle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Binary::fmt(&self.0, f)
    }
}
