#![warn(missing_docs)]

//! # `switchboard`
//!
//! A solver for the factory "indicator lights" puzzle: every machine has a row of lights, all initially off, a diagram
//! of which lights should end up on, and a set of buttons each toggling a fixed group of lights.
//! The goal is the fewest total button presses which make every machine match its diagram.
//!
//! Begin by building a [`Machine`] using a builder such as [`MachineBuilder`](builder::MachineBuilder), or parse one from its
//! diagram with [`parse_machine`](parse::parse_machine), e.g. `[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}`.
//! Then call [`minimum_presses()`](Machine::minimum_presses) or [`press_sequence()`](Machine::press_sequence).
//!
//! # Internals
//! A machine's lights are a bitmask [`State`] and each button is a [`Toggle`] mask which is XOR'd into it.
//! Finding the fewest presses is then a shortest-path problem over the graph whose vertices are states and whose edges
//! are single toggles, every edge having unit cost.
//!
//! [`search::minimum_toggles`] solves it with a breadth-first search from the all-off state.
//! States are taken from a FIFO queue in non-decreasing distance order, so the first time any state is recorded, the
//! target included, it is recorded at its shortest distance and never needs revising.
//! The search may press a button any number of times; it simply finds that pressing one twice gets nowhere.
//!
//! The graph has at most `2^width` vertices but only the part reachable before the target is found is ever explored.
//! For small machines, [`graph`] materialises the reachable part with `petgraph` so answers can be checked against an
//! independent shortest-path algorithm.

pub use builder::Builder;
pub use indicator::Indicator;
pub use machine::Machine;
pub use search::SearchFailure;
pub use state::{State, Toggle, MAX_WIDTH};

pub mod builder;
pub mod graph;
pub(crate) mod indicator;
pub(crate) mod machine;
pub mod parse;
pub mod search;
pub(crate) mod state;
mod tests;
