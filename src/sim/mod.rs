//! Falling-sand automaton core.
//!
//! - `grid`: fixed-size material grid with bounds-checked access
//! - `engine`: random single-cell scheduling and user paint commands
//! - `rules`: per-material transition rules
//! - `dice`: injectable randomness
//! - `render`: palette and text rendering for viewers

pub mod dice;
pub mod engine;
pub mod error;
pub mod grid;
pub mod render;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use dice::{Dice, RngDice, SeededDice, ThreadDice};
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use grid::Grid;
pub use types::{Direction, Material, Position, TickOutcome};
