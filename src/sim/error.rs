//! Error types for the automaton core.

use thiserror::Error;

/// Errors reported by the grid and the engine.
///
/// Both kinds are local to the call that raised them: the grid is left untouched
/// and the caller decides what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// Grid construction with a non-positive side.
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimension { rows: i32, cols: i32 },

    /// A coordinate outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },
}

/// Result type for automaton operations.
pub type SimResult<T> = Result<T, SimError>;
