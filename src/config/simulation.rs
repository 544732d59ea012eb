/// Simulation configuration constants.
///
/// This module defines the grid dimensions used when a client does not ask for
/// specific ones, and the pacing of the frame loop.

/// Number of rows in a default grid.
pub const GRID_ROWS: i32 = 120;

/// Number of columns in a default grid.
pub const GRID_COLS: i32 = 80;

/// Largest side a client may request for a new grid.
pub const MAX_GRID_SIDE: i32 = 400;

/// Ticks run per frame until a client changes the speed.
pub const DEFAULT_TICKS_PER_FRAME: u32 = 500;

/// Upper bound for the speed a client may set.
pub const MAX_TICKS_PER_FRAME: u32 = 20_000;

/// Delay between two frames, in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 33;

/// Frames the terminal demo runs before exiting.
pub const DEMO_FRAMES: u32 = 60;

/// Simulations the server hosts at once. Creation fails past this.
pub const MAX_SIMULATIONS: usize = 64;

/// Seconds a simulation may run without viewers before it is shut down.
pub const IDLE_GRACE_SECS: u64 = 120;
