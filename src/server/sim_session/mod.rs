//! Simulation sessions.
//!
//! A `SimulationSession` actor owns one engine and runs its frame loop; each
//! connected browser is a `ViewerSession` WebSocket actor forwarding paint
//! commands to it and relaying frames back.

pub mod frame_loop;
pub mod messages;
pub mod server;
pub mod session;

pub use server::{SimulationManager, SimulationSession};
