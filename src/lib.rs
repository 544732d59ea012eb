//! Falling-sand cellular automaton.
//!
//! `sim` holds the engine: a grid of materials updated one random cell per tick.
//! `server` hosts engines behind a WebSocket API and runs their frame loops.
//! `config` gathers the tunable constants of both.

pub mod config;
pub mod server;
pub mod sim;
