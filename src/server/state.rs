// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the simulation manager actor.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::sim_session::server::SimulationManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the simulation manager actor (creates and looks up simulations).
    pub simulation_manager: Addr<SimulationManager>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(simulation_manager: Addr<SimulationManager>) -> Self {
        AppState { simulation_manager }
    }
}
