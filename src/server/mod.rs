// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend components that host simulations:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Simulation sessions (frame loop, viewer connections, paint commands)
//! - Anti-spam protection and error formatting shared by WebSocket actors

pub mod anti_spam;
pub mod router;
pub mod session_utils;
pub mod sim_session;
pub mod state;
pub mod ws_error;
