/// Main configuration module.
///
/// Re-exports submodules for simulation, anti-spam and server configuration.
pub mod anti_spam;
pub mod server;
pub mod simulation;
