//! Main entry point for the simulation server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with the simulation endpoints.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use falling_sand::config::server::{BIND_HOST, BIND_PORT};
use falling_sand::server::router;
use falling_sand::server::sim_session::SimulationManager;
use falling_sand::server::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Start the SimulationManager actor (creates and tracks simulations).
    let simulation_manager = SimulationManager::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(AppState::new(simulation_manager));

    info!("Listening on {}:{}", BIND_HOST, BIND_PORT);
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .wrap(actix_web::middleware::Logger::default())
            .app_data(state.clone())
            .configure(router::config)
    })
    .bind((BIND_HOST, BIND_PORT))?
    .run()
    .await
}
