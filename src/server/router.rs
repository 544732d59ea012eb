//! HTTP and WebSocket routing configuration.
//!
//! Defines the endpoint that creates simulations and the WebSocket endpoint
//! viewers use to watch and paint them.

use actix_web::web;
use crate::server::sim_session::session::{create_simulation, ws_simulation};

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/simulations")
            .route(web::post().to(create_simulation))
    )
    .service(
        web::resource("/ws/sim/{sim_id}")
            .to(ws_simulation)
    );
}
