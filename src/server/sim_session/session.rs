/// WebSocket session handler for simulation viewers.
///
/// This actor manages a single browser connection to a simulation, relaying
/// paint and speed commands to the `SimulationSession` and serializing frames
/// and errors back to the client.
use actix::prelude::*;
use actix_web::{web, error, Error, HttpRequest, HttpResponse};
use actix_web::http::StatusCode;
use actix_web_actors::ws;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::borrow::Cow;
use uuid::Uuid;

use super::messages::{ActionAccepted, ClientAction, ProcessClientMessage, ServerWsMessage};
use super::server::{
    CreateRejection, CreateSimulation, GetSimulation, RegisterViewer, SimulationSession, UnregisterViewer,
};
use crate::config::simulation::{GRID_COLS, GRID_ROWS};
use crate::server::anti_spam::{AntiSpamState, RequestKind};
use crate::server::state::AppState;
use crate::server::ws_error::{
    http_error_response, ws_error_message, BANNED, INVALID_COMMAND, INVALID_DIMENSION, SIMULATION_LIMIT,
};

/// A viewer's WebSocket connection to one simulation.
pub struct ViewerSession {
    pub sim_id: Uuid,
    pub viewer_id: Uuid,
    pub name: String,
    pub session_addr: Addr<SimulationSession>,
    label: String,
    anti_spam: AntiSpamState,
}

impl ViewerSession {
    pub fn new(sim_id: Uuid, viewer_id: Uuid, name: String, session_addr: Addr<SimulationSession>) -> Self {
        Self {
            sim_id,
            viewer_id,
            name,
            session_addr,
            label: viewer_id.to_string(),
            anti_spam: AntiSpamState::new(),
        }
    }

    /// Send a ban message, close the socket and stop the actor.
    fn send_ban_and_close(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let context = json!({
            "viewer": self.label,
            "sim_id": self.sim_id,
            "ban_remaining_secs": self.anti_spam.ban_remaining_secs(),
        });
        ctx.text(ws_error_message(
            BANNED,
            "You have been banned for spamming. Please try again later.",
            Some(context),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Send an error unless it repeats the previous one; ban if the client keeps triggering errors.
    fn send_error_and_maybe_ban(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: &str,
        message: &str,
        context: Option<Value>,
    ) {
        if !self.anti_spam.should_send_error(code, &self.label) {
            return;
        }
        if self.anti_spam.record_error(&self.label) {
            self.send_ban_and_close(ctx);
            return;
        }
        ctx.text(ws_error_message(code, message, context));
    }
}

impl Actor for ViewerSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the socket opens. Registers the viewer with the simulation.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.session_addr.do_send(RegisterViewer {
            viewer_id: self.viewer_id,
            name: self.name.clone(),
            addr: ctx.address(),
        });
    }

    /// Called when the socket closes. Removes the viewer from the simulation.
    fn stopped(&mut self, ctx: &mut Self::Context) {
        info!("[ViewerSession] Disconnected viewer={} sim_id={}", self.viewer_id, self.sim_id);
        self.session_addr.do_send(UnregisterViewer {
            viewer_id: self.viewer_id,
            addr: ctx.address(),
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ViewerSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let parsed = serde_json::from_str::<ClientAction>(&text);
                let kind = parsed.as_ref().map_or(RequestKind::Control, RequestKind::of);
                if self.anti_spam.record_request(kind, &self.label) {
                    self.send_ban_and_close(ctx);
                    return;
                }
                match parsed {
                    Ok(ClientAction::Ping) => {
                        // Keep-alive only.
                    }
                    Ok(action) => {
                        self.session_addr.do_send(ProcessClientMessage {
                            msg: action,
                            viewer_id: self.viewer_id,
                            addr: ctx.address(),
                        });
                    }
                    Err(e) => {
                        self.send_error_and_maybe_ban(
                            ctx,
                            INVALID_COMMAND,
                            "Invalid client message.",
                            Some(json!({ "reason": e.to_string() })),
                        );
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[ViewerSession] Protocol error viewer={}: {}", self.viewer_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ViewerSession {
    type Result = ();

    /// Handles messages sent from the simulation to this viewer.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        if let ServerWsMessage::Error { code, message, context } = msg {
            self.send_error_and_maybe_ban(ctx, &code, &message, context);
            return;
        }
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                warn!("[ViewerSession] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(r#"{"action":"Error","data":{"code":"INTERNAL","message":"Internal server error"}}"#);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

impl Handler<ActionAccepted> for ViewerSession {
    type Result = ();

    fn handle(&mut self, _: ActionAccepted, _: &mut Self::Context) {
        self.anti_spam.reset_on_valid_action();
    }
}

/// Extract the optional `name` query parameter, URL-decoded.
pub fn parse_viewer_name(query: &str) -> Option<String> {
    query.split('&').find_map(|kv| {
        let mut split = kv.splitn(2, '=');
        match (split.next(), split.next()) {
            (Some("name"), Some(raw)) => {
                let name = urlencoding::decode(raw)
                    .unwrap_or(Cow::Borrowed(""))
                    .trim()
                    .to_string();
                (!name.is_empty()).then_some(name)
            }
            _ => None,
        }
    })
}

/// WebSocket endpoint for watching and painting a simulation.
///
/// Path: `/ws/sim/{sim_id}`. Optional query parameter `name` (URL-encoded);
/// a default is generated from the viewer id when it is missing.
pub async fn ws_simulation(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let sim_id = req
        .match_info()
        .get("sim_id")
        .ok_or_else(|| error::ErrorBadRequest("Missing simulation id"))?;
    let sim_id = Uuid::parse_str(sim_id).map_err(error::ErrorBadRequest)?;

    let session_addr = data.simulation_manager
        .send(GetSimulation { sim_id })
        .await
        .map_err(error::ErrorInternalServerError)?
        .map_err(error::ErrorBadRequest)?;

    let viewer_id = Uuid::new_v4();
    let name = parse_viewer_name(req.query_string())
        .unwrap_or_else(|| format!("viewer-{}", &viewer_id.simple().to_string()[..6]));
    info!("[ViewerSession] Connecting viewer={} name={} sim_id={}", viewer_id, name, sim_id);

    ws::start(
        ViewerSession::new(sim_id, viewer_id, name, session_addr),
        &req,
        stream,
    )
}

/// Query parameters accepted when creating a simulation.
#[derive(Deserialize, Debug)]
pub struct CreateSimulationParams {
    pub rows: Option<i32>,
    pub cols: Option<i32>,
}

/// HTTP endpoint creating a new simulation.
///
/// `POST /simulations?rows=R&cols=C`; missing dimensions fall back to the defaults.
pub async fn create_simulation(
    params: web::Query<CreateSimulationParams>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let rows = params.rows.unwrap_or(GRID_ROWS);
    let cols = params.cols.unwrap_or(GRID_COLS);

    let created = data.simulation_manager
        .send(CreateSimulation { rows, cols })
        .await
        .map_err(error::ErrorInternalServerError)?;

    match created {
        Ok(info) => Ok(HttpResponse::Created().json(info)),
        Err(e @ CreateRejection::Grid(_)) => Ok(http_error_response(
            INVALID_DIMENSION,
            &e.to_string(),
            Some(json!({ "rows": rows, "cols": cols })),
            StatusCode::BAD_REQUEST,
        )),
        Err(e @ CreateRejection::LimitReached { max }) => Ok(http_error_response(
            SIMULATION_LIMIT,
            &e.to_string(),
            Some(json!({ "max_simulations": max })),
            StatusCode::SERVICE_UNAVAILABLE,
        )),
    }
}
