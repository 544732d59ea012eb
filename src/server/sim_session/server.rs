use actix::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::config::simulation::{
    DEFAULT_TICKS_PER_FRAME, IDLE_GRACE_SECS, MAX_GRID_SIDE, MAX_SIMULATIONS, MAX_TICKS_PER_FRAME,
};
use crate::server::session_utils::is_viewer_addr_valid;
use crate::server::sim_session::frame_loop::{broadcast_frame, start_frame_loop};
use crate::server::sim_session::messages::{
    ActionAccepted, ClientAction, FrameSnapshot, ProcessClientMessage, ServerWsMessage,
};
use crate::server::sim_session::session::ViewerSession;
use crate::server::ws_error::{INVALID_DIMENSION, INVALID_SPEED, OUT_OF_BOUNDS, UNKNOWN_TOOL};
use crate::sim::render::palette;
use crate::sim::{Engine, SeededDice, SimError, SimResult};

/// One running simulation and the viewers watching it.
pub struct SimulationSession {
    pub sim_id: Uuid,
    pub(crate) engine: Engine<SeededDice>,
    pub(crate) ticks_per_frame: u32,
    pub(crate) viewers: HashMap<Uuid, Addr<ViewerSession>>,
    pub(crate) frame_timer: Option<SpawnHandle>,
    manager: Option<Addr<SimulationManager>>,
    idle_grace: Duration,
    idle_since: Option<Instant>,
}

impl Actor for SimulationSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        start_frame_loop(self, ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[SimulationSession] Stopped sim_id={} generation={}", self.sim_id, self.engine.generation());
        if let Some(manager) = &self.manager {
            manager.do_send(SimulationEnded { sim_id: self.sim_id });
        }
    }
}

impl SimulationSession {
    pub fn new(sim_id: Uuid, rows: i32, cols: i32, seed: u64) -> SimResult<Self> {
        Ok(SimulationSession {
            sim_id,
            engine: Engine::seeded(rows, cols, seed)?,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
            viewers: HashMap::new(),
            frame_timer: None,
            manager: None,
            idle_grace: Duration::from_secs(IDLE_GRACE_SECS),
            idle_since: None,
        })
    }

    /// Report to `manager` when stopping, and stop after `idle_grace` without viewers.
    pub fn owned_by(mut self, manager: Addr<SimulationManager>, idle_grace: Duration) -> Self {
        self.manager = Some(manager);
        self.idle_grace = idle_grace;
        self
    }

    /// Track how long the simulation has gone unwatched.
    /// Returns true once it has had no viewers for the whole grace period.
    pub(crate) fn idle_expired(&mut self, now: Instant) -> bool {
        if !self.viewers.is_empty() {
            self.idle_since = None;
            return false;
        }
        let since = *self.idle_since.get_or_insert(now);
        now.duration_since(since) >= self.idle_grace
    }

    fn welcome(&self, viewer_id: Uuid) -> ServerWsMessage {
        let (rows, cols) = self.engine.dimensions();
        ServerWsMessage::Welcome {
            sim_id: self.sim_id,
            viewer_id,
            rows,
            cols,
            ticks_per_frame: self.ticks_per_frame,
            palette: palette(),
        }
    }

    /// Apply a viewer command. Returns the client-facing error when it is rejected.
    fn apply_action(&mut self, action: ClientAction) -> Result<(), ServerWsMessage> {
        match action {
            ClientAction::Paint { row, col, tool } => match self.engine.apply_tool(row, col, &tool) {
                Ok(true) => Ok(()),
                Ok(false) => Err(ServerWsMessage::error(
                    UNKNOWN_TOOL,
                    "Unknown paint tool.",
                    Some(json!({ "tool": tool })),
                )),
                Err(err) => Err(sim_error_reply(err)),
            },
            ClientAction::SetSpeed { ticks_per_frame } => {
                if ticks_per_frame > MAX_TICKS_PER_FRAME {
                    return Err(ServerWsMessage::error(
                        INVALID_SPEED,
                        "Speed is above the allowed maximum.",
                        Some(json!({ "max_ticks_per_frame": MAX_TICKS_PER_FRAME })),
                    ));
                }
                self.ticks_per_frame = ticks_per_frame;
                Ok(())
            }
            ClientAction::Clear => {
                self.engine.clear();
                Ok(())
            }
            ClientAction::Ping => Ok(()),
        }
    }
}

/// Client-facing error for a rejected engine call.
fn sim_error_reply(err: SimError) -> ServerWsMessage {
    match err {
        SimError::OutOfBounds { row, col } => ServerWsMessage::error(
            OUT_OF_BOUNDS,
            "Cell is outside the grid.",
            Some(json!({ "row": row, "col": col })),
        ),
        SimError::InvalidDimension { rows, cols } => ServerWsMessage::error(
            INVALID_DIMENSION,
            &err.to_string(),
            Some(json!({ "rows": rows, "cols": cols })),
        ),
    }
}

/// Creates simulations, hands out their addresses and forgets them once they stop.
pub struct SimulationManager {
    sessions: HashMap<Uuid, Addr<SimulationSession>>,
    max_simulations: usize,
    idle_grace: Duration,
}

/// Why a simulation could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CreateRejection {
    #[error(transparent)]
    Grid(#[from] SimError),

    #[error("server is already running {max} simulations")]
    LimitReached { max: usize },
}

/// Returned to the HTTP client that created a simulation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationInfo {
    pub sim_id: Uuid,
    pub rows: i32,
    pub cols: i32,
}

#[derive(Message)]
#[rtype(result = "Result<SimulationInfo, CreateRejection>")]
pub struct CreateSimulation {
    pub rows: i32,
    pub cols: i32,
}

/// Sent by a simulation as it stops.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SimulationEnded {
    pub sim_id: Uuid,
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationManager {
    pub fn new() -> Self {
        Self::with_limits(MAX_SIMULATIONS, Duration::from_secs(IDLE_GRACE_SECS))
    }

    pub fn with_limits(max_simulations: usize, idle_grace: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            max_simulations,
            idle_grace,
        }
    }

    /// Check a creation request against the size bounds and the simulation limit.
    pub fn check_request(&self, rows: i32, cols: i32) -> Result<(), CreateRejection> {
        if rows <= 0 || cols <= 0 || rows > MAX_GRID_SIDE || cols > MAX_GRID_SIDE {
            return Err(SimError::InvalidDimension { rows, cols }.into());
        }
        if self.sessions.len() >= self.max_simulations {
            return Err(CreateRejection::LimitReached { max: self.max_simulations });
        }
        Ok(())
    }

    fn create_simulation(
        &mut self,
        rows: i32,
        cols: i32,
        me: Addr<SimulationManager>,
    ) -> Result<SimulationInfo, CreateRejection> {
        self.check_request(rows, cols)?;
        let sim_id = Uuid::new_v4();
        let seed: u64 = rand::random();
        let session = SimulationSession::new(sim_id, rows, cols, seed)?
            .owned_by(me, self.idle_grace)
            .start();

        info!("[SimulationManager] Created sim_id={} size={}x{} seed={}", sim_id, rows, cols, seed);
        self.sessions.insert(sim_id, session);
        Ok(SimulationInfo { sim_id, rows, cols })
    }
}

impl Actor for SimulationManager {
    type Context = Context<Self>;
}

impl Handler<CreateSimulation> for SimulationManager {
    type Result = Result<SimulationInfo, CreateRejection>;

    fn handle(&mut self, msg: CreateSimulation, ctx: &mut Context<Self>) -> Self::Result {
        let result = self.create_simulation(msg.rows, msg.cols, ctx.address());
        if let Err(e) = &result {
            warn!("[SimulationManager] Rejected {}x{}: {}", msg.rows, msg.cols, e);
        }
        result
    }
}

impl Handler<SimulationEnded> for SimulationManager {
    type Result = ();

    fn handle(&mut self, msg: SimulationEnded, _: &mut Context<Self>) -> Self::Result {
        if self.sessions.remove(&msg.sim_id).is_some() {
            info!("[SimulationManager] Removed sim_id={} running={}", msg.sim_id, self.sessions.len());
        }
    }
}

#[derive(Message)]
#[rtype(result = "Result<Addr<SimulationSession>, String>")]
pub struct GetSimulation {
    pub sim_id: Uuid,
}

impl Handler<GetSimulation> for SimulationManager {
    type Result = Result<Addr<SimulationSession>, String>;

    fn handle(&mut self, msg: GetSimulation, _: &mut Context<Self>) -> Self::Result {
        self.sessions.get(&msg.sim_id)
            .cloned()
            .ok_or_else(|| "Simulation not found".to_string())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterViewer {
    pub viewer_id: Uuid,
    pub name: String,
    pub addr: Addr<ViewerSession>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct UnregisterViewer {
    pub viewer_id: Uuid,
    pub addr: Addr<ViewerSession>,
}

impl Handler<RegisterViewer> for SimulationSession {
    type Result = ();

    fn handle(&mut self, msg: RegisterViewer, _: &mut Context<Self>) -> Self::Result {
        info!("[SimulationSession] Viewer joined sim_id={} viewer={} name={}", self.sim_id, msg.viewer_id, msg.name);
        msg.addr.do_send(self.welcome(msg.viewer_id));
        msg.addr.do_send(ServerWsMessage::frame(FrameSnapshot::capture(&self.engine)));
        self.viewers.insert(msg.viewer_id, msg.addr);
    }
}

impl Handler<UnregisterViewer> for SimulationSession {
    type Result = ();

    fn handle(&mut self, msg: UnregisterViewer, _: &mut Context<Self>) -> Self::Result {
        if !is_viewer_addr_valid(&self.viewers, &msg.viewer_id, &msg.addr) {
            debug!("[SimulationSession] Ignoring stale unregister for viewer={}", msg.viewer_id);
            return;
        }
        self.viewers.remove(&msg.viewer_id);
        info!("[SimulationSession] Viewer left sim_id={} viewer={} remaining={}", self.sim_id, msg.viewer_id, self.viewers.len());
    }
}

impl Handler<ProcessClientMessage> for SimulationSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientMessage, _: &mut Context<Self>) -> Self::Result {
        if !is_viewer_addr_valid(&self.viewers, &msg.viewer_id, &msg.addr) {
            warn!("[SimulationSession] Command from unregistered viewer={}", msg.viewer_id);
            return;
        }

        let is_clear = msg.msg == ClientAction::Clear;
        match self.apply_action(msg.msg) {
            Ok(()) => {
                msg.addr.do_send(ActionAccepted);
                if is_clear {
                    // Show the wiped grid right away instead of on the next frame.
                    broadcast_frame(self);
                }
            }
            Err(reply) => {
                debug!("[SimulationSession] Rejected command from viewer={}: {:?}", msg.viewer_id, reply);
                msg.addr.do_send(reply);
            }
        }
    }
}
