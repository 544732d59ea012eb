/// Frame loop for SimulationSession.
/// Every frame runs the session's ticks-per-frame budget, then pushes the grid to all viewers.

use std::time::{Duration, Instant};
use actix::prelude::*;
use log::{info, trace};

use crate::config::simulation::FRAME_INTERVAL_MS;
use crate::server::sim_session::messages::{FrameSnapshot, ServerWsMessage};
use crate::server::sim_session::server::SimulationSession;

/// Start the periodic frame timer.
pub fn start_frame_loop(this: &mut SimulationSession, ctx: &mut Context<SimulationSession>) {
    if let Some(handle) = this.frame_timer.take() {
        ctx.cancel_future(handle);
    }
    let handle = ctx.run_interval(Duration::from_millis(FRAME_INTERVAL_MS), |act, ctx| {
        run_frame(act, ctx);
    });
    this.frame_timer = Some(handle);
    info!("[SimulationSession] Frame loop started sim_id={} every {}ms", this.sim_id, FRAME_INTERVAL_MS);
}

/// Advance the automaton by one frame's worth of ticks and broadcast the result.
/// Nothing runs while no viewer is connected; a simulation left unwatched past
/// its grace period is stopped.
pub fn run_frame(this: &mut SimulationSession, ctx: &mut Context<SimulationSession>) {
    if this.idle_expired(Instant::now()) {
        info!("[SimulationSession] No viewers, shutting down sim_id={}", this.sim_id);
        ctx.stop();
        return;
    }
    if this.viewers.is_empty() {
        return;
    }
    let changed = this.engine.advance(this.ticks_per_frame);
    trace!(
        "[SimulationSession] Frame sim_id={} generation={} ticks={} changed={}",
        this.sim_id,
        this.engine.generation(),
        this.ticks_per_frame,
        changed
    );
    broadcast_frame(this);
}

/// Send the current grid to every viewer.
pub fn broadcast_frame(this: &SimulationSession) {
    let update = ServerWsMessage::frame(FrameSnapshot::capture(&this.engine));
    for addr in this.viewers.values() {
        addr.do_send(update.clone());
    }
}
