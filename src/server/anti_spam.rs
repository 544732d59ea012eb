use std::time::{Instant, Duration};
use log::warn;

use crate::config::anti_spam::{
    BAN_DURATION_SECONDS, MAX_CONTROLS_PER_SECOND, MAX_ERRORS_PER_SECOND, MAX_PAINTS_PER_SECOND,
};
use crate::server::sim_session::messages::ClientAction;

/// Budget a viewer request is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Painting a cell. A drag produces a burst of these.
    Paint,
    /// Speed changes, clears, keep-alives and anything that fails to parse.
    Control,
}

impl RequestKind {
    pub fn of(action: &ClientAction) -> Self {
        match action {
            ClientAction::Paint { .. } => RequestKind::Paint,
            ClientAction::SetSpeed { .. } | ClientAction::Clear | ClientAction::Ping => RequestKind::Control,
        }
    }

    fn budget(self) -> u32 {
        match self {
            RequestKind::Paint => MAX_PAINTS_PER_SECOND,
            RequestKind::Control => MAX_CONTROLS_PER_SECOND,
        }
    }
}

/// Tracks anti-spam state for a single viewer connection.
pub struct AntiSpamState {
    // Last error code sent (for suppression)
    last_error_code: Option<String>,
    // Timestamp of last reset (for per-second counters)
    last_tick: Instant,
    errors_this_tick: u32,
    paints_this_tick: u32,
    controls_this_tick: u32,
    banned_until: Option<Instant>,
}

impl Default for AntiSpamState {
    fn default() -> Self {
        Self::new()
    }
}

impl AntiSpamState {
    pub fn new() -> Self {
        Self {
            last_error_code: None,
            last_tick: Instant::now(),
            errors_this_tick: 0,
            paints_this_tick: 0,
            controls_this_tick: 0,
            banned_until: None,
        }
    }

    /// Call for every incoming message, charging it to its kind's budget.
    /// Returns true if the viewer is currently banned.
    pub fn record_request(&mut self, kind: RequestKind, viewer: &str) -> bool {
        self.tick();
        let counter = match kind {
            RequestKind::Paint => &mut self.paints_this_tick,
            RequestKind::Control => &mut self.controls_this_tick,
        };
        *counter += 1;
        if *counter > kind.budget() {
            self.ban(viewer, &format!("Too many {:?} requests per second", kind));
            return true;
        }
        self.is_banned()
    }

    /// Call before sending an error to the viewer.
    /// Frames are not counted: they are pushed by the server, not requested.
    /// Returns true if the viewer is currently banned.
    pub fn record_error(&mut self, viewer: &str) -> bool {
        self.tick();
        self.errors_this_tick += 1;
        if self.errors_this_tick > MAX_ERRORS_PER_SECOND {
            self.ban(viewer, "Too many errors per second");
            return true;
        }
        self.is_banned()
    }

    /// Call when sending an error. Returns true if the error should be sent (not suppressed).
    pub fn should_send_error(&mut self, error_code: &str, viewer: &str) -> bool {
        if self.last_error_code.as_deref() == Some(error_code) {
            warn!("[AntiSpam] Suppressed duplicate error '{}' for viewer={}", error_code, viewer);
            return false;
        }
        self.last_error_code = Some(error_code.to_string());
        true
    }

    /// Call when a command was accepted by the simulation.
    pub fn reset_on_valid_action(&mut self) {
        self.last_error_code = None;
    }

    pub fn is_banned(&self) -> bool {
        self.banned_until.is_some_and(|until| Instant::now() < until)
    }

    /// Returns the remaining ban duration in seconds, or 0 if not banned.
    pub fn ban_remaining_secs(&self) -> u64 {
        self.banned_until
            .map(|until| until.saturating_duration_since(Instant::now()).as_secs())
            .unwrap_or(0)
    }

    fn ban(&mut self, viewer: &str, reason: &str) {
        let until = Instant::now() + Duration::from_secs(BAN_DURATION_SECONDS);
        self.banned_until = Some(until);
        warn!("[AntiSpam] Banned viewer={} for {}s, reason: {}", viewer, BAN_DURATION_SECONDS, reason);
    }

    /// Reset per-second counters if a new second has started.
    fn tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_tick) >= Duration::from_secs(1) {
            self.last_tick = now;
            self.errors_this_tick = 0;
            self.paints_this_tick = 0;
            self.controls_this_tick = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_errors_are_suppressed_until_valid_action() {
        let mut state = AntiSpamState::new();
        assert!(state.should_send_error("UNKNOWN_TOOL", "v1"));
        assert!(!state.should_send_error("UNKNOWN_TOOL", "v1"));
        assert!(state.should_send_error("OUT_OF_BOUNDS", "v1"));

        state.reset_on_valid_action();
        assert!(state.should_send_error("OUT_OF_BOUNDS", "v1"));
    }

    #[test]
    fn test_request_kinds() {
        let paint = ClientAction::Paint { row: 0, col: 0, tool: "Sand".to_string() };
        assert_eq!(RequestKind::of(&paint), RequestKind::Paint);
        assert_eq!(RequestKind::of(&ClientAction::SetSpeed { ticks_per_frame: 5 }), RequestKind::Control);
        assert_eq!(RequestKind::of(&ClientAction::Clear), RequestKind::Control);
        assert_eq!(RequestKind::of(&ClientAction::Ping), RequestKind::Control);
    }

    #[test]
    fn test_paint_drag_is_not_banned() {
        let mut state = AntiSpamState::new();
        for _ in 0..MAX_PAINTS_PER_SECOND {
            assert!(!state.record_request(RequestKind::Paint, "v1"));
        }
        assert!(state.record_request(RequestKind::Paint, "v1"));
        assert!(state.is_banned());
        assert!(state.ban_remaining_secs() > 0);
    }

    #[test]
    fn test_control_flood_bans_at_its_own_budget() {
        let mut state = AntiSpamState::new();
        for _ in 0..MAX_CONTROLS_PER_SECOND {
            assert!(!state.record_request(RequestKind::Control, "v1"));
        }
        // Far below the paint budget, yet over the control one.
        assert!(MAX_CONTROLS_PER_SECOND < MAX_PAINTS_PER_SECOND);
        assert!(state.record_request(RequestKind::Control, "v1"));
    }

    #[test]
    fn test_paint_and_control_budgets_are_independent() {
        let mut state = AntiSpamState::new();
        for _ in 0..MAX_CONTROLS_PER_SECOND {
            assert!(!state.record_request(RequestKind::Control, "v1"));
        }
        for _ in 0..MAX_PAINTS_PER_SECOND {
            assert!(!state.record_request(RequestKind::Paint, "v1"));
        }
        assert!(!state.is_banned());
    }

    #[test]
    fn test_error_flood_bans() {
        let mut state = AntiSpamState::new();
        for _ in 0..MAX_ERRORS_PER_SECOND {
            assert!(!state.record_error("v1"));
        }
        assert!(state.record_error("v1"));
    }

    #[test]
    fn test_not_banned_initially() {
        let state = AntiSpamState::new();
        assert!(!state.is_banned());
        assert_eq!(state.ban_remaining_secs(), 0);
    }
}
