//! Armed-session state machine.
//!
//! A session arms when a frame passes pose validation and stays armed
//! while fresh valid frames keep arriving; without one the arming expires
//! after a fixed timeout. Pick-up opens a drag inside an armed session,
//! and losing the hand tears the whole session down at once.
//!
//! All time-dependent methods take an explicit `now` so callers drive the
//! clock; nothing here reads wall time on its own.

use std::time::{Duration, Instant};

use log::debug;

use crate::landmarks::Landmark;

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Not armed; gestures are ignored
    Idle,
    /// Armed with no drag open
    ArmedIdle,
    /// Armed with a drag in progress
    ArmedDragging,
}

/// Mutable session state for the single processing thread.
#[derive(Debug)]
pub struct SessionState {
    timeout: Duration,
    armed_at: Option<Instant>,
    drag_anchor: Option<Landmark>,
}

impl SessionState {
    /// Create an idle session with the given arming timeout
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            armed_at: None,
            drag_anchor: None,
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.armed_at.is_none() {
            SessionPhase::Idle
        } else if self.drag_anchor.is_some() {
            SessionPhase::ArmedDragging
        } else {
            SessionPhase::ArmedIdle
        }
    }

    /// True while armed, dragging or not
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// True while a drag is open
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Index-fingertip position recorded when the current drag began
    #[must_use]
    pub fn drag_anchor(&self) -> Option<Landmark> {
        self.drag_anchor
    }

    /// Arm the session, or refresh the arming timestamp if already armed
    pub fn arm(&mut self, now: Instant) {
        if self.armed_at.is_none() {
            debug!("Session armed");
        }
        self.armed_at = Some(now);
    }

    /// True when the arming window has lapsed without a refresh.
    ///
    /// Never true while idle; the timeout only governs an armed session.
    #[must_use]
    pub fn timed_out(&self, now: Instant) -> bool {
        match self.armed_at {
            Some(armed_at) => now.saturating_duration_since(armed_at) > self.timeout,
            None => false,
        }
    }

    /// Open a drag at the given anchor point.
    ///
    /// Only meaningful while armed; also refreshes the arming timestamp.
    pub fn begin_drag(&mut self, anchor: Landmark, now: Instant) {
        debug!("Drag started at ({:.3}, {:.3})", anchor.x, anchor.y);
        self.drag_anchor = Some(anchor);
        self.armed_at = Some(now);
    }

    /// Close the drag, returning to armed-idle with a fresh timestamp
    pub fn end_drag(&mut self, now: Instant) {
        if self.drag_anchor.take().is_some() {
            debug!("Drag ended");
        }
        self.armed_at = Some(now);
    }

    /// Drop back to idle, abandoning any drag
    pub fn reset(&mut self) {
        if self.armed_at.is_some() {
            debug!("Session reset to idle");
        }
        self.armed_at = None;
        self.drag_anchor = None;
    }
}
