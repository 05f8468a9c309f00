//! Per-frame gesture processing.
//!
//! Ties the pipeline together: each frame's hand observation runs through
//! timeout handling, pose validation, gesture classification and command
//! dispatch, mutating the session state along the way. One frame yields at
//! most one discrete window command; drag moves stream on the frames in
//! between.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::gestures::{classify, Gesture};
use crate::landmarks::{HandLandmark, HandPose};
use crate::session::{SessionPhase, SessionState};
use crate::validation::{validate_pose, PoseValidation};
use crate::window_control::{WindowCommand, WindowControl};

/// What one frame of processing did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Session phase after the frame
    pub phase: SessionPhase,
    /// Validation result, absent when no hand was observed
    pub validation: Option<PoseValidation>,
    /// Command dispatched this frame, if any
    pub command: Option<WindowCommand>,
}

/// Drives validation, classification and dispatch over a session.
///
/// Collaborator failures are contained here: a failed window command is
/// logged and the session still follows the gesture's intent, so a drop
/// whose dispatch fails ends the drag all the same.
pub struct GestureController {
    window_control: Box<dyn WindowControl>,
    session: SessionState,
}

impl GestureController {
    /// Create a controller around a window-control collaborator
    #[must_use]
    pub fn new(window_control: Box<dyn WindowControl>, armed_timeout: Duration) -> Self {
        Self {
            window_control,
            session: SessionState::new(armed_timeout),
        }
    }

    /// Current session phase
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Process one frame's observation.
    ///
    /// `None` means no hand this frame: the session is torn down
    /// immediately, and an open drag is first closed with a best-effort
    /// drop so the collaborator does not keep holding a window.
    pub fn process_frame(&mut self, hand: Option<&HandPose>, now: Instant) -> FrameOutcome {
        let Some(pose) = hand else {
            let command = self.handle_lost_hand();
            return FrameOutcome {
                phase: self.session.phase(),
                validation: None,
                command,
            };
        };

        // An expired arming window falls back to idle before anything
        // else; an open drag keeps the session alive regardless of it.
        if self.session.is_armed() && !self.session.is_dragging() && self.session.timed_out(now) {
            debug!("Armed session timed out");
            self.session.reset();
        }

        let validation = validate_pose(pose);
        if validation.is_valid() {
            self.session.arm(now);
        } else if !self.session.is_armed() {
            return FrameOutcome {
                phase: SessionPhase::Idle,
                validation: Some(validation),
                command: None,
            };
        }

        let command = self.classify_and_dispatch(pose, now);
        FrameOutcome {
            phase: self.session.phase(),
            validation: Some(validation),
            command,
        }
    }

    fn handle_lost_hand(&mut self) -> Option<WindowCommand> {
        let command = if self.session.is_dragging() {
            debug!("Hand lost while dragging; dropping held window");
            self.dispatch(WindowCommand::Drop);
            Some(WindowCommand::Drop)
        } else {
            None
        };
        self.session.reset();
        command
    }

    fn classify_and_dispatch(&mut self, pose: &HandPose, now: Instant) -> Option<WindowCommand> {
        let command = match classify(pose, self.session.is_dragging()) {
            Some(Gesture::Close) => Some(WindowCommand::Close),
            Some(Gesture::Minimize) => Some(WindowCommand::Minimize),
            Some(Gesture::FullScreen) => Some(WindowCommand::FullScreen),
            Some(Gesture::PickUp) => {
                self.session
                    .begin_drag(pose.point(HandLandmark::IndexTip), now);
                Some(WindowCommand::PickUp)
            }
            Some(Gesture::Drop) => {
                self.session.end_drag(now);
                Some(WindowCommand::Drop)
            }
            None => {
                if self.session.is_dragging() {
                    // Dragging frames keep the arming window fresh
                    self.session.arm(now);
                    Some(WindowCommand::Drag(pose.point(HandLandmark::IndexTip)))
                } else {
                    None
                }
            }
        };

        if let Some(command) = command {
            self.dispatch(command);
        }
        command
    }

    fn dispatch(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::Drag(_) => debug!("Dispatching {command:?}"),
            _ => info!("Dispatching {command:?}"),
        }

        let result = match command {
            WindowCommand::Close => self.window_control.close_frontmost_window(),
            WindowCommand::Minimize => self.window_control.minimize_frontmost_window(),
            WindowCommand::FullScreen => self.window_control.full_screen_frontmost_window(),
            WindowCommand::PickUp => self.window_control.pickup_window(),
            WindowCommand::Drag(target) => self.window_control.drag_window(target),
            WindowCommand::Drop => self.window_control.drop_window(),
        };

        if let Err(e) = result {
            warn!("Window command {command:?} failed: {e}");
        }
    }
}
