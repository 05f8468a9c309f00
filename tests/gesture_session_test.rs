//! Integration tests for the gesture session pipeline
//!
//! Drives the controller with synthetic landmark frames and verifies the
//! arming debounce, drag hysteresis and command dispatch end to end. All
//! timing uses explicit frame timestamps, no sleeps.


use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use hand_gesture_control::controller::GestureController;
use hand_gesture_control::error::AppError;
use hand_gesture_control::landmarks::{HandLandmark, HandPose, Landmark};
use hand_gesture_control::session::SessionPhase;
use hand_gesture_control::window_control::{WindowCommand, WindowControl};
use hand_gesture_control::Result;
use test_helpers::{close_pose, control_pose, full_screen_pose, minimize_pose, pickup_pose};

/// Collaborator that records the name of every dispatched command
struct RecordingWindowControl {
    calls: Rc<RefCell<Vec<String>>>,
}

impl RecordingWindowControl {
    fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let control = Self {
            calls: Rc::clone(&calls),
        };
        (control, calls)
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
    }
}

impl WindowControl for RecordingWindowControl {
    fn close_frontmost_window(&mut self) -> Result<()> {
        self.record("close");
        Ok(())
    }

    fn minimize_frontmost_window(&mut self) -> Result<()> {
        self.record("minimize");
        Ok(())
    }

    fn full_screen_frontmost_window(&mut self) -> Result<()> {
        self.record("full_screen");
        Ok(())
    }

    fn pickup_window(&mut self) -> Result<()> {
        self.record("pickup");
        Ok(())
    }

    fn drag_window(&mut self, _target: Landmark) -> Result<()> {
        self.record("drag");
        Ok(())
    }

    fn drop_window(&mut self) -> Result<()> {
        self.record("drop");
        Ok(())
    }
}

/// Collaborator whose every command fails
struct FailingWindowControl;

impl WindowControl for FailingWindowControl {
    fn close_frontmost_window(&mut self) -> Result<()> {
        Err(AppError::WindowControl("injected".to_string()))
    }
    fn minimize_frontmost_window(&mut self) -> Result<()> {
        Err(AppError::WindowControl("injected".to_string()))
    }
    fn full_screen_frontmost_window(&mut self) -> Result<()> {
        Err(AppError::WindowControl("injected".to_string()))
    }
    fn pickup_window(&mut self) -> Result<()> {
        Err(AppError::WindowControl("injected".to_string()))
    }
    fn drag_window(&mut self, _target: Landmark) -> Result<()> {
        Err(AppError::WindowControl("injected".to_string()))
    }
    fn drop_window(&mut self) -> Result<()> {
        Err(AppError::WindowControl("injected".to_string()))
    }
}

fn recording_controller() -> (GestureController, Rc<RefCell<Vec<String>>>) {
    let (control, calls) = RecordingWindowControl::new();
    let controller = GestureController::new(Box::new(control), Duration::from_secs(1));
    (controller, calls)
}

fn with_landmark(mut pose: HandPose, which: HandLandmark, x: f64, y: f64) -> HandPose {
    pose.landmarks[which.index()] = Landmark::new(x, y);
    pose
}

/// Pinch that the pose validator rejects: index finger curled over
fn curled_pickup_pose() -> HandPose {
    let pose = with_landmark(control_pose(), HandLandmark::IndexPip, 0.43, 0.65);
    with_landmark(pose, HandLandmark::IndexTip, 0.34, 0.61)
}

#[test]
fn test_valid_pose_arms_session() {
    let (mut controller, calls) = recording_controller();
    let outcome = controller.process_frame(Some(&control_pose()), Instant::now());

    assert_eq!(outcome.phase, SessionPhase::ArmedIdle);
    assert!(outcome.validation.is_some_and(|v| v.is_valid()));
    assert_eq!(outcome.command, None);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_pickup_drag_drop_lifecycle() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    // Arm with an open hand, pinch, move, release
    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(Some(&pickup_pose()), t0 + Duration::from_millis(30));

    let moved = with_landmark(control_pose(), HandLandmark::IndexTip, 0.33, 0.66);
    let outcome = controller.process_frame(Some(&moved), t0 + Duration::from_millis(60));
    assert_eq!(outcome.phase, SessionPhase::ArmedDragging);

    let released = control_pose();
    let outcome = controller.process_frame(Some(&released), t0 + Duration::from_millis(90));
    assert_eq!(outcome.command, Some(WindowCommand::Drop));
    assert_eq!(outcome.phase, SessionPhase::ArmedIdle);

    assert_eq!(*calls.borrow(), vec!["pickup", "drag", "drop"]);
}

#[test]
fn test_drag_survives_hysteresis_band() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(Some(&pickup_pose()), t0 + Duration::from_millis(30));

    // Thumb to index distance 0.071: past the trigger threshold but short
    // of the release threshold, so the drag must continue
    let widened = with_landmark(control_pose(), HandLandmark::IndexTip, 0.36, 0.64);
    let outcome = controller.process_frame(Some(&widened), t0 + Duration::from_millis(60));

    assert_eq!(outcome.phase, SessionPhase::ArmedDragging);
    assert_eq!(
        outcome.command,
        Some(WindowCommand::Drag(Landmark::new(0.36, 0.64)))
    );
    assert!(!calls.borrow().contains(&"drop".to_string()));
}

#[test]
fn test_release_beyond_threshold_drops() {
    let (mut controller, _calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(Some(&pickup_pose()), t0 + Duration::from_millis(30));

    // Thumb to index distance 0.127, beyond the release threshold
    let opened = with_landmark(control_pose(), HandLandmark::IndexTip, 0.40, 0.68);
    let outcome = controller.process_frame(Some(&opened), t0 + Duration::from_millis(60));

    assert_eq!(outcome.command, Some(WindowCommand::Drop));
    assert_eq!(outcome.phase, SessionPhase::ArmedIdle);
}

#[test]
fn test_failed_dispatch_still_follows_gesture_intent() {
    let mut controller =
        GestureController::new(Box::new(FailingWindowControl), Duration::from_secs(1));
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);

    // Pick-up dispatch fails, drag opens anyway
    let outcome = controller.process_frame(Some(&pickup_pose()), t0 + Duration::from_millis(30));
    assert_eq!(outcome.command, Some(WindowCommand::PickUp));
    assert_eq!(outcome.phase, SessionPhase::ArmedDragging);

    // Drop dispatch fails, drag ends anyway
    let outcome =
        controller.process_frame(Some(&control_pose()), t0 + Duration::from_millis(60));
    assert_eq!(outcome.command, Some(WindowCommand::Drop));
    assert_eq!(outcome.phase, SessionPhase::ArmedIdle);
}

#[test]
fn test_command_requires_recent_validation() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);

    // Past the arming window, and the pinch itself fails validation
    let outcome =
        controller.process_frame(Some(&curled_pickup_pose()), t0 + Duration::from_millis(1001));

    assert_eq!(outcome.phase, SessionPhase::Idle);
    assert_eq!(outcome.command, None);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_command_within_window_dispatches() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);

    // Same invalid pinch, but still inside the arming window
    let outcome =
        controller.process_frame(Some(&curled_pickup_pose()), t0 + Duration::from_millis(900));

    assert_eq!(outcome.command, Some(WindowCommand::PickUp));
    assert_eq!(*calls.borrow(), vec!["pickup"]);
}

#[test]
fn test_exact_timeout_boundary_still_armed() {
    let (mut controller, _calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    let outcome =
        controller.process_frame(Some(&curled_pickup_pose()), t0 + Duration::from_millis(1000));

    // The window closes strictly after the timeout, not at it
    assert_eq!(outcome.command, Some(WindowCommand::PickUp));
}

#[test]
fn test_armed_frame_classifies_despite_invalid_pose() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);

    // The middle finger pinch bends the finger and fails validation, yet
    // the armed session still turns it into a command
    let outcome =
        controller.process_frame(Some(&full_screen_pose()), t0 + Duration::from_millis(50));

    assert!(outcome.validation.is_some_and(|v| !v.is_valid()));
    assert_eq!(outcome.command, Some(WindowCommand::FullScreen));
    assert_eq!(*calls.borrow(), vec!["full_screen"]);
}

#[test]
fn test_minimize_pinch_dispatches_when_armed() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    let outcome =
        controller.process_frame(Some(&minimize_pose()), t0 + Duration::from_millis(40));

    assert_eq!(outcome.command, Some(WindowCommand::Minimize));
    assert_eq!(outcome.phase, SessionPhase::ArmedIdle);
    assert_eq!(*calls.borrow(), vec!["minimize"]);
}

#[test]
fn test_held_pinch_redispatches_every_frame() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);

    let close = close_pose();
    controller.process_frame(Some(&close), t0 + Duration::from_millis(30));
    let outcome = controller.process_frame(Some(&close), t0 + Duration::from_millis(60));

    // One discrete command per frame while the pinch is held, no drag opened
    assert_eq!(outcome.phase, SessionPhase::ArmedIdle);
    assert_eq!(*calls.borrow(), vec!["close", "close"]);
}

#[test]
fn test_drag_outlives_arming_timeout() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(Some(&pickup_pose()), t0 + Duration::from_millis(30));

    // Well past the arming window, on a frame that also fails validation:
    // an open drag keeps the session alive and keeps streaming moves
    let outcome =
        controller.process_frame(Some(&curled_pickup_pose()), t0 + Duration::from_millis(2000));
    assert_eq!(outcome.phase, SessionPhase::ArmedDragging);
    assert_eq!(
        outcome.command,
        Some(WindowCommand::Drag(Landmark::new(0.34, 0.61)))
    );

    // The released hand still drops normally afterwards
    let outcome =
        controller.process_frame(Some(&control_pose()), t0 + Duration::from_millis(2030));
    assert_eq!(outcome.command, Some(WindowCommand::Drop));
    assert_eq!(*calls.borrow(), vec!["pickup", "drag", "drop"]);
}

#[test]
fn test_valid_frames_refresh_arming_window() {
    let (mut controller, _calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(Some(&control_pose()), t0 + Duration::from_millis(800));

    // 1.7s after the first valid frame but only 0.9s after the latest one
    let outcome =
        controller.process_frame(Some(&curled_pickup_pose()), t0 + Duration::from_millis(1700));

    assert_eq!(outcome.command, Some(WindowCommand::PickUp));
}

#[test]
fn test_no_hand_between_frames_disarms() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(None, t0 + Duration::from_millis(30));

    // The session must re-arm from scratch, so the pinch is ignored
    let outcome =
        controller.process_frame(Some(&curled_pickup_pose()), t0 + Duration::from_millis(60));

    assert_eq!(outcome.phase, SessionPhase::Idle);
    assert_eq!(outcome.command, None);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_hand_lost_during_drag_forces_drop() {
    let (mut controller, calls) = recording_controller();
    let t0 = Instant::now();

    controller.process_frame(Some(&control_pose()), t0);
    controller.process_frame(Some(&pickup_pose()), t0 + Duration::from_millis(30));
    assert_eq!(controller.phase(), SessionPhase::ArmedDragging);

    let outcome = controller.process_frame(None, t0 + Duration::from_millis(60));
    assert_eq!(outcome.command, Some(WindowCommand::Drop));
    assert_eq!(outcome.phase, SessionPhase::Idle);
    assert_eq!(outcome.validation, None);
    assert_eq!(*calls.borrow(), vec!["pickup", "drop"]);
}
