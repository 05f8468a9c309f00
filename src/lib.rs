//! Hand gesture recognition library for pinch-driven window management.
//!
//! This library turns streams of hand landmark observations into window
//! commands on X11 desktops:
//! - Hand observations arrive as 21-point landmark frames from an external
//!   detector process
//! - Pose validation rejects frames where the hand is not held upright in a
//!   deliberate control posture
//! - Gesture classification maps thumb-to-fingertip pinches to commands
//! - A debounce session requires a validated pose shortly before any command
//!   is accepted
//!
//! The recognition pipeline consists of:
//! 1. Observation decoding and hand selection by detector confidence
//! 2. Pose validation (finger curl, thumb position, hand orientation)
//! 3. Pinch classification with hysteresis for drag gestures
//! 4. Window command dispatch over the EWMH protocol
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use hand_gesture_control::gestures;
//! use hand_gesture_control::landmarks::{HandPose, Landmark};
//! use hand_gesture_control::validation;
//!
//! let pose = HandPose::new([Landmark::new(0.5, 0.8); 21]);
//!
//! let validation = validation::validate_pose(&pose);
//! if validation.is_valid() {
//!     // Classification only runs for poses held in the control posture
//!     if let Some(gesture) = gestures::classify(&pose, false) {
//!         println!("Recognized gesture: {:?}", gesture);
//!     }
//! }
//! ```
//!
//! ## Driving the Session Controller
//!
//! ```no_run
//! use hand_gesture_control::controller::GestureController;
//! use hand_gesture_control::window_control::LoggingWindowControl;
//! use std::time::{Duration, Instant};
//!
//! // A logging controller stands in for X11 when dry-running
//! let mut controller = GestureController::new(
//!     Box::new(LoggingWindowControl::new()),
//!     Duration::from_secs(1),
//! );
//!
//! // Frames without a hand reset the session
//! let outcome = controller.process_frame(None, Instant::now());
//! assert!(outcome.command.is_none());
//! ```
//!
//! ## Complete Pipeline Example
//!
//! ```no_run
//! use hand_gesture_control::app::{GestureApp, ObservationSource};
//! use hand_gesture_control::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Replay a recorded observation trace against the live window manager
//! let config = Config::default();
//! let source = ObservationSource::File("hands.jsonl".to_string());
//!
//! let mut app = GestureApp::new(config, source)?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Hand landmark indexing and pose containers
pub mod landmarks;

/// Planar geometry helpers for landmark math
pub mod geometry;

/// Pose validation for the upright control posture
pub mod validation;

/// Pinch gesture classification
pub mod gestures;

/// Gesture session state machine with debounce timeout
pub mod session;

/// Per-frame controller wiring validation, classification and dispatch
pub mod controller;

/// Hand observation decoding and selection
pub mod tracker;

/// Window control module for X11 systems
pub mod window_control;

/// Utility functions for coordinate conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
