//! Constants used throughout the application

/// Number of hand landmarks in a full skeleton
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Pinch distance below which a thumb-to-fingertip gesture triggers
pub const PINCH_TRIGGER_DISTANCE: f64 = 0.05;

/// Thumb-to-index separation above which a held window is dropped
pub const PINCH_RELEASE_DISTANCE: f64 = 0.10;

/// Armed session expires after this long without a fresh valid pose
pub const ARMED_TIMEOUT_SECS: f64 = 1.0;

/// Middle finger straightness bounds (degrees at the DIP joint)
pub const FINGER_STRAIGHT_MIN_DEG: f64 = 150.0;
pub const FINGER_STRAIGHT_MAX_DEG: f64 = 180.0;

/// Thumb straightness bounds (degrees at the MCP joint)
pub const THUMB_STRAIGHT_MIN_DEG: f64 = 160.0;
pub const THUMB_STRAIGHT_MAX_DEG: f64 = 180.0;

/// Default minimum confidence for an initial hand detection
pub const DEFAULT_DETECTION_CONFIDENCE: f64 = 0.9;

/// Default minimum confidence for tracking an already-detected hand
pub const DEFAULT_TRACKING_CONFIDENCE: f64 = 0.5;

/// Pause between polling the observation stream when no frame is ready
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// Pause after activating a window before issuing further commands
pub const PICKUP_SETTLE_MS: u64 = 100;

/// Vertical inset from the fingertip to the dragged window's top edge
pub const DRAG_TITLEBAR_INSET_PX: i32 = 16;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
