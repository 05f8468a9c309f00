//! Gesture classification from a validated hand pose.
//!
//! All gestures are thumb-to-fingertip pinches, told apart by which
//! fingertip the thumb touches. Classification runs a fixed priority
//! cascade and stops at the first match, so a pose satisfying several
//! thresholds at once yields exactly one gesture.

use log::debug;

use crate::constants::{PINCH_RELEASE_DISTANCE, PINCH_TRIGGER_DISTANCE};
use crate::geometry::distance;
use crate::landmarks::{HandLandmark, HandPose};

/// A recognized gesture, one per frame at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Thumb touching the pinky fingertip
    Close,
    /// Thumb touching the ring fingertip
    Minimize,
    /// Thumb touching the middle fingertip
    FullScreen,
    /// Thumb touching the index fingertip while no drag is open
    PickUp,
    /// Thumb released from the index fingertip while dragging
    Drop,
}

/// Classify the pose into at most one gesture.
///
/// Priority order: Close, Minimize, FullScreen, then PickUp or Drop
/// depending on `dragging`. PickUp triggers below
/// [`PINCH_TRIGGER_DISTANCE`] but Drop requires the thumb-index
/// separation to exceed the larger [`PINCH_RELEASE_DISTANCE`]; the gap
/// between the two keeps a slightly loosened pinch from oscillating
/// between pick-up and drop.
#[must_use]
pub fn classify(pose: &HandPose, dragging: bool) -> Option<Gesture> {
    let thumb_tip = pose.point(HandLandmark::ThumbTip);

    let thumb_pinky = distance(thumb_tip, pose.point(HandLandmark::PinkyTip));
    debug!("Distance between thumb and pinky: {thumb_pinky:.4}");
    if thumb_pinky < PINCH_TRIGGER_DISTANCE {
        debug!("Close window gesture detected");
        return Some(Gesture::Close);
    }

    let thumb_ring = distance(thumb_tip, pose.point(HandLandmark::RingTip));
    debug!("Distance between thumb and ring: {thumb_ring:.4}");
    if thumb_ring < PINCH_TRIGGER_DISTANCE {
        debug!("Minimize window gesture detected");
        return Some(Gesture::Minimize);
    }

    let thumb_middle = distance(thumb_tip, pose.point(HandLandmark::MiddleTip));
    debug!("Distance between thumb and middle: {thumb_middle:.4}");
    if thumb_middle < PINCH_TRIGGER_DISTANCE {
        debug!("Full screen gesture detected");
        return Some(Gesture::FullScreen);
    }

    let thumb_index = distance(thumb_tip, pose.point(HandLandmark::IndexTip));
    debug!("Distance between thumb and index: {thumb_index:.4}");
    if !dragging && thumb_index < PINCH_TRIGGER_DISTANCE {
        debug!("Pick up gesture detected");
        return Some(Gesture::PickUp);
    }
    if dragging && thumb_index > PINCH_RELEASE_DISTANCE {
        debug!("Drop gesture detected");
        return Some(Gesture::Drop);
    }

    None
}
