//! Control-pose validation.
//!
//! Three geometric checks gate gesture classification: fingers extended
//! upward, thumb tip kept at or below the other fingertips, and the hand
//! upright with a straight middle finger and thumb. A pose must pass all
//! three before the session arms.

use log::debug;

use crate::constants::{
    FINGER_STRAIGHT_MAX_DEG, FINGER_STRAIGHT_MIN_DEG, THUMB_STRAIGHT_MAX_DEG,
    THUMB_STRAIGHT_MIN_DEG,
};
use crate::geometry::angle_between;
use crate::landmarks::{HandLandmark, HandPose};

/// PIP/MCP joint pairs for the four non-thumb fingers
const FINGER_JOINTS: [(&str, HandLandmark, HandLandmark); 4] = [
    ("index", HandLandmark::IndexPip, HandLandmark::IndexMcp),
    ("middle", HandLandmark::MiddlePip, HandLandmark::MiddleMcp),
    ("ring", HandLandmark::RingPip, HandLandmark::RingMcp),
    ("pinky", HandLandmark::PinkyPip, HandLandmark::PinkyMcp),
];

/// Outcome of the three control-pose checks.
///
/// Checks are evaluated in declaration order and short-circuit: once one
/// fails, the remaining checks are reported as `false` without being
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseValidation {
    /// All four non-thumb fingers extended upward (PIP above MCP)
    pub curl_ok: bool,
    /// Thumb tip at or below the pinky, ring and middle fingertips
    pub thumb_ok: bool,
    /// Hand upright with straight middle finger and thumb
    pub angle_ok: bool,
}

impl PoseValidation {
    /// True when the pose passed every check
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.curl_ok && self.thumb_ok && self.angle_ok
    }
}

/// Run all three control-pose checks on a single pose
#[must_use]
pub fn validate_pose(pose: &HandPose) -> PoseValidation {
    let curl_ok = pips_above_mcps(pose);
    let thumb_ok = curl_ok && thumb_below_fingertips(pose);
    let angle_ok = thumb_ok && hand_upright(pose);

    if curl_ok && thumb_ok && angle_ok {
        debug!("Valid hand position");
    }

    PoseValidation {
        curl_ok,
        thumb_ok,
        angle_ok,
    }
}

/// Check that every non-thumb finger is extended upward.
///
/// In image coordinates y grows downward, so an extended finger has its
/// PIP joint strictly above (smaller y than) its MCP joint. Any single
/// finger failing invalidates the pose.
#[must_use]
pub fn pips_above_mcps(pose: &HandPose) -> bool {
    for (name, pip, mcp) in FINGER_JOINTS {
        if pose.point(pip).y >= pose.point(mcp).y {
            debug!("PIP check failed for {name} finger");
            return false;
        }
    }
    true
}

/// Check that the thumb tip sits at or below the other fingertips.
///
/// The thumb acts as the gesture trigger; a thumb raised above the pinky,
/// ring or middle fingertip belongs to an unrelated hand shape.
#[must_use]
pub fn thumb_below_fingertips(pose: &HandPose) -> bool {
    let thumb_tip = pose.point(HandLandmark::ThumbTip);
    let below_all = thumb_tip.y >= pose.point(HandLandmark::PinkyTip).y
        && thumb_tip.y >= pose.point(HandLandmark::RingTip).y
        && thumb_tip.y >= pose.point(HandLandmark::MiddleTip).y;

    if !below_all {
        debug!("Thumb is not below all other fingertips. Ignoring gestures");
    }
    below_all
}

/// Check that the hand is upright with a straight middle finger and thumb.
///
/// Four sub-conditions, all required: wrist below the middle fingertip,
/// middle finger substantially straight (angle at the DIP joint between
/// the PIP and TIP in [150, 180] degrees), thumb substantially straight
/// (angle at the MCP joint between the CMC and IP in [160, 180] degrees),
/// and the middle finger chain tip, DIP, PIP, wrist strictly descending
/// up the image. A degenerate angle (coincident landmarks) counts as a
/// failed check rather than an error.
#[must_use]
pub fn hand_upright(pose: &HandPose) -> bool {
    let wrist = pose.point(HandLandmark::Wrist);
    let middle_tip = pose.point(HandLandmark::MiddleTip);
    let middle_dip = pose.point(HandLandmark::MiddleDip);
    let middle_pip = pose.point(HandLandmark::MiddlePip);

    if wrist.y < middle_tip.y {
        debug!("Orientation check failed: wrist above middle fingertip");
        return false;
    }

    let finger_angle = match angle_between(middle_pip, middle_dip, middle_tip) {
        Ok(angle) => angle,
        Err(e) => {
            debug!("Orientation check failed: {e}");
            return false;
        }
    };
    if !(FINGER_STRAIGHT_MIN_DEG..=FINGER_STRAIGHT_MAX_DEG).contains(&finger_angle) {
        debug!("Orientation check failed: middle finger angle {finger_angle:.1} degrees");
        return false;
    }

    let thumb_angle = match angle_between(
        pose.point(HandLandmark::ThumbCmc),
        pose.point(HandLandmark::ThumbMcp),
        pose.point(HandLandmark::ThumbIp),
    ) {
        Ok(angle) => angle,
        Err(e) => {
            debug!("Orientation check failed: {e}");
            return false;
        }
    };
    if !(THUMB_STRAIGHT_MIN_DEG..=THUMB_STRAIGHT_MAX_DEG).contains(&thumb_angle) {
        debug!("Orientation check failed: thumb angle {thumb_angle:.1} degrees");
        return false;
    }

    let ascending = middle_tip.y < middle_dip.y
        && middle_dip.y < middle_pip.y
        && middle_pip.y < wrist.y;
    if !ascending {
        debug!("Orientation check failed: middle finger chain not vertical");
        return false;
    }

    true
}
