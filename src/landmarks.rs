//! Hand landmark data model.
//!
//! Represents a detected hand as the 21-point skeleton produced by the
//! MediaPipe hand landmarker convention: one wrist point plus four joints
//! per digit, in normalized image coordinates.

use serde::Deserialize;

use crate::constants::NUM_HAND_LANDMARKS;
use crate::error::{Error, Result};

/// A single hand landmark in normalized image coordinates.
///
/// `x` grows rightward and `y` grows downward, both in `[0.0, 1.0]`
/// relative to the image frame. Points may fall slightly outside the unit
/// square when the hand is partially out of frame. Deserializes directly
/// from the detector's wire records; extra fields such as a depth
/// coordinate are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f64,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f64,
}

impl Landmark {
    /// Create a landmark from normalized coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Named indices into the 21-point hand skeleton.
///
/// Ordering follows the MediaPipe hand landmark model convention:
/// <https://google.github.io/mediapipe/solutions/hands.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// All landmarks in skeleton order
    pub const ALL: [Self; NUM_HAND_LANDMARKS] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexMcp,
        Self::IndexPip,
        Self::IndexDip,
        Self::IndexTip,
        Self::MiddleMcp,
        Self::MiddlePip,
        Self::MiddleDip,
        Self::MiddleTip,
        Self::RingMcp,
        Self::RingPip,
        Self::RingDip,
        Self::RingTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    /// Position of this landmark in the skeleton array
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Wrist => 0,
            Self::ThumbCmc => 1,
            Self::ThumbMcp => 2,
            Self::ThumbIp => 3,
            Self::ThumbTip => 4,
            Self::IndexMcp => 5,
            Self::IndexPip => 6,
            Self::IndexDip => 7,
            Self::IndexTip => 8,
            Self::MiddleMcp => 9,
            Self::MiddlePip => 10,
            Self::MiddleDip => 11,
            Self::MiddleTip => 12,
            Self::RingMcp => 13,
            Self::RingPip => 14,
            Self::RingDip => 15,
            Self::RingTip => 16,
            Self::PinkyMcp => 17,
            Self::PinkyPip => 18,
            Self::PinkyDip => 19,
            Self::PinkyTip => 20,
        }
    }
}

/// A full hand skeleton: all 21 landmarks of one detected hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    /// All 21 hand landmarks in MediaPipe order
    pub landmarks: [Landmark; NUM_HAND_LANDMARKS],
}

impl HandPose {
    /// Create a pose from a complete landmark array
    #[must_use]
    pub const fn new(landmarks: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    /// Create a pose from a landmark slice, validating its length
    pub fn from_slice(points: &[Landmark]) -> Result<Self> {
        if points.len() != NUM_HAND_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {}",
                points.len()
            )));
        }

        let mut landmarks = [Landmark::default(); NUM_HAND_LANDMARKS];
        landmarks.copy_from_slice(points);
        Ok(Self { landmarks })
    }

    /// Get a landmark by its skeleton name
    #[must_use]
    pub fn point(&self, which: HandLandmark) -> Landmark {
        self.landmarks[which.index()]
    }

    /// Mirror the pose across the image axes.
    ///
    /// Reflects every landmark within the normalized unit square
    /// (`x' = 1 - x`, `y' = 1 - y`). Used to un-mirror observations from
    /// trackers that run on a flipped camera image.
    #[must_use]
    pub fn mirrored(mut self, invert_x: bool, invert_y: bool) -> Self {
        for landmark in &mut self.landmarks {
            if invert_x {
                landmark.x = 1.0 - landmark.x;
            }
            if invert_y {
                landmark.y = 1.0 - landmark.y;
            }
        }
        self
    }
}
