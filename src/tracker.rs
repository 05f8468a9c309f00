//! Hand observation stream.
//!
//! Hand detection runs out of process (a MediaPipe-style hand landmarker
//! publishing one JSON record per frame); this module consumes that
//! stream and turns records into typed observations. Each line looks
//! like:
//!
//! ```json
//! {"hands":[{"handedness":"Right","score":0.97,"landmarks":[{"x":0.5,"y":0.8},...]}]}
//! ```
//!
//! with exactly 21 landmarks per hand. Extra fields (such as a depth
//! coordinate) are ignored. The same reader handles a live pipe on stdin
//! and a recorded trace file.

use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader, StdinLock};
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::config::TrackerConfig;
use crate::constants::NUM_HAND_LANDMARKS;
use crate::error::{Error, Result};
use crate::landmarks::{HandPose, Landmark};

/// Which hand the detector saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// The detector's label for this hand
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// One detected hand with its detection confidence
#[derive(Debug, Clone)]
pub struct TrackedHand {
    /// The full 21-point skeleton
    pub pose: HandPose,
    /// Detection confidence (0.0 to 1.0)
    pub confidence: f64,
    /// Handedness as reported by the detector
    pub handedness: Handedness,
}

/// Everything the detector saw in one frame
#[derive(Debug, Clone, Default)]
pub struct FrameObservation {
    /// All structurally valid hands in the frame
    pub hands: Vec<TrackedHand>,
}

/// Source of per-frame hand observations.
pub trait HandTracker {
    /// Next frame's observation; `Ok(None)` when the stream ends
    fn next_observation(&mut self) -> Result<Option<FrameObservation>>;
}

/// Pick the highest-confidence hand meeting the threshold
#[must_use]
pub fn select_primary_hand(
    observation: &FrameObservation,
    min_confidence: f64,
) -> Option<&TrackedHand> {
    observation
        .hands
        .iter()
        .filter(|hand| hand.confidence >= min_confidence)
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(Ordering::Equal)
        })
}

/// Applies the detection/tracking confidence policy across frames.
///
/// A hand must first clear the stricter detection threshold; once one is
/// being followed, the looser tracking threshold keeps it. Losing the
/// hand for a frame reverts to the detection threshold.
#[derive(Debug)]
pub struct HandSelector {
    config: TrackerConfig,
    tracking: bool,
}

impl HandSelector {
    /// Create a selector with the given thresholds
    #[must_use]
    pub const fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            tracking: false,
        }
    }

    /// Pick the hand to use this frame, if any
    pub fn select<'a>(&mut self, observation: &'a FrameObservation) -> Option<&'a TrackedHand> {
        let threshold = if self.tracking {
            self.config.tracking_confidence
        } else {
            self.config.detection_confidence
        };

        let selected = select_primary_hand(observation, threshold);
        match (self.tracking, selected) {
            (false, Some(hand)) => debug!(
                "Following {} hand at confidence {:.2}",
                hand.handedness.as_str(),
                hand.confidence
            ),
            (true, None) => debug!("Lost the followed hand"),
            _ => {}
        }
        self.tracking = selected.is_some();
        selected
    }
}

/// JSON structures for parsing the detector's records
#[derive(Deserialize, Debug)]
struct HandRecord {
    handedness: Handedness,
    score: f64,
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize, Debug)]
struct FrameRecord {
    hands: Vec<HandRecord>,
    #[serde(default)]
    error: Option<String>,
}

/// Hand tracker reading JSON-lines observation records.
pub struct JsonlTracker<R> {
    reader: R,
    line: String,
}

impl JsonlTracker<BufReader<File>> {
    /// Read observations from a recorded trace file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonlTracker<StdinLock<'static>> {
    /// Read observations from the detector process piped to stdin
    #[must_use]
    pub fn from_stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> JsonlTracker<R> {
    /// Wrap any buffered reader producing observation records
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> HandTracker for JsonlTracker<R> {
    fn next_observation(&mut self) -> Result<Option<FrameObservation>> {
        loop {
            self.line.clear();
            let bytes = self.reader.read_line(&mut self.line)?;
            if bytes == 0 {
                return Ok(None);
            }

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: FrameRecord = serde_json::from_str(trimmed)
                .map_err(|e| Error::Tracker(format!("Malformed observation record: {e}")))?;

            if let Some(message) = record.error {
                warn!("Hand tracker reported: {message}");
                return Ok(Some(FrameObservation::default()));
            }

            let mut hands = Vec::with_capacity(record.hands.len());
            for hand in record.hands {
                if hand.landmarks.len() != NUM_HAND_LANDMARKS {
                    warn!(
                        "Expected {NUM_HAND_LANDMARKS} landmarks, got {}",
                        hand.landmarks.len()
                    );
                    continue;
                }

                hands.push(TrackedHand {
                    pose: HandPose::from_slice(&hand.landmarks)?,
                    confidence: hand.score,
                    handedness: hand.handedness,
                });
            }

            debug!("Observed {} hand(s)", hands.len());
            return Ok(Some(FrameObservation { hands }));
        }
    }
}
