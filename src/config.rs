//! Configuration management for the hand gesture control application

use crate::constants::{
    ARMED_TIMEOUT_SECS, DEFAULT_DETECTION_CONFIDENCE, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_TRACKING_CONFIDENCE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hand tracker configuration
    pub tracker: TrackerConfig,

    /// Session configuration
    pub session: SessionConfig,

    /// Window control configuration
    pub control: ControlConfig,
}

/// Hand tracker parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum confidence for an initial hand detection (0.0-1.0)
    pub detection_confidence: f64,

    /// Minimum confidence for tracking an already-detected hand (0.0-1.0)
    pub tracking_confidence: f64,

    /// Mirror observations horizontally (for trackers fed an unflipped camera)
    pub invert_x: bool,

    /// Mirror observations vertically
    pub invert_y: bool,
}

/// Session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds an armed session survives without a fresh valid pose
    pub armed_timeout_secs: f64,

    /// Milliseconds to wait between observation polls
    pub poll_interval_ms: u64,
}

/// Window control parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Log window commands instead of executing them
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            session: SessionConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
            invert_x: false,
            invert_y: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            armed_timeout_secs: ARMED_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { dry_run: false }
    }
}

impl SessionConfig {
    /// Arming timeout as a duration
    #[must_use]
    pub fn armed_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.armed_timeout_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(ARMED_TIMEOUT_SECS))
    }

    /// Poll interval as a duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tracker.detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tracker.tracking_confidence) {
            return Err(Error::ConfigError(
                "Tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        if !self.session.armed_timeout_secs.is_finite() || self.session.armed_timeout_secs <= 0.0 {
            return Err(Error::ConfigError(
                "Armed timeout must be a positive number of seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Control Configuration

# Hand tracker parameters
tracker:
  detection_confidence: 0.9
  tracking_confidence: 0.5
  invert_x: false
  invert_y: false

# Session parameters
session:
  armed_timeout_secs: 1.0
  poll_interval_ms: 10

# Window control
control:
  dry_run: false
"#;
