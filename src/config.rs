//! Configuration management for the gesture classifier.
//!
//! Every tuning constant of the pipeline is a field here. The defaults are the
//! empirically chosen values; deployments can recalibrate them from YAML.

use crate::{
    classifier::GestureClassifier,
    clock::{Clock, SystemClock},
    constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MIN_GESTURE_INTERVAL_MS, DEFAULT_MOVING_AVERAGE_WINDOW},
    filters::PositionFilter,
    motion::MotionSettings,
    pose::PoseThresholds,
    Error, Result,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pose predicate thresholds
    pub pose: PoseThresholds,

    /// Motion history and velocity detector parameters
    pub motion: MotionSettings,

    /// Label debounce
    pub debounce: DebounceConfig,

    /// Position output
    pub output: OutputConfig,
}

/// Label debounce configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Minimum time between two published label changes
    pub min_gesture_interval_ms: u64,
}

/// Palm position output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Mirror x so the cursor follows the hand on a mirrored camera feed
    pub mirror_x: bool,

    /// Position filter type (none, moving_average, exponential)
    pub position_filter: String,

    /// Moving average window size
    pub moving_average_window: usize,

    /// Exponential filter alpha value
    pub exponential_alpha: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            min_gesture_interval_ms: DEFAULT_MIN_GESTURE_INTERVAL_MS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mirror_x: true,
            position_filter: "none".to_string(),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            exponential_alpha: DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        info!("Loaded gesture configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the position filter named in the output section
    ///
    /// # Errors
    ///
    /// Returns `Error::FilterError` for unknown names or invalid parameters.
    pub fn create_filter(&self) -> Result<Box<dyn PositionFilter>> {
        use crate::filters::{create_filter, exponential::ExponentialFilter, moving_average::MovingAverageFilter};

        match self.output.position_filter.as_str() {
            "moving_average" => Ok(Box::new(MovingAverageFilter::new(self.output.moving_average_window)?)),
            "exponential" => Ok(Box::new(ExponentialFilter::new(self.output.exponential_alpha)?)),
            name => create_filter(name),
        }
    }

    /// Build a classifier running on the system clock
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn classifier(&self) -> Result<GestureClassifier<SystemClock>> {
        GestureClassifier::from_config(self)
    }

    /// Build a classifier running on `clock`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn classifier_with_clock<C: Clock>(&self, clock: C) -> Result<GestureClassifier<C>> {
        GestureClassifier::from_config_with_clock(self, clock)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("pose.extension_margin", self.pose.extension_margin),
            ("pose.pinch_threshold", self.pose.pinch_threshold),
            ("pose.thumb_extension_distance", self.pose.thumb_extension_distance),
            ("pose.thumbs_up_offset", self.pose.thumbs_up_offset),
            ("motion.swipe_threshold", self.motion.swipe_threshold),
            ("motion.pointing_nav_threshold", self.motion.pointing_nav_threshold),
            ("motion.thumb_nav_threshold", self.motion.thumb_nav_threshold),
            ("motion.thumbs_nav_threshold", self.motion.thumbs_nav_threshold),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::ConfigError(format!("{name} must be a positive number, got {value}")));
            }
        }

        if self.motion.velocity_window < 2 {
            return Err(Error::ConfigError(
                "Velocity window must hold at least 2 samples".to_string(),
            ));
        }
        if self.motion.history_capacity < self.motion.velocity_window {
            return Err(Error::ConfigError(format!(
                "History capacity ({}) must be at least the velocity window ({})",
                self.motion.history_capacity, self.motion.velocity_window
            )));
        }

        // Surfaces unknown filter names and bad filter parameters
        self.create_filter()
            .map_err(|e| Error::ConfigError(format!("Invalid position filter: {e}")))?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Classifier Configuration

# Pose thresholds (normalized image units)
pose:
  extension_margin: 0.02
  pinch_threshold: 0.08
  thumb_extension_distance: 0.1
  thumbs_up_offset: 0.05

# Motion detection (velocities in normalized units per second)
motion:
  history_capacity: 10
  velocity_window: 5
  swipe_threshold: 1.5
  pointing_nav_threshold: 1.5
  thumb_nav_threshold: 1.5
  thumbs_nav_threshold: 2.0
  nav_cooldown_ms: 500

# Label debounce
debounce:
  min_gesture_interval_ms: 200

# Palm position output
output:
  mirror_x: true
  position_filter: "none"
  moving_average_window: 5
  exponential_alpha: 0.5
"#;
