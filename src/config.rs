//! Configuration management for the gesture controller

use crate::constants::{
    DEFAULT_CURL_RATIO, DEFAULT_EXTEND_RATIO, DEFAULT_FALLBACK_PALM_SIZE, DEFAULT_MODE_MIN_SCORE,
    DEFAULT_PINCH_COOLDOWN_MS, DEFAULT_PINCH_THRESHOLD, DEFAULT_TARGET_FPS, DEFAULT_TWO_FINGER_MIN_SCORE,
    LABEL_CLOSED_FIST, LABEL_OPEN_PALM, LABEL_PEACE, LABEL_VICTORY, MAX_TARGET_FPS,
};
use crate::debouncer::AppMode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landmark geometry thresholds
    pub geometry: GeometryConfig,

    /// Per-frame classification thresholds
    pub classifier: ClassifierConfig,

    /// Debouncing parameters
    pub debounce: DebounceConfig,

    /// Capture loop scheduling
    pub capture: CaptureConfig,

    /// Track one-finger and two-finger gestures
    pub track_fingers: bool,
}

/// Palm-relative thresholds for finger pose analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Minimum joint-to-joint rise, as a fraction of palm size, for an extended finger
    pub extend_ratio: f32,

    /// Minimum tip rise, as a fraction of palm size, before a finger stops counting as curled
    pub curl_ratio: f32,

    /// Palm size used when the wrist-to-knuckle distance is degenerate
    pub fallback_palm_size: f32,
}

/// Thresholds for combining geometry with the model's categorical output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Thumb-to-index distance below which the hand is pinching
    pub pinch_threshold: f32,

    /// Labels accepted as a two-finger gesture regardless of geometry
    pub two_finger_labels: Vec<String>,

    /// Score a two-finger label must exceed
    pub two_finger_min_score: f32,

    /// Score a label must exceed to switch the discrete mode
    pub mode_min_score: f32,

    /// Label that switches to the tree shape
    pub closed_fist_label: String,

    /// Label that scatters the tree
    pub open_palm_label: String,
}

/// Debounce parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Minimum interval between pinch events
    pub pinch_cooldown_ms: u64,

    /// Mode the application starts in
    pub initial_mode: AppMode,
}

/// Capture loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Target cycle rate
    pub target_fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            classifier: ClassifierConfig::default(),
            debounce: DebounceConfig::default(),
            capture: CaptureConfig::default(),
            track_fingers: true,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            extend_ratio: DEFAULT_EXTEND_RATIO,
            curl_ratio: DEFAULT_CURL_RATIO,
            fallback_palm_size: DEFAULT_FALLBACK_PALM_SIZE,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            two_finger_labels: vec![LABEL_VICTORY.to_string(), LABEL_PEACE.to_string()],
            two_finger_min_score: DEFAULT_TWO_FINGER_MIN_SCORE,
            mode_min_score: DEFAULT_MODE_MIN_SCORE,
            closed_fist_label: LABEL_CLOSED_FIST.to_string(),
            open_palm_label: LABEL_OPEN_PALM.to_string(),
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            pinch_cooldown_ms: DEFAULT_PINCH_COOLDOWN_MS,
            initial_mode: AppMode::Scattered,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl CaptureConfig {
    /// Scheduling period between two capture cycles
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let geometry = &self.geometry;
        if !(geometry.extend_ratio > 0.0 && geometry.extend_ratio < 1.0) {
            return Err(Error::ConfigError(
                "Extend ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(geometry.curl_ratio >= 0.0 && geometry.curl_ratio <= geometry.extend_ratio) {
            return Err(Error::ConfigError(
                "Curl ratio must be between 0.0 and the extend ratio".to_string(),
            ));
        }
        if !(geometry.fallback_palm_size > 0.0 && geometry.fallback_palm_size.is_finite()) {
            return Err(Error::ConfigError(
                "Fallback palm size must be a positive number".to_string(),
            ));
        }

        let classifier = &self.classifier;
        if !(classifier.pinch_threshold > 0.0 && classifier.pinch_threshold.is_finite()) {
            return Err(Error::ConfigError(
                "Pinch threshold must be a positive number".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&classifier.two_finger_min_score) {
            return Err(Error::ConfigError(
                "Two-finger score threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&classifier.mode_min_score) {
            return Err(Error::ConfigError(
                "Mode score threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if classifier.closed_fist_label.is_empty() || classifier.open_palm_label.is_empty() {
            return Err(Error::ConfigError("Mode labels must not be empty".to_string()));
        }
        if classifier.closed_fist_label == classifier.open_palm_label {
            return Err(Error::ConfigError(
                "Closed fist and open palm labels must differ".to_string(),
            ));
        }

        if self.capture.target_fps == 0 || self.capture.target_fps > MAX_TARGET_FPS {
            return Err(Error::ConfigError(format!(
                "Target FPS must be between 1 and {}",
                MAX_TARGET_FPS
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Control Configuration

# Palm-relative finger pose thresholds
geometry:
  extend_ratio: 0.08
  curl_ratio: 0.02
  fallback_palm_size: 0.2

# Per-frame classification
classifier:
  pinch_threshold: 0.05
  two_finger_labels: ["Victory", "Peace"]
  two_finger_min_score: 0.4
  mode_min_score: 0.6
  closed_fist_label: "Closed_Fist"
  open_palm_label: "Open_Palm"

# Debouncing
debounce:
  pinch_cooldown_ms: 2000
  initial_mode: SCATTERED

# Capture loop
capture:
  target_fps: 60

# One-finger and two-finger tracking
track_fingers: true
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_yaml("debounce:\n  initial_mode: TREE_SHAPE\n").unwrap();
        assert_eq!(parsed.debounce.initial_mode, AppMode::TreeShape);
        assert_eq!(parsed.debounce.pinch_cooldown_ms, 2000);
        assert!(parsed.track_fingers);
    }

    #[test]
    fn test_malformed_initial_mode_is_rejected() {
        let result = Config::from_yaml("debounce:\n  initial_mode: SIDEWAYS\n");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.geometry.curl_ratio = 0.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.capture.target_fps = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.mode_min_score = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.pinch_threshold = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frame_interval() {
        let capture = CaptureConfig { target_fps: 50 };
        assert_eq!(capture.frame_interval(), Duration::from_millis(20));
    }
}
