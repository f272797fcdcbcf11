//! Error types for the hand gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Per-frame inference call failed (recovered by the capture loop)
    #[error("Inference error: {0}")]
    Inference(String),

    /// Camera could not be acquired
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    /// Hand-landmark model could not be loaded
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Recorded session could not be read or parsed
    #[error("Recording error: {0}")]
    RecordingError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

impl Error {
    /// Whether this error means gesture control cannot start at all
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::CameraUnavailable(_) | Self::ModelUnavailable(_))
    }
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
