//! Frame source that replays a recorded session from a YAML file.
//!
//! ```yaml
//! frames:
//!   - timestamp_ms: 0
//!     landmarks: [{ x: 0.5, y: 0.85 }, ...]
//!     category: { label: Closed_Fist, score: 0.92 }
//!   - timestamp_ms: 33
//!     error: "camera read failed"
//! ```

use crate::capture::FrameSource;
use crate::landmarks::{Category, HandFrame, Landmark};
use crate::{Error, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// One recorded inference result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Recognition timestamp; the session clock is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Landmark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Inference failure to reproduce for this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<HandFrame> for RecordedFrame {
    fn from(frame: HandFrame) -> Self {
        Self {
            timestamp_ms: Some(frame.timestamp_ms),
            landmarks: frame.landmarks,
            category: frame.category,
            error: None,
        }
    }
}

/// A recorded capture session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Load a recording from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::RecordingError(format!("{}: {}", path.display(), e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::RecordingError(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Save the recording as YAML
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::RecordingError(format!("Failed to serialize recording: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Replays a [`Recording`] one frame per capture cycle
#[derive(Debug)]
pub struct ReplaySource {
    path: Option<PathBuf>,
    pending: VecDeque<RecordedFrame>,
    opened: bool,
}

impl ReplaySource {
    /// Replay a recording file, read when the session opens
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            pending: VecDeque::new(),
            opened: false,
        }
    }

    /// Replay an in-memory recording
    #[must_use]
    pub fn from_recording(recording: Recording) -> Self {
        Self {
            path: None,
            pending: recording.frames.into(),
            opened: false,
        }
    }

    /// Frames not yet replayed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl FrameSource for ReplaySource {
    async fn open(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            let recording = Recording::from_file(path)
                .map_err(|e| Error::CameraUnavailable(e.to_string()))?;
            info!("Replaying {} frames from {}", recording.frames.len(), path.display());
            self.pending = recording.frames.into();
        }
        self.opened = true;
        Ok(())
    }

    async fn recognize(&mut self, timestamp_ms: u64) -> Result<Option<HandFrame>> {
        if !self.opened {
            return Err(Error::Inference("replay source is not open".to_string()));
        }

        let Some(recorded) = self.pending.pop_front() else {
            return Ok(None);
        };

        if let Some(message) = recorded.error {
            return Err(Error::Inference(message));
        }

        Ok(Some(HandFrame {
            timestamp_ms: recorded.timestamp_ms.unwrap_or(timestamp_ms),
            landmarks: recorded.landmarks,
            category: recorded.category,
        }))
    }

    async fn close(&mut self) {
        debug!("Replay source closed with {} frames pending", self.remaining());
        self.opened = false;
        self.pending.clear();
    }
}
