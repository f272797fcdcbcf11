//! Hand landmark data produced by the upstream hand-landmark model.
//!
//! Landmarks are normalized camera-frame coordinates: `x` grows to the right,
//! `y` grows downward, both nominally in `[0, 1]`. One detected hand yields
//! 21 points indexed by [`HandLandmark`].

use crate::constants::LABEL_NONE;
use serde::{Deserialize, Serialize};

/// A single normalized landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position (normalized)
    pub x: f32,
    /// Vertical position (normalized, grows downward)
    pub y: f32,
    /// Relative depth, when the model provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    /// Euclidean distance to another landmark in the image plane (x/y only)
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Landmark with both coordinates multiplied by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z.map(|z| z * factor),
        }
    }
}

/// Anatomical landmark index, in the order the hand-landmark model emits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// Position of this landmark in the model output
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Fetch this landmark from a (possibly incomplete) landmark slice
    #[must_use]
    pub fn get(self, landmarks: &[Landmark]) -> Option<&Landmark> {
        landmarks.get(self.index())
    }
}

/// Coarse categorical gesture produced by the upstream classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, e.g. "Closed_Fist" or "Victory"
    pub label: String,
    /// Confidence score in `[0, 1]`
    pub score: f32,
}

impl Category {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Whether the label matches `name` with a score strictly above `min_score`
    #[must_use]
    pub fn is(&self, name: &str, min_score: f32) -> bool {
        self.label == name && self.score > min_score
    }
}

/// Label and score pair for display, using "None"/0.0 when absent
#[must_use]
pub fn display_category(category: Option<&Category>) -> (&str, f32) {
    category.map_or((LABEL_NONE, 0.0), |c| (c.label.as_str(), c.score))
}

/// One frame's inference result for the first detected hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Timestamp the frame was recognized at, in milliseconds since session start
    pub timestamp_ms: u64,
    /// Landmarks of the detected hand; empty when no hand is visible
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    /// Categorical gesture, if the model produced one
    #[serde(default)]
    pub category: Option<Category>,
}

impl HandFrame {
    /// Frame with no detected hand
    #[must_use]
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            landmarks: Vec::new(),
            category: None,
        }
    }

    /// Frame with a detected hand
    #[must_use]
    pub fn with_hand(timestamp_ms: u64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            landmarks,
            category: None,
        }
    }

    /// Attach a categorical gesture to the frame
    #[must_use]
    pub fn with_category(mut self, label: impl Into<String>, score: f32) -> Self {
        self.category = Some(Category::new(label, score));
        self
    }

    /// Whether a hand was detected in this frame
    #[must_use]
    pub fn has_hand(&self) -> bool {
        !self.landmarks.is_empty()
    }
}
