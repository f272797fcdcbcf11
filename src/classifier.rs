//! Per-frame gesture classification.
//!
//! Merges the analyzer's geometric predicates with the upstream model's
//! categorical label into one [`GestureFacts`] record per frame.

use crate::config::{ClassifierConfig, GeometryConfig};
use crate::geometry::PoseAnalyzer;
use crate::landmarks::{Category, HandFrame};

/// Discrete gestures that switch the application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeGesture {
    /// Closed fist: gather into the tree shape
    ClosedFist,
    /// Open palm: scatter
    OpenPalm,
}

/// Facts derived from a frame in which a hand was detected
#[derive(Debug, Clone, PartialEq)]
pub struct HandFacts {
    /// Thumb-to-index distance, `None` if either landmark is missing
    pub pinch_distance: Option<f32>,
    /// Pinch distance under the pinch threshold
    pub is_pinching: bool,
    /// Index finger up, others curled
    pub is_one_finger_up: bool,
    /// Index and middle fingers up (geometry or categorical label)
    pub is_two_finger_up: bool,
    /// Categorical gesture as reported by the model
    pub category: Option<Category>,
    /// Mode gesture the label is authoritative for in this frame
    pub mode_gesture: Option<ModeGesture>,
}

/// Per-frame classification result
#[derive(Debug, Clone, PartialEq)]
pub enum GestureFacts {
    /// No hand in the frame
    NoHand {
        /// Categorical gesture, passed through for display
        category: Option<Category>,
    },
    /// A hand was detected
    Hand(HandFacts),
}

impl GestureFacts {
    /// Categorical gesture of the frame, if any
    #[must_use]
    pub fn category(&self) -> Option<&Category> {
        match self {
            Self::NoHand { category } => category.as_ref(),
            Self::Hand(facts) => facts.category.as_ref(),
        }
    }

    /// Hand facts, if a hand was detected
    #[must_use]
    pub fn hand(&self) -> Option<&HandFacts> {
        match self {
            Self::NoHand { .. } => None,
            Self::Hand(facts) => Some(facts),
        }
    }
}

/// Gesture Classifier
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    analyzer: PoseAnalyzer,
    config: ClassifierConfig,
    suppress_modes_on_two_finger: bool,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GeometryConfig::default(), ClassifierConfig::default(), true)
    }
}

impl GestureClassifier {
    /// Create a classifier.
    ///
    /// With `track_fingers` disabled a two-finger pose no longer blocks
    /// mode switching.
    #[must_use]
    pub fn new(geometry: GeometryConfig, config: ClassifierConfig, track_fingers: bool) -> Self {
        Self {
            analyzer: PoseAnalyzer::new(geometry),
            config,
            suppress_modes_on_two_finger: track_fingers,
        }
    }

    /// Classify one frame
    #[must_use]
    pub fn classify(&self, frame: &HandFrame) -> GestureFacts {
        let category = frame.category.clone();

        if !frame.has_hand() {
            return GestureFacts::NoHand { category };
        }

        let landmarks = &frame.landmarks;
        let pinch_distance = self.analyzer.pinch_distance(landmarks);
        let is_pinching = pinch_distance.is_some_and(|d| d < self.config.pinch_threshold);
        let is_one_finger_up = self.analyzer.is_one_finger_up(landmarks);
        let is_two_finger_up =
            self.analyzer.is_two_finger_up(landmarks) || self.is_two_finger_label(category.as_ref());

        let mode_gesture = if is_two_finger_up && self.suppress_modes_on_two_finger {
            None
        } else {
            self.mode_gesture(category.as_ref())
        };

        GestureFacts::Hand(HandFacts {
            pinch_distance,
            is_pinching,
            is_one_finger_up,
            is_two_finger_up,
            category,
            mode_gesture,
        })
    }

    /// Categorical fallback for two fingers when the landmarks are noisy
    fn is_two_finger_label(&self, category: Option<&Category>) -> bool {
        category.is_some_and(|c| {
            self.config
                .two_finger_labels
                .iter()
                .any(|label| c.is(label, self.config.two_finger_min_score))
        })
    }

    fn mode_gesture(&self, category: Option<&Category>) -> Option<ModeGesture> {
        let category = category?;
        if category.is(&self.config.closed_fist_label, self.config.mode_min_score) {
            Some(ModeGesture::ClosedFist)
        } else if category.is(&self.config.open_palm_label, self.config.mode_min_score) {
            Some(ModeGesture::OpenPalm)
        } else {
            None
        }
    }
}
