//! Stateless finger-pose analysis of a single hand's landmarks.
//!
//! All thresholds scale with the palm size (wrist to knuckle distance), so a
//! pose classifies the same way regardless of how far the hand is from the
//! camera. Every predicate is total: missing landmarks, degenerate palms and
//! non-finite coordinates all yield `false` rather than an error.

use crate::config::GeometryConfig;
use crate::landmarks::{HandLandmark, Landmark};

/// The three landmarks of one finger the analyzer reads
#[derive(Debug, Clone, Copy)]
struct FingerJoints<'a> {
    tip: &'a Landmark,
    pip: &'a Landmark,
    mcp: &'a Landmark,
}

impl<'a> FingerJoints<'a> {
    fn lookup(
        landmarks: &'a [Landmark],
        tip: HandLandmark,
        pip: HandLandmark,
        mcp: HandLandmark,
    ) -> Option<Self> {
        Some(Self {
            tip: tip.get(landmarks)?,
            pip: pip.get(landmarks)?,
            mcp: mcp.get(landmarks)?,
        })
    }

    /// Tip above the middle joint, which is above the knuckle, both by `threshold`
    fn is_extended(&self, threshold: f32) -> bool {
        self.tip.y < self.pip.y - threshold && self.pip.y < self.mcp.y - threshold
    }

    /// Tip not clearly above the middle joint
    fn is_curled(&self, threshold: f32) -> bool {
        self.tip.y > self.pip.y - threshold
    }
}

/// The four non-thumb fingers of one hand
struct Hand<'a> {
    index: FingerJoints<'a>,
    middle: FingerJoints<'a>,
    ring: FingerJoints<'a>,
    pinky: FingerJoints<'a>,
}

impl<'a> Hand<'a> {
    fn lookup(landmarks: &'a [Landmark]) -> Option<Self> {
        use HandLandmark::*;

        Some(Self {
            index: FingerJoints::lookup(landmarks, IndexTip, IndexPip, IndexMcp)?,
            middle: FingerJoints::lookup(landmarks, MiddleTip, MiddlePip, MiddleMcp)?,
            ring: FingerJoints::lookup(landmarks, RingTip, RingPip, RingMcp)?,
            pinky: FingerJoints::lookup(landmarks, PinkyTip, PinkyPip, PinkyMcp)?,
        })
    }
}

/// Palm-relative extension and curl thresholds for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Palm size the thresholds were derived from
    pub palm_size: f32,
    /// Minimum rise for an extended finger
    pub extend: f32,
    /// Maximum rise for a curled finger
    pub curl: f32,
}

/// Landmark Geometry Analyzer
#[derive(Debug, Clone, Default)]
pub struct PoseAnalyzer {
    config: GeometryConfig,
}

impl PoseAnalyzer {
    /// Create an analyzer with the given thresholds
    #[must_use]
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Distance from the wrist to `knuckle`, or the fallback size if degenerate.
    ///
    /// Returns `None` if either landmark is missing.
    #[must_use]
    pub fn palm_size(&self, landmarks: &[Landmark], knuckle: HandLandmark) -> Option<f32> {
        let wrist = HandLandmark::Wrist.get(landmarks)?;
        let knuckle = knuckle.get(landmarks)?;
        let size = wrist.planar_distance(knuckle);

        if size.is_finite() && size > 0.0 {
            Some(size)
        } else {
            Some(self.config.fallback_palm_size)
        }
    }

    /// Extension and curl thresholds scaled to the palm measured at `knuckle`
    #[must_use]
    pub fn thresholds(&self, landmarks: &[Landmark], knuckle: HandLandmark) -> Option<Thresholds> {
        let palm_size = self.palm_size(landmarks, knuckle)?;
        Some(Thresholds {
            palm_size,
            extend: palm_size * self.config.extend_ratio,
            curl: palm_size * self.config.curl_ratio,
        })
    }

    /// Index finger extended while middle, ring and pinky are curled
    #[must_use]
    pub fn is_one_finger_up(&self, landmarks: &[Landmark]) -> bool {
        let Some(hand) = Hand::lookup(landmarks) else {
            return false;
        };
        let Some(t) = self.thresholds(landmarks, HandLandmark::IndexMcp) else {
            return false;
        };

        hand.index.is_extended(t.extend)
            && hand.middle.is_curled(t.curl)
            && hand.ring.is_curled(t.curl)
            && hand.pinky.is_curled(t.curl)
    }

    /// Index and middle fingers extended while ring and pinky are curled
    #[must_use]
    pub fn is_two_finger_up(&self, landmarks: &[Landmark]) -> bool {
        let Some(hand) = Hand::lookup(landmarks) else {
            return false;
        };
        let Some(t) = self.thresholds(landmarks, HandLandmark::MiddleMcp) else {
            return false;
        };

        hand.index.is_extended(t.extend)
            && hand.middle.is_extended(t.extend)
            && hand.ring.is_curled(t.curl)
            && hand.pinky.is_curled(t.curl)
    }

    /// Planar distance between thumb tip and index fingertip
    #[must_use]
    pub fn pinch_distance(&self, landmarks: &[Landmark]) -> Option<f32> {
        pinch_distance(landmarks)
    }
}

/// Planar distance between thumb tip and index fingertip, if both are present
#[must_use]
pub fn pinch_distance(landmarks: &[Landmark]) -> Option<f32> {
    let thumb = HandLandmark::ThumbTip.get(landmarks)?;
    let index = HandLandmark::IndexTip.get(landmarks)?;
    let distance = thumb.planar_distance(index);
    distance.is_finite().then_some(distance)
}

/// One-finger test with default thresholds
#[must_use]
pub fn is_one_finger_up(landmarks: &[Landmark]) -> bool {
    PoseAnalyzer::default().is_one_finger_up(landmarks)
}

/// Two-finger test with default thresholds
#[must_use]
pub fn is_two_finger_up(landmarks: &[Landmark]) -> bool {
    PoseAnalyzer::default().is_two_finger_up(landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{HandPose, SyntheticHand};

    #[test]
    fn test_one_finger_pose() {
        let marks = SyntheticHand::new(HandPose::OneFinger).landmarks();
        assert!(is_one_finger_up(&marks));
        assert!(!is_two_finger_up(&marks));
    }

    #[test]
    fn test_two_finger_pose() {
        let marks = SyntheticHand::new(HandPose::TwoFinger).landmarks();
        assert!(is_two_finger_up(&marks));
        assert!(!is_one_finger_up(&marks));
    }

    #[test]
    fn test_fist_and_palm_are_neither() {
        for pose in [HandPose::Fist, HandPose::OpenPalm] {
            let marks = SyntheticHand::new(pose).landmarks();
            assert!(!is_one_finger_up(&marks), "{pose:?}");
            assert!(!is_two_finger_up(&marks), "{pose:?}");
        }
    }

    #[test]
    fn test_slightly_bent_finger_is_not_extended() {
        let mut marks = SyntheticHand::new(HandPose::OneFinger).landmarks();
        // middle joint level with the knuckle
        let mcp_y = marks[HandLandmark::IndexMcp.index()].y;
        marks[HandLandmark::IndexPip.index()].y = mcp_y;
        assert!(!is_one_finger_up(&marks));
    }

    #[test]
    fn test_missing_landmarks() {
        let marks = SyntheticHand::new(HandPose::OneFinger).landmarks();
        assert!(!is_one_finger_up(&marks[..20]));
        assert!(!is_two_finger_up(&marks[..20]));
        assert!(!is_one_finger_up(&[]));
        assert_eq!(pinch_distance(&marks[..4]), None);
        assert!(pinch_distance(&marks[..9]).is_some());
    }

    #[test]
    fn test_degenerate_palm_uses_fallback() {
        let analyzer = PoseAnalyzer::default();
        let marks = vec![Landmark::new(0.5, 0.5); 21];
        assert_eq!(analyzer.palm_size(&marks, HandLandmark::IndexMcp), Some(0.2));
        assert!(!analyzer.is_one_finger_up(&marks));
    }

    #[test]
    fn test_nan_coordinates_do_not_classify() {
        let mut marks = SyntheticHand::new(HandPose::OneFinger).landmarks();
        marks[HandLandmark::IndexTip.index()].y = f32::NAN;
        assert!(!is_one_finger_up(&marks));
        assert_eq!(pinch_distance(&marks), None);
    }

    #[test]
    fn test_thresholds_scale_with_palm() {
        let analyzer = PoseAnalyzer::default();
        let marks = SyntheticHand::new(HandPose::OpenPalm).scale(0.5).landmarks();
        let t = analyzer.thresholds(&marks, HandLandmark::IndexMcp).unwrap();
        assert!((t.extend - t.palm_size * 0.08).abs() < 1e-6);
        assert!((t.curl - t.palm_size * 0.02).abs() < 1e-6);
    }
}
