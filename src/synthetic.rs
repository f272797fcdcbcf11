//! Synthetic hand poses for demos, benchmarks and tests.
//!
//! Poses are laid out in hand-local units (wrist at the origin, fingers
//! pointing toward negative `y`) and mapped into normalized frame
//! coordinates with a configurable size and wrist position.

use crate::constants::{LABEL_CLOSED_FIST, LABEL_OPEN_PALM, LABEL_VICTORY, NUM_HAND_LANDMARKS};
use crate::landmarks::{Category, HandFrame, HandLandmark, Landmark};

/// Canonical poses the builder can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPose {
    /// All fingers extended
    OpenPalm,
    /// All fingers curled
    Fist,
    /// Index finger extended
    OneFinger,
    /// Index and middle fingers extended
    TwoFinger,
    /// Thumb and index tips touching, other fingers extended
    Pinch,
}

impl HandPose {
    /// Categorical label a gesture model would typically report for the pose
    #[must_use]
    pub fn model_label(self) -> Option<&'static str> {
        match self {
            Self::OpenPalm => Some(LABEL_OPEN_PALM),
            Self::Fist => Some(LABEL_CLOSED_FIST),
            Self::TwoFinger => Some(LABEL_VICTORY),
            Self::OneFinger => Some("Pointing_Up"),
            Self::Pinch => None,
        }
    }
}

// Knuckle positions relative to the wrist
const INDEX_MCP: (f32, f32) = (-0.15, -0.8);
const MIDDLE_MCP: (f32, f32) = (0.0, -0.85);
const RING_MCP: (f32, f32) = (0.15, -0.8);
const PINKY_MCP: (f32, f32) = (0.3, -0.7);

const THUMB: [(f32, f32); 4] = [(-0.25, -0.15), (-0.4, -0.3), (-0.5, -0.45), (-0.55, -0.6)];

/// Builder for a synthetic hand
#[derive(Debug, Clone, Copy)]
pub struct SyntheticHand {
    pose: HandPose,
    size: f32,
    wrist: (f32, f32),
}

impl SyntheticHand {
    #[must_use]
    pub fn new(pose: HandPose) -> Self {
        Self {
            pose,
            size: 0.25,
            wrist: (0.5, 0.85),
        }
    }

    /// Multiply the hand size (distance from the camera)
    #[must_use]
    pub fn scale(mut self, factor: f32) -> Self {
        self.size *= factor;
        self
    }

    /// Move the wrist to a new normalized position
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.wrist = (x, y);
        self
    }

    /// The 21 landmarks of the pose in normalized frame coordinates
    #[must_use]
    pub fn landmarks(&self) -> Vec<Landmark> {
        let mut local = vec![(0.0_f32, 0.0_f32); NUM_HAND_LANDMARKS];
        local[1..=4].copy_from_slice(&THUMB);

        let (index, middle, ring, pinky) = match self.pose {
            HandPose::OpenPalm | HandPose::Pinch => (true, true, true, true),
            HandPose::Fist => (false, false, false, false),
            HandPose::OneFinger => (true, false, false, false),
            HandPose::TwoFinger => (true, true, false, false),
        };

        place_finger(&mut local, HandLandmark::IndexMcp, INDEX_MCP, index);
        place_finger(&mut local, HandLandmark::MiddleMcp, MIDDLE_MCP, middle);
        place_finger(&mut local, HandLandmark::RingMcp, RING_MCP, ring);
        place_finger(&mut local, HandLandmark::PinkyMcp, PINKY_MCP, pinky);

        if self.pose == HandPose::Pinch {
            // index bends down onto the thumb tip
            let thumb_tip = THUMB[3];
            local[HandLandmark::IndexPip.index()] = (-0.35, -0.85);
            local[HandLandmark::IndexDip.index()] = (-0.5, -0.75);
            local[HandLandmark::IndexTip.index()] = thumb_tip;
        }

        local
            .into_iter()
            .map(|(x, y)| Landmark::new(self.wrist.0 + x * self.size, self.wrist.1 + y * self.size))
            .collect()
    }

    /// A frame carrying the pose and the label a model would report with `score`
    #[must_use]
    pub fn frame(&self, timestamp_ms: u64, score: f32) -> HandFrame {
        HandFrame {
            timestamp_ms,
            landmarks: self.landmarks(),
            category: self.pose.model_label().map(|label| Category::new(label, score)),
        }
    }
}

/// Lay out MCP, PIP, DIP and tip of one finger starting at `mcp`
fn place_finger(local: &mut [(f32, f32)], mcp_index: HandLandmark, mcp: (f32, f32), extended: bool) {
    let (x, y) = mcp;
    let joints = if extended {
        [(x, y), (x, y - 0.3), (x, y - 0.5), (x, y - 0.7)]
    } else {
        [(x, y), (x, y - 0.15), (x, y - 0.05), (x, y + 0.05)]
    };
    let start = mcp_index.index();
    local[start..start + 4].copy_from_slice(&joints);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pinch_distance;

    #[test]
    fn test_all_landmarks_present() {
        for pose in [HandPose::OpenPalm, HandPose::Fist, HandPose::Pinch] {
            assert_eq!(SyntheticHand::new(pose).landmarks().len(), NUM_HAND_LANDMARKS);
        }
    }

    #[test]
    fn test_pinch_distance_by_pose() {
        let pinch = SyntheticHand::new(HandPose::Pinch).landmarks();
        assert!(pinch_distance(&pinch).unwrap() < 0.05);

        let fist = SyntheticHand::new(HandPose::Fist).landmarks();
        assert!(pinch_distance(&fist).unwrap() > 0.05);
    }

    #[test]
    fn test_frame_carries_label() {
        let frame = SyntheticHand::new(HandPose::Fist).frame(40, 0.9);
        assert_eq!(frame.timestamp_ms, 40);
        assert_eq!(frame.category.unwrap().label, "Closed_Fist");
    }
}
