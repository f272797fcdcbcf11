//! Per-frame gesture pipeline: classification, debouncing and status text.

use crate::classifier::{GestureClassifier, GestureFacts};
use crate::config::Config;
use crate::debouncer::{AppMode, DebounceState, Debouncer};
use crate::events::{dispatch, GestureEvent, GestureListener};
use crate::landmarks::{display_category, HandFrame};
use crate::Result;

/// Outcome of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Classified facts of the frame
    pub facts: GestureFacts,
    /// Events emitted, in delivery order
    pub events: Vec<GestureEvent>,
    /// Diagnostic summary of the frame
    pub debug_text: String,
}

/// Classifier and debouncer combined behind one synchronous step
#[derive(Debug, Clone)]
pub struct GestureController {
    classifier: GestureClassifier,
    debouncer: Debouncer,
}

impl GestureController {
    /// Create a controller from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the configuration is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: GestureClassifier::new(
                config.geometry.clone(),
                config.classifier.clone(),
                config.track_fingers,
            ),
            debouncer: Debouncer::new(config.debounce.clone(), config.track_fingers),
        })
    }

    /// Classify and debounce one frame
    pub fn handle_frame(&mut self, frame: &HandFrame) -> FrameReport {
        let facts = self.classifier.classify(frame);
        let events = self.debouncer.process(&facts, frame.timestamp_ms);
        let debug_text = describe(&facts);

        FrameReport {
            facts,
            events,
            debug_text,
        }
    }

    /// Process one frame and deliver its events to `listener`.
    ///
    /// The frame's debug text arrives before its events.
    /// Returns the number of events delivered.
    pub fn process_into<L: GestureListener + ?Sized>(&mut self, frame: &HandFrame, listener: &mut L) -> usize {
        let report = self.handle_frame(frame);
        listener.on_debug_text(&report.debug_text);
        for event in &report.events {
            dispatch(listener, *event);
        }
        report.events.len()
    }

    /// Current debounce state
    #[must_use]
    pub fn state(&self) -> &DebounceState {
        self.debouncer.state()
    }

    /// Current discrete mode
    #[must_use]
    pub fn mode(&self) -> AppMode {
        self.debouncer.mode()
    }

    /// Reset the debouncer to its initial state
    pub fn reset(&mut self) {
        self.debouncer.reset();
    }
}

/// Status line for a frame's facts
#[must_use]
pub fn describe(facts: &GestureFacts) -> String {
    let (label, score) = display_category(facts.category());
    match facts {
        GestureFacts::NoHand { .. } => format!("Gesture: {label} ({score:.2}) | No hand"),
        GestureFacts::Hand(hand) => format!(
            "Gesture: {label} ({score:.2}) | Two-finger: {} | Pinch: {}",
            yes_no(hand.is_two_finger_up),
            yes_no(hand.is_pinching)
        ),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventRecorder;
    use crate::synthetic::{HandPose, SyntheticHand};

    #[test]
    fn test_debug_text_for_hand() {
        let mut controller = GestureController::new(&Config::default()).unwrap();
        let report = controller.handle_frame(&SyntheticHand::new(HandPose::TwoFinger).frame(0, 0.876));
        assert_eq!(report.debug_text, "Gesture: Victory (0.88) | Two-finger: Yes | Pinch: No");
    }

    #[test]
    fn test_debug_text_for_no_hand() {
        let mut controller = GestureController::new(&Config::default()).unwrap();
        let report = controller.handle_frame(&HandFrame::empty(0));
        assert_eq!(report.debug_text, "Gesture: None (0.00) | No hand");
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = Config::default();
        config.capture.target_fps = 0;
        assert!(GestureController::new(&config).is_err());
    }

    #[test]
    fn test_process_into_listener() {
        let mut controller = GestureController::new(&Config::default()).unwrap();
        let mut recorder = EventRecorder::new();
        let delivered = controller.process_into(&SyntheticHand::new(HandPose::Fist).frame(0, 0.9), &mut recorder);
        assert_eq!(delivered, 1);
        assert_eq!(recorder.events, vec![GestureEvent::ModeChanged(AppMode::TreeShape)]);
        assert!(recorder.last_debug_text.unwrap().starts_with("Gesture: Closed_Fist"));
    }

    /// Pairs each event with the debug text current when it arrived
    #[derive(Default)]
    struct StatusAtEvent {
        status: String,
        seen: Vec<(GestureEvent, String)>,
    }

    impl GestureListener for StatusAtEvent {
        fn on_mode_change(&mut self, mode: AppMode) {
            self.seen.push((GestureEvent::ModeChanged(mode), self.status.clone()));
        }

        fn on_one_finger_start(&mut self) {
            self.seen.push((GestureEvent::OneFingerStart, self.status.clone()));
        }

        fn on_debug_text(&mut self, text: &str) {
            self.status = text.to_string();
        }
    }

    #[test]
    fn test_events_see_their_own_frame_status() {
        let mut controller = GestureController::new(&Config::default()).unwrap();
        let mut listener = StatusAtEvent::default();

        controller.process_into(&SyntheticHand::new(HandPose::Fist).frame(0, 0.9), &mut listener);
        controller.process_into(&SyntheticHand::new(HandPose::OneFinger).frame(33, 0.9), &mut listener);

        assert_eq!(listener.seen.len(), 2);
        assert_eq!(listener.seen[0].0, GestureEvent::ModeChanged(AppMode::TreeShape));
        assert!(listener.seen[0].1.starts_with("Gesture: Closed_Fist"), "{}", listener.seen[0].1);
        assert_eq!(listener.seen[1].0, GestureEvent::OneFingerStart);
        assert!(listener.seen[1].1.starts_with("Gesture: Pointing_Up"), "{}", listener.seen[1].1);
    }
}
