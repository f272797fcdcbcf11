//! Events delivered to the application and the listener contract.

use crate::debouncer::AppMode;

/// Application-level events emitted by the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    /// Discrete mode changed
    ModeChanged(AppMode),
    /// Cooldown-gated pinch
    Pinch,
    /// One finger raised
    OneFingerStart,
    /// One finger lowered or hand lost
    OneFingerEnd,
    /// Two fingers raised
    TwoFingerStart,
    /// Two fingers lowered or hand lost
    TwoFingerEnd,
}

impl GestureEvent {
    /// String representation for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModeChanged(AppMode::Scattered) => "mode-scattered",
            Self::ModeChanged(AppMode::TreeShape) => "mode-tree-shape",
            Self::Pinch => "pinch",
            Self::OneFingerStart => "one-finger-start",
            Self::OneFingerEnd => "one-finger-end",
            Self::TwoFingerStart => "two-finger-start",
            Self::TwoFingerEnd => "two-finger-end",
        }
    }
}

/// Consumer callbacks. Every method defaults to a no-op, so a listener only
/// implements the gestures it cares about.
pub trait GestureListener: Send {
    fn on_mode_change(&mut self, _mode: AppMode) {}

    fn on_pinch(&mut self) {}

    fn on_one_finger_start(&mut self) {}

    fn on_one_finger_end(&mut self) {}

    fn on_two_finger_start(&mut self) {}

    fn on_two_finger_end(&mut self) {}

    /// Human-readable summary of the current frame, for diagnostics only
    fn on_debug_text(&mut self, _text: &str) {}
}

/// Deliver one event to the matching listener callback
pub fn dispatch<L: GestureListener + ?Sized>(listener: &mut L, event: GestureEvent) {
    match event {
        GestureEvent::ModeChanged(mode) => listener.on_mode_change(mode),
        GestureEvent::Pinch => listener.on_pinch(),
        GestureEvent::OneFingerStart => listener.on_one_finger_start(),
        GestureEvent::OneFingerEnd => listener.on_one_finger_end(),
        GestureEvent::TwoFingerStart => listener.on_two_finger_start(),
        GestureEvent::TwoFingerEnd => listener.on_two_finger_end(),
    }
}

/// Listener that records every event in order
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    pub events: Vec<GestureEvent>,
    pub last_debug_text: Option<String>,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded occurrences of `event`
    #[must_use]
    pub fn count(&self, event: GestureEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl GestureListener for EventRecorder {
    fn on_mode_change(&mut self, mode: AppMode) {
        self.events.push(GestureEvent::ModeChanged(mode));
    }

    fn on_pinch(&mut self) {
        self.events.push(GestureEvent::Pinch);
    }

    fn on_one_finger_start(&mut self) {
        self.events.push(GestureEvent::OneFingerStart);
    }

    fn on_one_finger_end(&mut self) {
        self.events.push(GestureEvent::OneFingerEnd);
    }

    fn on_two_finger_start(&mut self) {
        self.events.push(GestureEvent::TwoFingerStart);
    }

    fn on_two_finger_end(&mut self) {
        self.events.push(GestureEvent::TwoFingerEnd);
    }

    fn on_debug_text(&mut self, text: &str) {
        self.last_debug_text = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PinchOnly(usize);

    impl GestureListener for PinchOnly {
        fn on_pinch(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_partial_listener_ignores_other_events() {
        let mut listener = PinchOnly(0);
        dispatch(&mut listener, GestureEvent::OneFingerStart);
        dispatch(&mut listener, GestureEvent::Pinch);
        dispatch(&mut listener, GestureEvent::ModeChanged(AppMode::TreeShape));
        assert_eq!(listener.0, 1);
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder = EventRecorder::new();
        for event in [GestureEvent::Pinch, GestureEvent::TwoFingerStart, GestureEvent::Pinch] {
            dispatch(&mut recorder, event);
        }
        assert_eq!(
            recorder.events,
            vec![GestureEvent::Pinch, GestureEvent::TwoFingerStart, GestureEvent::Pinch]
        );
        assert_eq!(recorder.count(GestureEvent::Pinch), 2);
    }
}
