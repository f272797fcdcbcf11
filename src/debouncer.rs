//! Event debouncing and the gesture state machines.
//!
//! Three independent machines share one [`DebounceState`]:
//! - the discrete mode machine, edge-triggered on qualifying fist/palm labels
//! - the one-finger and two-finger machines, which emit start/end on every
//!   change of their flag and end on hand loss
//! - the pinch trigger, a cooldown-gated one-shot that re-fires while held

use crate::classifier::{GestureFacts, ModeGesture};
use crate::config::DebounceConfig;
use crate::events::GestureEvent;
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete application mode driven by fist/palm gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMode {
    /// Particles scattered around the scene
    #[default]
    Scattered,
    /// Particles gathered into the tree
    TreeShape,
}

impl AppMode {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scattered => "SCATTERED",
            Self::TreeShape => "TREE_SHAPE",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "SCATTERED" => Ok(Self::Scattered),
            "TREE_SHAPE" | "TREE" => Ok(Self::TreeShape),
            _ => Err(Error::ConfigError(format!("Unknown mode: {s}"))),
        }
    }
}

impl From<ModeGesture> for AppMode {
    fn from(gesture: ModeGesture) -> Self {
        match gesture {
            ModeGesture::ClosedFist => Self::TreeShape,
            ModeGesture::OpenPalm => Self::Scattered,
        }
    }
}

/// Session-lifetime debounce state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceState {
    /// Last mode emitted (or the initial mode)
    pub mode: AppMode,
    /// Timestamp of the last pinch event
    pub last_pinch_ms: Option<u64>,
    /// Value carried by the last one-finger start/end
    pub one_finger_active: bool,
    /// Value carried by the last two-finger start/end
    pub two_finger_active: bool,
}

impl DebounceState {
    #[must_use]
    pub fn new(initial_mode: AppMode) -> Self {
        Self {
            mode: initial_mode,
            last_pinch_ms: None,
            one_finger_active: false,
            two_finger_active: false,
        }
    }
}

/// Event Debouncer / State Controller
#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    track_fingers: bool,
    state: DebounceState,
}

impl Debouncer {
    /// Create a debouncer. `track_fingers` enables the one/two-finger machines.
    #[must_use]
    pub fn new(config: DebounceConfig, track_fingers: bool) -> Self {
        let state = DebounceState::new(config.initial_mode);
        Self {
            config,
            track_fingers,
            state,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Current discrete mode
    #[must_use]
    pub fn mode(&self) -> AppMode {
        self.state.mode
    }

    /// Forget all session state and return to the initial mode
    pub fn reset(&mut self) {
        self.state = DebounceState::new(self.config.initial_mode);
    }

    /// Advance all machines by one frame.
    ///
    /// Events are returned in the order pinch, one-finger, two-finger, mode.
    pub fn process(&mut self, facts: &GestureFacts, timestamp_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        match facts {
            GestureFacts::NoHand { .. } => {
                if self.track_fingers {
                    self.update_one_finger(false, &mut events);
                    self.update_two_finger(false, &mut events);
                }
            }
            GestureFacts::Hand(hand) => {
                if hand.is_pinching {
                    self.update_pinch(timestamp_ms, &mut events);
                }
                if self.track_fingers {
                    self.update_one_finger(hand.is_one_finger_up, &mut events);
                    self.update_two_finger(hand.is_two_finger_up, &mut events);
                }
                if let Some(gesture) = hand.mode_gesture {
                    self.update_mode(gesture.into(), &mut events);
                }
            }
        }

        events
    }

    fn update_pinch(&mut self, now_ms: u64, events: &mut Vec<GestureEvent>) {
        let ready = match self.state.last_pinch_ms {
            None => true,
            Some(last) => now_ms >= last && now_ms - last >= self.config.pinch_cooldown_ms,
        };

        if ready {
            debug!("Pinch detected at {} ms", now_ms);
            self.state.last_pinch_ms = Some(now_ms);
            events.push(GestureEvent::Pinch);
        }
    }

    fn update_one_finger(&mut self, active: bool, events: &mut Vec<GestureEvent>) {
        if active != self.state.one_finger_active {
            self.state.one_finger_active = active;
            events.push(if active {
                GestureEvent::OneFingerStart
            } else {
                GestureEvent::OneFingerEnd
            });
        }
    }

    fn update_two_finger(&mut self, active: bool, events: &mut Vec<GestureEvent>) {
        if active != self.state.two_finger_active {
            self.state.two_finger_active = active;
            events.push(if active {
                GestureEvent::TwoFingerStart
            } else {
                GestureEvent::TwoFingerEnd
            });
        }
    }

    fn update_mode(&mut self, target: AppMode, events: &mut Vec<GestureEvent>) {
        if target != self.state.mode {
            info!("Triggering mode change: {} -> {}", self.state.mode, target);
            self.state.mode = target;
            events.push(GestureEvent::ModeChanged(target));
        }
    }
}
