//! Constants used throughout the library

/// Number of landmarks produced per detected hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Finger extension threshold as a fraction of palm size
pub const DEFAULT_EXTEND_RATIO: f32 = 0.08;

/// Finger curl threshold as a fraction of palm size
pub const DEFAULT_CURL_RATIO: f32 = 0.02;

/// Palm size used when wrist and knuckle coincide
pub const DEFAULT_FALLBACK_PALM_SIZE: f32 = 0.2;

/// Thumb-to-index distance (normalized frame units) below which the hand is pinching
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.05;

/// Minimum interval between two pinch events
pub const DEFAULT_PINCH_COOLDOWN_MS: u64 = 2000;

/// Categorical score above which a "Victory"/"Peace" label counts as two fingers
pub const DEFAULT_TWO_FINGER_MIN_SCORE: f32 = 0.4;

/// Categorical score above which a label may switch the discrete mode
pub const DEFAULT_MODE_MIN_SCORE: f32 = 0.6;

/// Default capture rate, roughly one display refresh
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Upper bound accepted for the capture rate
pub const MAX_TARGET_FPS: u32 = 240;

/// Categorical labels emitted by the upstream gesture model
pub const LABEL_CLOSED_FIST: &str = "Closed_Fist";
pub const LABEL_OPEN_PALM: &str = "Open_Palm";
pub const LABEL_VICTORY: &str = "Victory";
pub const LABEL_PEACE: &str = "Peace";

/// Label shown in status text when the model reports no category
pub const LABEL_NONE: &str = "None";
