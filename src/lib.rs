//! Hand-gesture recognition and event debouncing for webcam hand-landmark streams.
//!
//! This library turns per-frame output of an on-device hand-landmark model
//! into stable, application-level gesture events:
//! - Geometric finger-pose analysis with palm-relative thresholds
//! - Per-frame classification that merges geometry with the model's categorical label
//! - Debouncing: edge-triggered start/end events, cooldown-gated pinches,
//!   and idempotent discrete mode switches
//! - A frame-driven async capture loop with clean cancellation
//!
//! The processing pipeline for each frame is:
//! 1. The [`capture::FrameSource`] grabs a frame and runs the model
//! 2. The [`classifier::GestureClassifier`] derives [`classifier::GestureFacts`]
//! 3. The [`debouncer::Debouncer`] converts facts into [`events::GestureEvent`]s
//! 4. Events are dispatched to a [`events::GestureListener`]
//!
//! # Examples
//!
//! ## Classifying a single hand
//!
//! ```
//! use hand_gesture_control::geometry::{is_one_finger_up, pinch_distance};
//! use hand_gesture_control::synthetic::{HandPose, SyntheticHand};
//!
//! let landmarks = SyntheticHand::new(HandPose::OneFinger).landmarks();
//! assert!(is_one_finger_up(&landmarks));
//! assert!(pinch_distance(&landmarks).unwrap() > 0.05);
//! ```
//!
//! ## Debouncing a stream of frames
//!
//! ```
//! use hand_gesture_control::{
//!     config::Config,
//!     controller::GestureController,
//!     debouncer::AppMode,
//!     events::GestureEvent,
//!     synthetic::{HandPose, SyntheticHand},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = GestureController::new(&Config::default())?;
//! let fist = SyntheticHand::new(HandPose::Fist);
//!
//! // A held fist switches the mode once
//! let first = controller.handle_frame(&fist.frame(0, 0.9));
//! let second = controller.handle_frame(&fist.frame(33, 0.9));
//! assert_eq!(first.events, vec![GestureEvent::ModeChanged(AppMode::TreeShape)]);
//! assert!(second.events.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Running a capture session
//!
//! ```no_run
//! use hand_gesture_control::{
//!     capture::CaptureLoop, config::Config, events::EventRecorder, replay::ReplaySource,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ReplaySource::from_path("session.yaml");
//! let (capture, handle) = CaptureLoop::new(&Config::default(), source, EventRecorder::new())?;
//!
//! // `handle.cancel()` from another task stops the session
//! let outcome = capture.run().await?;
//! println!("{} events", outcome.listener.events.len());
//! drop(handle);
//! # Ok(())
//! # }
//! ```

/// Hand landmark types produced by the upstream model
pub mod landmarks;

/// Stateless finger-pose analysis
pub mod geometry;

/// Per-frame gesture classification
pub mod classifier;

/// Gesture state machines and debouncing
pub mod debouncer;

/// Gesture events and listener callbacks
pub mod events;

/// Classifier and debouncer combined per frame
pub mod controller;

/// Frame-driven capture loop
pub mod capture;

/// Recorded session playback
pub mod replay;

/// Synthetic hand poses
pub mod synthetic;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
