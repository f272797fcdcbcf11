//! Application wiring for replaying recorded gesture sessions.

use crate::{
    capture::{CaptureHandle, CaptureLoop, FrameSource, RunSummary},
    config::Config,
    constants::MAX_TARGET_FPS,
    debouncer::AppMode,
    error::{Error, Result},
    events::{GestureEvent, GestureListener},
    replay::{Recording, RecordedFrame, ReplaySource},
    synthetic::{HandPose, SyntheticHand},
};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Recorded session to replay
    pub recording: PathBuf,
    /// Controller configuration
    pub controller: Config,
    /// Print events to stdout in addition to logging them
    pub print_events: bool,
}

/// Listener that logs every event and tracks the current mode
#[derive(Debug, Clone)]
pub struct LoggingListener {
    mode: AppMode,
    print_events: bool,
    last_debug_text: String,
    events: Vec<GestureEvent>,
}

impl LoggingListener {
    #[must_use]
    pub fn new(initial_mode: AppMode, print_events: bool) -> Self {
        Self {
            mode: initial_mode,
            print_events,
            last_debug_text: String::new(),
            events: Vec::new(),
        }
    }

    /// Mode after the last mode change
    #[must_use]
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Every event received, in order
    #[must_use]
    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    fn record(&mut self, event: GestureEvent) {
        info!("Gesture event: {}", event.as_str());
        if self.print_events {
            println!("{}\t{}", event.as_str(), self.last_debug_text);
        }
        self.events.push(event);
    }
}

impl GestureListener for LoggingListener {
    fn on_mode_change(&mut self, mode: AppMode) {
        self.mode = mode;
        self.record(GestureEvent::ModeChanged(mode));
    }

    fn on_pinch(&mut self) {
        self.record(GestureEvent::Pinch);
    }

    fn on_one_finger_start(&mut self) {
        self.record(GestureEvent::OneFingerStart);
    }

    fn on_one_finger_end(&mut self) {
        self.record(GestureEvent::OneFingerEnd);
    }

    fn on_two_finger_start(&mut self) {
        self.record(GestureEvent::TwoFingerStart);
    }

    fn on_two_finger_end(&mut self) {
        self.record(GestureEvent::TwoFingerEnd);
    }

    fn on_debug_text(&mut self, text: &str) {
        if text != self.last_debug_text {
            debug!("{}", text);
            self.last_debug_text = text.to_string();
        }
    }
}

/// Replay application
pub struct GestureApp {
    config: AppConfig,
}

impl GestureApp {
    /// Create the application, validating its configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing gesture replay");
        config.controller.validate()?;
        Ok(Self { config })
    }

    /// Build the capture session without running it
    pub fn session(&self) -> Result<(CaptureLoop<ReplaySource, LoggingListener>, CaptureHandle)> {
        let source = ReplaySource::from_path(self.config.recording.clone());
        let listener = LoggingListener::new(
            self.config.controller.debounce.initial_mode,
            self.config.print_events,
        );
        CaptureLoop::new(&self.config.controller, source, listener)
    }

    /// Replay the recording to completion or until Ctrl-C
    pub async fn run(&self) -> Result<RunSummary> {
        let (capture, handle) = self.session()?;

        let run = capture.run();
        tokio::pin!(run);

        let outcome = tokio::select! {
            outcome = &mut run => outcome?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping capture");
                handle.cancel();
                run.await?
            }
        };

        info!("Final mode: {}", outcome.listener.mode());
        Ok(outcome.summary)
    }
}

/// Demo session: palm, fist, pointing, victory, pinch held, hand lost
///
/// # Errors
///
/// Returns `Error::ConfigError` if `target_fps` is outside `1..=MAX_TARGET_FPS`.
pub fn demo_recording(target_fps: u32) -> Result<Recording> {
    if target_fps == 0 || target_fps > MAX_TARGET_FPS {
        return Err(Error::ConfigError(format!(
            "Demo FPS must be between 1 and {}, got {}",
            MAX_TARGET_FPS, target_fps
        )));
    }
    let frame_ms = 1000 / u64::from(target_fps);
    let script: [(Option<HandPose>, u64); 7] = [
        (Some(HandPose::OpenPalm), 500),
        (Some(HandPose::Fist), 500),
        (Some(HandPose::OneFinger), 500),
        (Some(HandPose::TwoFinger), 500),
        (Some(HandPose::Pinch), 4500),
        (None, 300),
        (Some(HandPose::OpenPalm), 500),
    ];

    let mut frames = Vec::new();
    let mut timestamp_ms = 0;
    for (pose, duration_ms) in script {
        let end = timestamp_ms + duration_ms;
        while timestamp_ms < end {
            let frame: RecordedFrame = match pose {
                Some(pose) => SyntheticHand::new(pose).frame(timestamp_ms, 0.85).into(),
                None => RecordedFrame {
                    timestamp_ms: Some(timestamp_ms),
                    ..RecordedFrame::default()
                },
            };
            frames.push(frame);
            timestamp_ms += frame_ms;
        }
    }

    Ok(Recording { frames })
}

/// Write the demo session to `path`
pub fn write_demo_recording<P: AsRef<Path>>(path: P, target_fps: u32) -> Result<usize> {
    let recording = demo_recording(target_fps)?;
    recording.to_file(&path)?;
    info!(
        "Wrote {} demo frames to {}",
        recording.frames.len(),
        path.as_ref().display()
    );
    Ok(recording.frames.len())
}

/// Run any frame source through a listener with the given configuration
pub async fn run_source<S: FrameSource, L: GestureListener>(
    config: &Config,
    source: S,
    listener: L,
) -> Result<(RunSummary, L)> {
    let (capture, _handle) = CaptureLoop::new(config, source, listener)?;
    let outcome = capture.run().await?;
    Ok((outcome.summary, outcome.listener))
}
