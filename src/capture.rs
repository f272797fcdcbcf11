//! Frame-driven capture loop.
//!
//! The loop owns the frame source and the gesture controller. Each cycle
//! waits for the next scheduling tick, awaits exactly one `recognize` call,
//! then classifies, debounces and dispatches that frame synchronously before
//! the next cycle starts. Cancellation stops scheduling and discards any
//! result that arrives afterwards.

use crate::config::Config;
use crate::controller::GestureController;
use crate::events::GestureListener;
use crate::landmarks::HandFrame;
use crate::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Source of per-frame inference results (camera + hand-landmark model)
#[async_trait]
pub trait FrameSource: Send {
    /// Acquire the camera and load the model.
    ///
    /// Failures here mean gesture control is unavailable for the session.
    async fn open(&mut self) -> Result<()>;

    /// Grab the next frame and run inference on it.
    ///
    /// `Ok(None)` means the source is exhausted and the session should end.
    /// An `Err` skips this frame only.
    async fn recognize(&mut self, timestamp_ms: u64) -> Result<Option<HandFrame>>;

    /// Release the camera. Called exactly once after a successful `open`.
    async fn close(&mut self);
}

/// Availability of gesture control, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureStatus {
    /// Camera and model are being initialized
    Loading,
    /// Frames are being processed (a hand may or may not be visible)
    Active,
    /// Camera or model could not be initialized
    Unavailable(String),
    /// Session ended
    Stopped,
}

impl GestureStatus {
    /// Whether gesture control is running or about to run
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Loading | Self::Active)
    }
}

/// Counters for one capture session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames classified and debounced
    pub frames_processed: u64,
    /// Frames whose inference call failed
    pub frames_skipped: u64,
    /// Events delivered to the listener
    pub events_emitted: u64,
}

/// Result of a finished session, handing the listener back to the caller
#[derive(Debug)]
pub struct SessionOutcome<L> {
    pub summary: RunSummary,
    pub listener: L,
}

/// Control side of a capture session
#[derive(Debug)]
pub struct CaptureHandle {
    cancel: watch::Sender<bool>,
    status: watch::Receiver<GestureStatus>,
}

impl CaptureHandle {
    /// Stop the session. No events are delivered after this returns.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Whether the session has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Current availability status
    #[must_use]
    pub fn status(&self) -> GestureStatus {
        self.status.borrow().clone()
    }

    /// Receiver for status changes, e.g. to drive a UI indicator
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<GestureStatus> {
        self.status.clone()
    }
}

/// Capture Loop
pub struct CaptureLoop<S, L> {
    source: S,
    listener: L,
    controller: GestureController,
    frame_interval: Duration,
    cancel: watch::Receiver<bool>,
    status: watch::Sender<GestureStatus>,
}

impl<S: FrameSource, L: GestureListener> CaptureLoop<S, L> {
    /// Create a session. Dropping the returned handle cancels the session.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the configuration is invalid.
    pub fn new(config: &Config, source: S, listener: L) -> Result<(Self, CaptureHandle)> {
        let controller = GestureController::new(config)?;
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (status_tx, status_rx) = watch::channel(GestureStatus::Loading);

        let capture = Self {
            source,
            listener,
            controller,
            frame_interval: config.capture.frame_interval(),
            cancel: cancel_rx,
            status: status_tx,
        };
        let handle = CaptureHandle {
            cancel: cancel_tx,
            status: status_rx,
        };

        Ok((capture, handle))
    }

    /// Run the session until it is cancelled or the source is exhausted.
    ///
    /// The source is closed only when this future runs to completion.
    /// Dropping it early (for example through `tokio::time::timeout`) leaves
    /// the camera open. To stop a session, call [`CaptureHandle::cancel`] and
    /// keep awaiting the future.
    ///
    /// # Errors
    ///
    /// Returns the error from `FrameSource::open` if the camera or model
    /// cannot be initialized; the status is then `Unavailable`.
    pub async fn run(self) -> Result<SessionOutcome<L>> {
        let Self {
            mut source,
            mut listener,
            mut controller,
            frame_interval,
            mut cancel,
            status,
        } = self;

        status.send_replace(GestureStatus::Loading);
        if let Err(e) = source.open().await {
            warn!("Gesture control unavailable: {}", e);
            status.send_replace(GestureStatus::Unavailable(e.to_string()));
            return Err(e);
        }

        info!("Capture session started ({:?} per frame)", frame_interval);
        status.send_replace(GestureStatus::Active);

        let summary = drive(&mut source, &mut listener, &mut controller, frame_interval, &mut cancel).await;

        source.close().await;
        status.send_replace(GestureStatus::Stopped);
        info!(
            "Capture session stopped: {} frames processed, {} skipped, {} events",
            summary.frames_processed, summary.frames_skipped, summary.events_emitted
        );

        Ok(SessionOutcome { summary, listener })
    }
}

async fn drive<S: FrameSource, L: GestureListener>(
    source: &mut S,
    listener: &mut L,
    controller: &mut GestureController,
    frame_interval: Duration,
    cancel: &mut watch::Receiver<bool>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut ticker = time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let started = Instant::now();

    loop {
        if *cancel.borrow() {
            break;
        }

        tokio::select! {
            biased;
            _ = cancel.changed() => break,
            _ = ticker.tick() => {}
        }

        let timestamp_ms = elapsed_ms(started);
        let result = tokio::select! {
            biased;
            _ = cancel.changed() => {
                debug!("Cancelled while waiting for inference");
                break;
            }
            result = source.recognize(timestamp_ms) => result,
        };

        if *cancel.borrow() {
            debug!("Discarding frame recognized after cancellation");
            break;
        }

        match result {
            Ok(Some(frame)) => {
                let delivered = controller.process_into(&frame, listener);
                summary.frames_processed += 1;
                summary.events_emitted += delivered as u64;
            }
            Ok(None) => {
                info!("Frame source exhausted");
                break;
            }
            Err(e) => {
                warn!("Skipping frame at {} ms: {}", timestamp_ms, e);
                summary.frames_skipped += 1;
            }
        }
    }

    summary
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
