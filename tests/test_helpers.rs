//! Helper functions and utilities for tests

#![allow(dead_code)]

use async_trait::async_trait;
use hand_gesture_control::{
    capture::FrameSource,
    landmarks::HandFrame,
    synthetic::{HandPose, SyntheticHand},
    Error, Result,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted inference result
#[derive(Debug, Clone)]
pub enum Step {
    /// Return the frame immediately
    Frame(HandFrame),
    /// Fail this frame's inference
    Fail(&'static str),
    /// Return the frame after a delay
    Delayed(Duration, HandFrame),
}

/// Counters shared between a scripted source and the test body
#[derive(Debug, Clone, Default)]
pub struct SourceProbe {
    pub opens: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub timestamps: Arc<Mutex<Vec<u64>>>,
}

impl SourceProbe {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn timestamps(&self) -> Vec<u64> {
        self.timestamps.lock().unwrap().clone()
    }
}

/// Frame source that plays a fixed script
#[derive(Debug)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    fail_open: bool,
    endless: bool,
    probe: SourceProbe,
}

impl ScriptedSource {
    /// Source that ends the session after the last step
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            fail_open: false,
            endless: false,
            probe: SourceProbe::default(),
        }
    }

    /// Source that keeps returning no-hand frames after the last step
    pub fn endless(steps: Vec<Step>) -> Self {
        Self {
            endless: true,
            ..Self::new(steps)
        }
    }

    /// Source whose camera cannot be opened
    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn probe(&self) -> SourceProbe {
        self.probe.clone()
    }
}

#[async_trait]
impl FrameSource for ScriptedSource {
    async fn open(&mut self) -> Result<()> {
        self.probe.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(Error::CameraUnavailable("no camera attached".to_string()));
        }
        Ok(())
    }

    async fn recognize(&mut self, timestamp_ms: u64) -> Result<Option<HandFrame>> {
        self.probe.timestamps.lock().unwrap().push(timestamp_ms);

        match self.steps.pop_front() {
            Some(Step::Frame(frame)) => Ok(Some(frame)),
            Some(Step::Fail(message)) => Err(Error::Inference(message.to_string())),
            Some(Step::Delayed(delay, frame)) => {
                tokio::time::sleep(delay).await;
                Ok(Some(frame))
            }
            None if self.endless => Ok(Some(HandFrame::empty(timestamp_ms))),
            None => Ok(None),
        }
    }

    async fn close(&mut self) {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Frame of `pose` at `timestamp_ms` with the pose's usual label at high confidence
pub fn pose_frame(pose: HandPose, timestamp_ms: u64) -> HandFrame {
    SyntheticHand::new(pose).frame(timestamp_ms, 0.9)
}

/// Frames of `pose` every `frame_ms` from 0 up to and including `until_ms`
pub fn held_pose(pose: HandPose, frame_ms: u64, until_ms: u64) -> Vec<HandFrame> {
    (0..=until_ms / frame_ms)
        .map(|k| pose_frame(pose, k * frame_ms))
        .collect()
}
