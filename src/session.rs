//! The scan loop
//!
//! `ScanSession` wires camera, frame pipeline, decoder, retry counter and
//! debouncer together. One call to [`ScanSession::run`] is one activation:
//! acquire the camera, tick until a detection is accepted or the token is
//! cancelled, release the camera. [`ScanController`] runs activations on a
//! background task and hands the session back when they end, so the
//! debounce state survives restarts.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::camera::{CameraBackend, CameraSession, CameraState};
use crate::channels::{ScanChannels, ScanPhase, ScanStatus, StatusSender};
use crate::config::ScanConfig;
use crate::debounce::{Debouncer, Feedback, RecentDetection, SilentFeedback, play_feedback};
use crate::decoder::{DecodeAdapter, DecodeEngine, Hit};
use crate::device::DeviceProfile;
use crate::error::ScanError;
use crate::models::ScanEvent;
use crate::pipeline::{FrameProcessor, TickPlan};
use crate::retry::RetryController;

/// How an activation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A detection was accepted and emitted
    Detected(ScanEvent),
    /// The token was cancelled
    Stopped,
    /// The camera could not be acquired
    Failed(ScanError),
}

/// Long-lived scanner state for one embedding widget
pub struct ScanSession<B: CameraBackend, E: DecodeEngine> {
    camera: CameraSession<B>,
    processor: FrameProcessor,
    decoder: DecodeAdapter<E>,
    retry: RetryController,
    debouncer: Debouncer,
    feedback: Arc<dyn Feedback>,
    channels: ScanChannels,
    status: StatusSender,
    frame_wait: Duration,
}

impl<B: CameraBackend, E: DecodeEngine> ScanSession<B, E> {
    /// Create a session. `profile` is fixed for the session's lifetime.
    pub fn new(
        backend: B,
        engine: E,
        profile: DeviceProfile,
        config: &ScanConfig,
        channels: ScanChannels,
    ) -> Self {
        let (status, _) = watch::channel(ScanStatus::idle(config.detection_display));
        Self {
            camera: CameraSession::new(backend, config),
            processor: FrameProcessor::new(profile),
            decoder: DecodeAdapter::new(engine),
            retry: RetryController::new(config.widen_after_failures),
            debouncer: Debouncer::new(config.debounce_window),
            feedback: Arc::new(SilentFeedback),
            channels,
            status,
            frame_wait: config.frame_wait,
        }
    }

    /// Use a different audio/haptic feedback sink
    pub fn with_feedback(mut self, feedback: Arc<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Device parameters in use
    pub fn profile(&self) -> &DeviceProfile {
        self.processor.profile()
    }

    /// Ticks missed since the last decode
    pub fn consecutive_failures(&self) -> u32 {
        self.retry.consecutive_failures()
    }

    /// The decode engine
    pub fn engine(&self) -> &E {
        self.decoder.engine()
    }

    /// Camera lifecycle state
    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    /// The camera backend
    pub fn backend(&self) -> &B {
        self.camera.backend()
    }

    /// Subscribe to status updates
    pub fn status(&self) -> watch::Receiver<ScanStatus> {
        self.status.subscribe()
    }

    fn set_phase(&self, phase: ScanPhase) {
        self.status.send_modify(|s| s.phase = phase);
    }

    /// One activation: camera up, scan until accepted or cancelled, camera down.
    pub async fn run(&mut self, cancel: CancellationToken) -> ScanOutcome {
        self.set_phase(ScanPhase::Focusing);
        if let Err(err) = self.camera.start(&self.channels).await {
            self.set_phase(ScanPhase::Idle);
            self.channels.report(err.clone());
            return ScanOutcome::Failed(err);
        }
        if cancel.is_cancelled() {
            self.camera.stop();
            self.set_phase(ScanPhase::Idle);
            return ScanOutcome::Stopped;
        }

        self.set_phase(ScanPhase::Scanning);
        let outcome = self.scan_loop(&cancel).await;
        self.camera.stop();
        self.set_phase(ScanPhase::Idle);
        outcome
    }

    async fn scan_loop(&mut self, cancel: &CancellationToken) -> ScanOutcome {
        loop {
            if cancel.is_cancelled() {
                return ScanOutcome::Stopped;
            }

            let level = self.retry.level();
            let plan = match self.camera.frame() {
                Some(frame) => self.processor.process(frame, level),
                None => TickPlan::NotReady,
            };
            let variants = match plan {
                TickPlan::NotReady => {
                    if !pause(self.frame_wait, cancel).await {
                        return ScanOutcome::Stopped;
                    }
                    continue;
                }
                TickPlan::Variants(variants) => variants,
            };

            let hit = self.decoder.first_hit(variants, &self.channels, cancel).await;
            if cancel.is_cancelled() {
                log::debug!("scan stopped mid-tick, dropping result");
                return ScanOutcome::Stopped;
            }

            match hit {
                Some(hit) => {
                    self.retry.record_success();
                    if let Some(event) = self.accept(hit) {
                        return ScanOutcome::Detected(event);
                    }
                }
                None => self.retry.record_failure(),
            }

            if !pause(self.processor.profile().tick_delay, cancel).await {
                return ScanOutcome::Stopped;
            }
        }
    }

    fn accept(&mut self, hit: Hit) -> Option<ScanEvent> {
        let now = Instant::now();
        if !self.debouncer.try_accept(now) {
            log::debug!("suppressed {:?} inside debounce window", hit.decoded.text);
            return None;
        }

        play_feedback(self.feedback.as_ref());
        let event = ScanEvent {
            text: hit.decoded.text,
            symbology: hit.decoded.symbology,
            variant: hit.variant,
        };
        self.status.send_modify(|s| {
            s.last_detection = Some(RecentDetection {
                text: event.text.clone(),
                at: now,
            })
        });
        self.channels.emit(event.clone());
        Some(event)
    }
}

/// Sleep for `delay` unless cancelled first. Returns false on cancellation.
async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = cancel.cancelled() => false,
    }
}

struct Running<B: CameraBackend, E: DecodeEngine> {
    handle: JoinHandle<(ScanSession<B, E>, ScanOutcome)>,
    cancel: CancellationToken,
}

/// Runs [`ScanSession`] activations on a background task
pub struct ScanController<B: CameraBackend, E: DecodeEngine> {
    idle: Option<ScanSession<B, E>>,
    running: Option<Running<B, E>>,
}

impl<B: CameraBackend, E: DecodeEngine> ScanController<B, E> {
    /// Wrap an idle session
    pub fn new(session: ScanSession<B, E>) -> Self {
        Self {
            idle: Some(session),
            running: None,
        }
    }

    /// Whether an activation is in flight
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// The session, when no activation is in flight
    pub fn session(&self) -> Option<&ScanSession<B, E>> {
        self.idle.as_ref()
    }

    /// Start an activation, stopping the current one first.
    pub async fn start(&mut self) -> Result<(), ScanError> {
        self.stop().await?;
        let mut session = self
            .idle
            .take()
            .ok_or_else(|| ScanError::Worker("scan session lost".to_string()))?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let outcome = session.run(token).await;
            (session, outcome)
        });
        self.running = Some(Running { handle, cancel });
        Ok(())
    }

    /// Clear the scanning flag without waiting for the task to notice
    pub fn request_stop(&self) {
        if let Some(running) = &self.running {
            running.cancel.cancel();
        }
    }

    /// Stop the activation and wait for the camera to be released.
    ///
    /// Returns the activation's outcome, or `None` if nothing was running.
    pub async fn stop(&mut self) -> Result<Option<ScanOutcome>, ScanError> {
        self.request_stop();
        self.join().await
    }

    /// Wait for the activation to end on its own.
    pub async fn wait(&mut self) -> Result<Option<ScanOutcome>, ScanError> {
        self.join().await
    }

    async fn join(&mut self) -> Result<Option<ScanOutcome>, ScanError> {
        let Some(running) = self.running.take() else {
            return Ok(None);
        };
        match running.handle.await {
            Ok((session, outcome)) => {
                self.idle = Some(session);
                Ok(Some(outcome))
            }
            Err(err) => Err(ScanError::Worker(err.to_string())),
        }
    }
}

impl<B: CameraBackend, E: DecodeEngine> Drop for ScanController<B, E> {
    fn drop(&mut self) {
        self.request_stop();
    }
}
