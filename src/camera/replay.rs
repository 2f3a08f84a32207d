//! Camera backend that replays a fixed list of frames
//!
//! Stands in for a physical camera in the CLI and in tests: cycles through
//! its frames forever, can report "metadata not loaded" for the first few
//! reads, advertises whatever capabilities it is given and records what the
//! session asked of it.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::{CameraBackend, MediaStream, MediaTrack, StreamConstraints, TrackCapabilities, TrackConstraints};
use crate::error::ScanError;
use crate::models::Frame;
use std::future::Future;

/// Everything the session did to a [`ReplayCamera`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayLog {
    /// Stream requests, in order
    pub requests: Vec<StreamConstraints>,
    /// Constraints passed to `apply_constraints`
    pub applied: Vec<TrackConstraints>,
    /// Tracks stopped
    pub stopped_tracks: usize,
    /// Frames handed out
    pub frames_served: usize,
}

struct Shared {
    frames: Vec<Frame>,
    warmup: usize,
    failure: Option<ScanError>,
    capabilities: TrackCapabilities,
    reject_constraints: Option<String>,
    open_delay: Option<Duration>,
    log: Mutex<ReplayLog>,
}

impl Shared {
    fn log(&self) -> MutexGuard<'_, ReplayLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Replaying camera backend. Clones share the same log.
#[derive(Clone)]
pub struct ReplayCamera {
    shared: Arc<Shared>,
}

impl ReplayCamera {
    /// Camera that cycles through `frames`
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            shared: Arc::new(Shared {
                frames,
                warmup: 0,
                failure: None,
                capabilities: TrackCapabilities::default(),
                reject_constraints: None,
                open_delay: None,
                log: Mutex::new(ReplayLog::default()),
            }),
        }
    }

    fn map(self, f: impl FnOnce(&mut Shared)) -> Self {
        let mut shared = Arc::try_unwrap(self.shared).unwrap_or_else(|arc| Shared {
            frames: arc.frames.clone(),
            warmup: arc.warmup,
            failure: arc.failure.clone(),
            capabilities: arc.capabilities.clone(),
            reject_constraints: arc.reject_constraints.clone(),
            open_delay: arc.open_delay,
            log: Mutex::new(arc.log().clone()),
        });
        f(&mut shared);
        Self {
            shared: Arc::new(shared),
        }
    }

    /// Serve `count` zero-sized frames before the real ones
    pub fn with_warmup(self, count: usize) -> Self {
        self.map(|s| s.warmup = count)
    }

    /// Advertise these track capabilities
    pub fn with_capabilities(self, capabilities: TrackCapabilities) -> Self {
        self.map(|s| s.capabilities = capabilities)
    }

    /// Reject every `apply_constraints` call with `message`
    pub fn rejecting_constraints(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.map(|s| s.reject_constraints = Some(message))
    }

    /// Fail every acquisition with `err`
    pub fn failing_with(self, err: ScanError) -> Self {
        self.map(|s| s.failure = Some(err))
    }

    /// Wait this long before answering an acquisition request
    pub fn with_open_delay(self, delay: Duration) -> Self {
        self.map(|s| s.open_delay = Some(delay))
    }

    /// Snapshot of what has happened so far
    pub fn log(&self) -> ReplayLog {
        self.shared.log().clone()
    }
}

impl CameraBackend for ReplayCamera {
    type Stream = ReplayStream;

    fn open(
        &self,
        constraints: &StreamConstraints,
    ) -> impl Future<Output = Result<ReplayStream, ScanError>> + Send {
        let shared = Arc::clone(&self.shared);
        let constraints = *constraints;
        async move {
            if let Some(delay) = shared.open_delay {
                tokio::time::sleep(delay).await;
            }
            shared.log().requests.push(constraints);
            if let Some(err) = &shared.failure {
                return Err(err.clone());
            }
            Ok(ReplayStream::new(shared))
        }
    }
}

/// Live replay stream
pub struct ReplayStream {
    shared: Arc<Shared>,
    tracks: Vec<ReplayTrack>,
    warmup_left: usize,
    cursor: usize,
    blank: Frame,
}

impl ReplayStream {
    fn new(shared: Arc<Shared>) -> Self {
        Self {
            tracks: vec![ReplayTrack {
                shared: Arc::clone(&shared),
                stopped: false,
            }],
            warmup_left: shared.warmup,
            cursor: 0,
            blank: Frame::default(),
            shared,
        }
    }
}

impl MediaStream for ReplayStream {
    type Track = ReplayTrack;

    fn tracks_mut(&mut self) -> &mut [ReplayTrack] {
        &mut self.tracks
    }

    fn play(&mut self) -> impl Future<Output = Result<(), ScanError>> + Send {
        async { Ok(()) }
    }

    fn current_frame(&mut self) -> &Frame {
        self.shared.log().frames_served += 1;
        if self.warmup_left > 0 || self.shared.frames.is_empty() {
            self.warmup_left = self.warmup_left.saturating_sub(1);
            return &self.blank;
        }
        let idx = self.cursor % self.shared.frames.len();
        self.cursor += 1;
        &self.shared.frames[idx]
    }
}

/// Video track of a [`ReplayStream`]
pub struct ReplayTrack {
    shared: Arc<Shared>,
    stopped: bool,
}

impl MediaTrack for ReplayTrack {
    fn capabilities(&self) -> TrackCapabilities {
        self.shared.capabilities.clone()
    }

    fn apply_constraints(&mut self, constraints: &TrackConstraints) -> Result<(), String> {
        self.shared.log().applied.push(constraints.clone());
        match &self.shared.reject_constraints {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.shared.log().stopped_tracks += 1;
        }
    }
}
