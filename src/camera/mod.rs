//! Camera session management
//!
//! The host's capture API sits behind [`CameraBackend`] / [`MediaStream`] /
//! [`MediaTrack`]. [`CameraSession`] owns the one live stream, applies
//! best-effort focus/exposure/zoom enhancements and tears it down on stop.

/// Still-image / recorded-frame backend
pub mod replay;

use std::future::Future;

use crate::channels::ScanChannels;
use crate::config::{ScanConfig, StreamRequest};
use crate::error::ScanError;
use crate::models::Frame;

pub use replay::{ReplayCamera, ReplayStream, ReplayTrack};

/// Which way the requested camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    /// Rear camera
    Environment,
    /// Selfie camera
    User,
}

/// Stream request passed to the backend (all values are "ideal" hints)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    /// Camera direction
    pub facing_mode: FacingMode,
    /// Ideal width
    pub width: u32,
    /// Ideal height
    pub height: u32,
    /// Ideal frame rate
    pub frame_rate: u32,
    /// Capture audio too
    pub audio: bool,
}

impl StreamConstraints {
    /// Rear-facing, video-only request
    pub fn rear_camera(request: &StreamRequest) -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            width: request.width,
            height: request.height,
            frame_rate: request.frame_rate,
            audio: false,
        }
    }
}

/// Focus modes a track may support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Continuous autofocus
    Continuous,
    /// One-shot autofocus
    SingleShot,
    /// Fixed/manual focus
    Manual,
}

/// Exposure modes a track may support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureMode {
    /// Continuous auto-exposure
    Continuous,
    /// Manual exposure
    Manual,
}

/// Supported zoom interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    /// Widest zoom
    pub min: f64,
    /// Tightest zoom
    pub max: f64,
}

impl ZoomRange {
    /// Zoom `ratio` of the way from min to max
    pub fn at(&self, ratio: f64) -> f64 {
        self.min + (self.max - self.min) * ratio
    }
}

/// What a video track reports it can do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackCapabilities {
    /// Supported focus modes
    pub focus_modes: Vec<FocusMode>,
    /// Supported exposure modes
    pub exposure_modes: Vec<ExposureMode>,
    /// Zoom interval, if zoom is supported
    pub zoom: Option<ZoomRange>,
}

/// Constraints requested from a track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackConstraints {
    /// Requested focus mode
    pub focus_mode: Option<FocusMode>,
    /// Requested exposure mode
    pub exposure_mode: Option<ExposureMode>,
    /// Requested zoom level
    pub zoom: Option<f64>,
}

impl TrackConstraints {
    /// Enhancements worth asking for, given what the track supports
    pub fn enhancements(caps: &TrackCapabilities, zoom_ratio: f64) -> Self {
        Self {
            focus_mode: caps
                .focus_modes
                .contains(&FocusMode::Continuous)
                .then_some(FocusMode::Continuous),
            exposure_mode: caps
                .exposure_modes
                .contains(&ExposureMode::Continuous)
                .then_some(ExposureMode::Continuous),
            zoom: caps.zoom.map(|range| range.at(zoom_ratio)),
        }
    }

    /// Nothing requested
    pub fn is_empty(&self) -> bool {
        self.focus_mode.is_none() && self.exposure_mode.is_none() && self.zoom.is_none()
    }
}

/// One track of a live stream
pub trait MediaTrack: Send {
    /// Reported capabilities
    fn capabilities(&self) -> TrackCapabilities;
    /// Apply constraints; the error string is the host's message
    fn apply_constraints(&mut self, constraints: &TrackConstraints) -> Result<(), String>;
    /// Stop the track (idempotent)
    fn stop(&mut self);
}

/// A live stream bound to a video surface
pub trait MediaStream: Send {
    /// Track type
    type Track: MediaTrack;

    /// All tracks, video first
    fn tracks_mut(&mut self) -> &mut [Self::Track];

    /// Resolve once playback has started
    fn play(&mut self) -> impl Future<Output = Result<(), ScanError>> + Send;

    /// Current frame on the surface; zero-sized until metadata is loaded
    fn current_frame(&mut self) -> &Frame;
}

/// Host capture API
pub trait CameraBackend: Send + Sync + 'static {
    /// Stream type
    type Stream: MediaStream + 'static;

    /// Request a stream. Suspends until the user answers any permission prompt.
    fn open(
        &self,
        constraints: &StreamConstraints,
    ) -> impl Future<Output = Result<Self::Stream, ScanError>> + Send;
}

/// Request continuous focus/exposure and a mid-range zoom where supported.
///
/// Returns whether anything was requested.
pub fn apply_enhancements<T: MediaTrack>(track: &mut T, zoom_ratio: f64) -> Result<bool, ScanError> {
    let constraints = TrackConstraints::enhancements(&track.capabilities(), zoom_ratio);
    if constraints.is_empty() {
        return Ok(false);
    }
    log::debug!("applying track constraints {constraints:?}");
    track
        .apply_constraints(&constraints)
        .map(|_| true)
        .map_err(ScanError::EnhancementFailed)
}

/// Camera lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    /// No stream held
    Idle,
    /// Acquisition in progress
    Starting,
    /// Stream playing
    Live,
    /// Tracks being released
    Stopping,
}

/// Owns the live stream for one scanner
pub struct CameraSession<B: CameraBackend> {
    backend: B,
    stream: Option<B::Stream>,
    state: CameraState,
    constraints: StreamConstraints,
    zoom_ratio: f64,
}

impl<B: CameraBackend> CameraSession<B> {
    /// Create an idle session
    pub fn new(backend: B, config: &ScanConfig) -> Self {
        Self {
            backend,
            stream: None,
            state: CameraState::Idle,
            constraints: StreamConstraints::rear_camera(&config.stream),
            zoom_ratio: config.zoom_ratio,
        }
    }

    /// Current state
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// The backend this session opens streams from
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Acquire, play and enhance a fresh stream, stopping any previous one.
    ///
    /// Acquisition/playback failures are returned and leave the session idle.
    /// Enhancement failures only go to the error channel.
    pub async fn start(&mut self, channels: &ScanChannels) -> Result<(), ScanError> {
        self.stop();
        self.state = CameraState::Starting;
        log::info!("requesting camera {:?}", self.constraints);

        let mut stream = match self.backend.open(&self.constraints).await {
            Ok(stream) => stream,
            Err(err) => {
                self.state = CameraState::Idle;
                return Err(err);
            }
        };
        if let Err(err) = stream.play().await {
            stop_tracks(&mut stream);
            self.state = CameraState::Idle;
            return Err(err);
        }

        if let Some(track) = stream.tracks_mut().first_mut() {
            if let Err(err) = apply_enhancements(track, self.zoom_ratio) {
                channels.report(err);
            }
        }

        self.stream = Some(stream);
        self.state = CameraState::Live;
        log::info!("camera live");
        Ok(())
    }

    /// Release every track and detach the surface. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            self.state = CameraState::Stopping;
            stop_tracks(&mut stream);
            log::info!("camera stopped");
        }
        self.state = CameraState::Idle;
    }

    /// Current frame of the live stream, if any
    pub fn frame(&mut self) -> Option<&Frame> {
        self.stream.as_mut().map(|s| s.current_frame())
    }
}

impl<B: CameraBackend> Drop for CameraSession<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn stop_tracks<S: MediaStream>(stream: &mut S) {
    for track in stream.tracks_mut() {
        track.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhancements_follow_capabilities() {
        let caps = TrackCapabilities {
            focus_modes: vec![FocusMode::Manual, FocusMode::Continuous],
            exposure_modes: vec![ExposureMode::Manual],
            zoom: Some(ZoomRange { min: 1.0, max: 6.0 }),
        };
        let c = TrackConstraints::enhancements(&caps, 0.4);
        assert_eq!(c.focus_mode, Some(FocusMode::Continuous));
        assert_eq!(c.exposure_mode, None);
        assert!((c.zoom.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_capabilities_requests_nothing() {
        let c = TrackConstraints::enhancements(&TrackCapabilities::default(), 0.4);
        assert!(c.is_empty());
    }

    #[test]
    fn test_rear_camera_request() {
        let c = StreamConstraints::rear_camera(&StreamRequest::default());
        assert_eq!(c.facing_mode, FacingMode::Environment);
        assert_eq!((c.width, c.height, c.frame_rate), (1920, 1080, 60));
        assert!(!c.audio);
    }
}
