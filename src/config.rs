//! Scanner tunables
//!
//! Every constant that shapes the scan loop lives here. `ScanConfig::from_env`
//! lets a deployment nudge the empirical ones without a rebuild.

use std::time::Duration;

use crate::models::Symbology;

fn parse_env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

/// Requested stream shape, passed to the camera backend as "ideal" values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    /// Ideal capture width in pixels
    pub width: u32,
    /// Ideal capture height in pixels
    pub height: u32,
    /// Ideal frames per second
    pub frame_rate: u32,
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frame_rate: 60,
        }
    }
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Minimum gap between two accepted detections
    pub debounce_window: Duration,
    /// How long an accepted detection stays visible in `ScanStatus`
    pub detection_display: Duration,
    /// Failures tolerated before the ROI is widened (strictly greater widens)
    pub widen_after_failures: u32,
    /// Position of the requested zoom between the track's min and max
    pub zoom_ratio: f64,
    /// Stream resolution/frame rate hints
    pub stream: StreamRequest,
    /// Wait used while the video has no dimensions yet (one animation frame)
    pub frame_wait: Duration,
    /// Formats handed to the decode engine
    pub formats: Vec<Symbology>,
    /// Ask the engine to trade latency for accuracy
    pub try_harder: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(1200),
            detection_display: Duration::from_millis(1800),
            widen_after_failures: 12,
            zoom_ratio: 0.4,
            stream: StreamRequest::default(),
            frame_wait: Duration::from_millis(16),
            formats: Symbology::RETAIL.to_vec(),
            try_harder: true,
        }
    }
}

impl ScanConfig {
    /// Defaults with `SCAN_*` environment overrides applied.
    ///
    /// Unparsable values fall back to the default silently.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debounce_window: Duration::from_millis(parse_env_u64(
                "SCAN_DEBOUNCE_MS",
                defaults.debounce_window.as_millis() as u64,
            )),
            detection_display: Duration::from_millis(parse_env_u64(
                "SCAN_DETECTION_DISPLAY_MS",
                defaults.detection_display.as_millis() as u64,
            )),
            widen_after_failures: parse_env_u32("SCAN_WIDEN_AFTER", defaults.widen_after_failures),
            zoom_ratio: parse_env_f64("SCAN_ZOOM_RATIO", defaults.zoom_ratio).clamp(0.0, 1.0),
            try_harder: parse_env_bool_u8("SCAN_TRY_HARDER", defaults.try_harder),
            ..defaults
        }
    }
}
