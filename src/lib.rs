//! barscan - live-camera barcode scanning pipeline
//!
//! Takes frames from a camera, crops and enhances a region of interest,
//! slices it into decode variants, runs a multi-format 1D decoder over them
//! and emits debounced results.
//!
//! ```no_run
//! use barscan::{DeviceProfile, HostInfo, ScanConfig, ScanChannels, ScanController, ScanSession};
//! use barscan::camera::ReplayCamera;
//! use barscan::decoder::RxingEngine;
//!
//! # async fn demo(frames: Vec<barscan::Frame>) -> Result<(), barscan::ScanError> {
//! let config = ScanConfig::from_env();
//! let (channels, mut receivers) = ScanChannels::new();
//! let session = ScanSession::new(
//!     ReplayCamera::new(frames),
//!     RxingEngine::from_config(&config),
//!     DeviceProfile::detect(&HostInfo::current()),
//!     &config,
//!     channels,
//! );
//! let mut controller = ScanController::new(session);
//! controller.start().await?;
//! if let Some(event) = receivers.results.recv().await {
//!     println!("scanned {}", event.text);
//! }
//! controller.stop().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Camera acquisition, enhancement and lifecycle
pub mod camera;
/// Result/error/status channels
pub mod channels;
/// Tunables and environment overrides
pub mod config;
/// Result debouncing and audio/haptic feedback
pub mod debounce;
/// Decode engine seam and variant walker
pub mod decoder;
/// Laptop vs mobile classification
pub mod device;
/// Error taxonomy
pub mod error;
/// Core data structures (Frame, FrameVariant, ScanEvent, etc.)
pub mod models;
/// Per-tick ROI / sharpen / slice / rotate pipeline
pub mod pipeline;
/// Consecutive-failure counter and ROI escalation
pub mod retry;
/// Scan loop and background controller
pub mod session;
/// Image-file helpers for the CLI and benches
pub mod tools;
/// Image primitives (luma, sampling, rotation, canvas pool)
pub mod utils;

pub use channels::{ScanChannels, ScanPhase, ScanReceivers, ScanStatus};
pub use config::ScanConfig;
pub use device::{DeviceProfile, HostInfo};
pub use error::{DecodeError, ScanError};
pub use models::{Decoded, Frame, FrameVariant, ScanEvent, Symbology, VariantKind};
pub use session::{ScanController, ScanOutcome, ScanSession};

use decoder::{DecodeAdapter, DecodeEngine, Hit};
use pipeline::{FrameProcessor, TickPlan};
use retry::EscalationLevel;

/// Result of running one pipeline tick over a still image
#[derive(Debug, Clone, Default)]
pub struct FrameScan {
    /// Variants the pipeline produced
    pub variants: usize,
    /// First successful decode, if any
    pub hit: Option<Hit>,
    /// Engine errors other than not-found
    pub errors: Vec<ScanError>,
}

/// Run a single tick over `frame` on the calling thread.
///
/// No camera, debouncing or feedback is involved; this is the pipeline and
/// decode walk exactly as one live tick would run them.
pub fn scan_frame<E: DecodeEngine>(
    frame: &Frame,
    profile: &DeviceProfile,
    engine: E,
    level: EscalationLevel,
) -> FrameScan {
    let mut processor = FrameProcessor::new(profile.clone());
    let TickPlan::Variants(variants) = processor.process(frame, level) else {
        return FrameScan::default();
    };
    let adapter = DecodeAdapter::new(engine);
    let mut errors = Vec::new();
    let hit = adapter.first_hit_blocking(&variants, &mut |err| errors.push(err));
    FrameScan {
        variants: variants.len(),
        hit,
        errors,
    }
}
