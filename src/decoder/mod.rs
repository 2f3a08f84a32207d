//! Decode engine seam
//!
//! The engine itself is external (rxing by default); this module owns the
//! per-tick policy of walking variants in order and classifying misses.

/// Sequential variant walker
pub mod adapter;
/// rxing-backed engine for the retail 1D formats
pub mod rxing_engine;

use crate::error::DecodeError;
use crate::models::{Decoded, Frame};

pub use adapter::{DecodeAdapter, Hit};
pub use rxing_engine::RxingEngine;

/// A multi-format barcode decoder working on one raster at a time
///
/// Implementations block; the adapter moves each call onto a blocking worker.
pub trait DecodeEngine: Send + Sync + 'static {
    /// Locate and decode a barcode in `frame`.
    ///
    /// Must return [`DecodeError::NotFound`] when nothing is there.
    fn decode(&self, frame: &Frame) -> Result<Decoded, DecodeError>;
}
