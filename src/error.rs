//! Error taxonomy for the scanning pipeline
//!
//! Only camera acquisition failures end a session. Everything else is
//! reported through the error channel and the loop keeps going.

use thiserror::Error;

/// Errors surfaced to the embedding application's error channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The user (or platform policy) refused camera access
    #[error("camera permission denied")]
    PermissionDenied,
    /// No capture device matched the requested constraints
    #[error("no camera found")]
    NoCameraFound,
    /// Acquisition or playback failed for another reason
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    /// Focus/exposure/zoom constraints were rejected by the track
    #[error("could not apply camera enhancements: {0}")]
    EnhancementFailed(String),
    /// The decode engine failed with something other than "not found"
    #[error("decode error: {0}")]
    Decode(String),
    /// A background scan or decode task died before reporting back
    #[error("scan worker failed: {0}")]
    Worker(String),
}

impl ScanError {
    /// Whether the error makes continued scanning meaningless.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScanError::PermissionDenied | ScanError::NoCameraFound | ScanError::CameraUnavailable(_)
        )
    }
}

/// Outcome of a failed decode attempt on a single variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No barcode located in the raster. Expected on most variants.
    #[error("no barcode found")]
    NotFound,
    /// Any other engine failure
    #[error("{0}")]
    Other(String),
}

impl From<DecodeError> for ScanError {
    fn from(err: DecodeError) -> Self {
        ScanError::Decode(err.to_string())
    }
}
