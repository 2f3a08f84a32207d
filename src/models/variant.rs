use std::fmt;

use super::Frame;

/// Which transform of the working canvas a variant holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Horizontal band `0..3`, top to bottom
    Band(u8),
    /// Full working canvas rotated by the given degrees
    Rotated(i16),
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Band(i) => write!(f, "band{}", i),
            VariantKind::Rotated(deg) => write!(f, "rot{:+}", deg),
        }
    }
}

/// One candidate image for the decode engine. Built fresh every tick.
#[derive(Debug, Clone)]
pub struct FrameVariant {
    /// How this raster was derived
    pub kind: VariantKind,
    /// The raster itself
    pub frame: Frame,
}

impl FrameVariant {
    /// Create a new variant
    pub fn new(kind: VariantKind, frame: Frame) -> Self {
        Self { kind, frame }
    }
}
