/// RGBA raster
pub mod frame;
/// 2D point
pub mod point;
/// Region-of-interest geometry
pub mod roi;
/// Decode output and accepted detections
pub mod scan_result;
/// Per-tick decode candidates
pub mod variant;

pub use frame::Frame;
pub use point::Point;
pub use roi::{Roi, RoiFractions};
pub use scan_result::{Decoded, ScanEvent, Symbology};
pub use variant::{FrameVariant, VariantKind};
