//! Image primitives used by the frame pipeline
//!
//! - Luma conversion for the decode engine
//! - Bilinear sampling and rotation
//! - The reusable working canvas

pub mod geometry;
pub mod grayscale;
pub mod memory_pool;
