//! Per-tick frame pipeline
//!
//! Crop the centred ROI, downscale it onto the reusable working canvas,
//! optionally sharpen, then cut decode variants: three horizontal bands
//! first, followed by rotated copies on desktop-class devices.

/// ROI downscaling onto the working canvas
pub mod resample;
/// 3x3 sharpening convolution
pub mod sharpen;
/// Horizontal band slicing
pub mod slice;

use crate::device::DeviceProfile;
use crate::models::{Frame, FrameVariant, Roi, VariantKind};
use crate::retry::EscalationLevel;
use crate::utils::geometry::rotate_about_center;
use crate::utils::memory_pool::{AllocationStats, CanvasPool};

use resample::{draw_roi_into, scaled_size};
use sharpen::sharpen;
use slice::bands;

/// What one pipeline tick produced
#[derive(Debug)]
pub enum TickPlan {
    /// Video has no dimensions yet; retry on the next animation frame
    NotReady,
    /// Variants to try, in order
    Variants(Vec<FrameVariant>),
}

impl TickPlan {
    /// Number of variants (zero when not ready)
    pub fn len(&self) -> usize {
        match self {
            TickPlan::NotReady => 0,
            TickPlan::Variants(v) => v.len(),
        }
    }

    /// True when there is nothing to decode
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns live frames into decode-ready variants
pub struct FrameProcessor {
    profile: DeviceProfile,
    pool: CanvasPool,
}

impl FrameProcessor {
    /// Create a processor for a device profile
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            pool: CanvasPool::new(),
        }
    }

    /// Device parameters in use
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Working-canvas reuse statistics
    pub fn canvas_stats(&self) -> &AllocationStats {
        self.pool.stats()
    }

    /// ROI for a `width`×`height` frame at the given escalation level
    pub fn roi_for(&self, width: usize, height: usize, level: EscalationLevel) -> Roi {
        let fractions = self.profile.roi(level == EscalationLevel::Widened);
        Roi::centered(width, height, fractions)
    }

    /// Run one tick of the pipeline over `frame`
    pub fn process(&mut self, frame: &Frame, level: EscalationLevel) -> TickPlan {
        if frame.is_empty() {
            return TickPlan::NotReady;
        }
        let roi = self.roi_for(frame.width(), frame.height(), level);
        if roi.is_empty() {
            return TickPlan::NotReady;
        }

        let (cw, ch) = scaled_size(&roi, self.profile.scale);
        let canvas = self.pool.canvas(cw, ch);
        draw_roi_into(frame, &roi, canvas);
        if self.profile.sharpen {
            sharpen(canvas);
        }

        let canvas = self.pool.current();
        let mut variants = bands(canvas);
        for &deg in self.profile.rotations {
            variants.push(FrameVariant::new(
                VariantKind::Rotated(deg),
                rotate_about_center(canvas, deg as f32),
            ));
        }

        log::trace!(
            "tick: frame {}x{} roi {:?} canvas {}x{} -> {} variants",
            frame.width(),
            frame.height(),
            roi,
            cw,
            ch,
            variants.len()
        );
        TickPlan::Variants(variants)
    }
}
