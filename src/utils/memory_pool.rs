//! Long-lived working canvas reused across pipeline ticks
//!
//! The ROI is downscaled into the same buffer every tick; only the band and
//! rotation variants are allocated fresh.

use crate::models::Frame;

/// Owner of the reusable working canvas
pub struct CanvasPool {
    canvas: Frame,
    stats: AllocationStats,
}

impl CanvasPool {
    /// Create a pool sized for a 1080p RGBA canvas
    pub fn new() -> Self {
        Self::with_capacity(1920 * 1080 * Frame::CHANNELS)
    }

    /// Create a pool with a custom byte capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let canvas = Frame::from_rgba(0, 0, Vec::with_capacity(capacity)).unwrap_or_default();
        Self {
            canvas,
            stats: AllocationStats::default(),
        }
    }

    /// Borrow the canvas reshaped to `width`×`height`, reusing capacity when possible
    pub fn canvas(&mut self, width: usize, height: usize) -> &mut Frame {
        let bytes = width * height * Frame::CHANNELS;
        if bytes <= self.canvas.capacity() {
            self.stats.record_reuse(bytes);
        } else {
            self.stats.record_growth();
        }
        self.canvas.reshape(width, height);
        &mut self.canvas
    }

    /// The canvas as last written
    pub fn current(&self) -> &Frame {
        &self.canvas
    }

    /// Current byte capacity
    pub fn capacity(&self) -> usize {
        self.canvas.capacity()
    }

    /// Reuse statistics
    pub fn stats(&self) -> &AllocationStats {
        &self.stats
    }

    /// Drop the canvas contents (keeps capacity)
    pub fn clear(&mut self) {
        self.canvas.reshape(0, 0);
    }
}

impl Default for CanvasPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for monitoring allocation patterns
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
    /// Ticks served from existing capacity
    pub reuses: usize,
    /// Ticks that had to grow the buffer
    pub growths: usize,
    /// Bytes served without allocating
    pub total_bytes_reused: usize,
}

impl AllocationStats {
    fn record_reuse(&mut self, bytes: usize) {
        self.reuses += 1;
        self.total_bytes_reused += bytes;
    }

    fn record_growth(&mut self) {
        self.growths += 1;
    }
}
