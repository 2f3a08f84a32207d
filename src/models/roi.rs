/// Width/height of the region of interest as fractions of the video frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiFractions {
    /// Fraction of the frame width
    pub width: f32,
    /// Fraction of the frame height
    pub height: f32,
}

impl RoiFractions {
    /// Create a new fraction pair
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Centered crop rectangle in video-frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roi {
    /// Left edge
    pub x: usize,
    /// Top edge
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Roi {
    /// Center a rectangle of the given fractions inside a `frame_w`×`frame_h` frame
    pub fn centered(frame_w: usize, frame_h: usize, fractions: RoiFractions) -> Self {
        // Nudge before flooring so 1080 * 0.7 lands on 756, not 755
        let width = ((frame_w as f32 * fractions.width + 1e-3).floor() as usize).min(frame_w);
        let height = ((frame_h as f32 * fractions.height + 1e-3).floor() as usize).min(frame_h);
        Self {
            x: (frame_w - width) / 2,
            y: (frame_h - height) / 2,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
