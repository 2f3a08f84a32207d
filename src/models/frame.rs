/// RGBA8 raster, row-major, 4 bytes per pixel
///
/// Plays the part of a canvas: video frames, the working ROI canvas and every
/// decode variant are all `Frame`s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Bytes per pixel
    pub const CHANNELS: usize = 4;

    /// Create a fully transparent frame
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * Self::CHANNELS],
        }
    }

    /// Create a frame filled with one colour
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * Self::CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self { width, height, data }
    }

    /// Wrap existing RGBA bytes. Returns `None` if the length does not match.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * Self::CHANNELS {
            return None;
        }
        Some(Self { width, height, data })
    }

    /// Expand packed RGB bytes to an opaque RGBA frame
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Option<Self> {
        if rgb.len() != width * height * 3 {
            return None;
        }
        let mut data = Vec::with_capacity(width * height * Self::CHANNELS);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Some(Self { width, height, data })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero (video metadata not loaded yet)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at (x, y); out-of-bounds reads are transparent black
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = (y * self.width + x) * Self::CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Set pixel at (x, y); out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * Self::CHANNELS;
        self.data[idx..idx + Self::CHANNELS].copy_from_slice(&rgba);
    }

    /// Reshape in place, keeping the allocation when it is large enough.
    ///
    /// Contents are unspecified afterwards; callers overwrite every pixel.
    pub fn reshape(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.resize(width * height * Self::CHANNELS, 0);
    }

    /// Allocated capacity in bytes
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Copy a horizontal strip of full rows into a fresh frame.
    ///
    /// The strip is clamped to the frame.
    pub fn rows(&self, y: usize, height: usize) -> Frame {
        let y = y.min(self.height);
        let height = height.min(self.height - y);
        let stride = self.width * Self::CHANNELS;
        Self {
            width: self.width,
            height,
            data: self.data[y * stride..(y + height) * stride].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_expands_alpha() {
        let frame = Frame::from_rgb(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(frame.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(frame.pixel(1, 0), [40, 50, 60, 255]);
        assert!(Frame::from_rgb(2, 2, &[0; 6]).is_none());
    }

    #[test]
    fn test_rows_clamped() {
        let mut frame = Frame::new(3, 4);
        frame.set_pixel(1, 2, [9, 9, 9, 9]);
        let strip = frame.rows(2, 10);
        assert_eq!(strip.width(), 3);
        assert_eq!(strip.height(), 2);
        assert_eq!(strip.pixel(1, 0), [9, 9, 9, 9]);
        assert!(frame.rows(7, 2).is_empty());
    }

    #[test]
    fn test_reshape_keeps_capacity() {
        let mut frame = Frame::new(100, 100);
        let cap = frame.capacity();
        frame.reshape(10, 10);
        assert_eq!(frame.data().len(), 400);
        assert!(frame.capacity() >= cap);
    }
}
