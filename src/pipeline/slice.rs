use crate::models::{Frame, FrameVariant, VariantKind};

/// Bands cut from every working canvas
pub const BAND_COUNT: usize = 3;
/// Height of each band as a fraction of the canvas
pub const BAND_FRACTION: f32 = 0.33;

/// Cut the canvas into [`BAND_COUNT`] equal-height horizontal bands, top first
pub fn bands(canvas: &Frame) -> Vec<FrameVariant> {
    let h = canvas.height();
    let band_h = ((h as f32 * BAND_FRACTION).floor() as usize).clamp(1, h.max(1));
    (0..BAND_COUNT)
        .map(|i| {
            let y = (i * band_h).min(h.saturating_sub(band_h));
            FrameVariant::new(VariantKind::Band(i as u8), canvas.rows(y, band_h))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_equal_bands_in_order() {
        let mut canvas = Frame::new(10, 100);
        canvas.set_pixel(0, 0, [1, 0, 0, 255]);
        canvas.set_pixel(0, 33, [2, 0, 0, 255]);
        canvas.set_pixel(0, 66, [3, 0, 0, 255]);

        let bands = bands(&canvas);
        assert_eq!(bands.len(), 3);
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.kind, VariantKind::Band(i as u8));
            assert_eq!(band.frame.height(), 33);
            assert_eq!(band.frame.width(), 10);
            assert_eq!(band.frame.pixel(0, 0)[0], i as u8 + 1);
        }
    }

    #[test]
    fn test_short_canvas_still_gives_three_bands() {
        let canvas = Frame::new(4, 2);
        let bands = bands(&canvas);
        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.frame.height() == 1));
    }
}
