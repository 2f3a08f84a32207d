use rayon::prelude::*;

use crate::models::{Frame, Roi};
use crate::utils::geometry::sample_bilinear;

/// Working-canvas size for an ROI at the given downscale factor (never zero)
pub fn scaled_size(roi: &Roi, scale: f32) -> (usize, usize) {
    let w = ((roi.width as f32 * scale).round() as usize).max(1);
    let h = ((roi.height as f32 * scale).round() as usize).max(1);
    (w, h)
}

/// Draw the `roi` of `src` onto the whole of `dst`, bilinearly resampled.
///
/// `dst` keeps its current dimensions; every pixel is overwritten.
pub fn draw_roi_into(src: &Frame, roi: &Roi, dst: &mut Frame) {
    let (dw, dh) = (dst.width(), dst.height());
    if dw == 0 || dh == 0 || roi.is_empty() {
        return;
    }
    let sx = roi.width as f32 / dw as f32;
    let sy = roi.height as f32 / dh as f32;

    dst.data_mut()
        .par_chunks_mut(dw * Frame::CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            let src_y = roi.y as f32 + (y as f32 + 0.5) * sy;
            for x in 0..dw {
                let src_x = roi.x as f32 + (x as f32 + 0.5) * sx;
                let px = sample_bilinear(src, src_x, src_y);
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_size() {
        let roi = Roi { x: 0, y: 0, width: 1824, height: 648 };
        assert_eq!(scaled_size(&roi, 0.4), (730, 259));
        let tiny = Roi { x: 0, y: 0, width: 1, height: 1 };
        assert_eq!(scaled_size(&tiny, 0.4), (1, 1));
    }

    #[test]
    fn test_draw_roi_picks_centre_region() {
        // Left half black, right half white
        let mut src = Frame::filled(8, 4, [255, 255, 255, 255]);
        for y in 0..4 {
            for x in 0..4 {
                src.set_pixel(x, y, [0, 0, 0, 255]);
            }
        }
        let roi = Roi { x: 0, y: 0, width: 4, height: 4 };
        let mut dst = Frame::new(2, 2);
        draw_roi_into(&src, &roi, &mut dst);
        assert!(dst.data().chunks_exact(4).all(|px| px[0] < 10 && px[3] == 255));
    }
}
