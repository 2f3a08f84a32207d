use rayon::prelude::*;

use crate::models::Frame;

/// 3x3 sharpening kernel: centre 6, four-neighbours -1, corners 0
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 6, -1], [0, -1, 0]];

/// Convolve the RGB channels with [`SHARPEN_KERNEL`] in place.
///
/// Border pixels and alpha are left untouched; each output channel is
/// clamped to `0..=255`.
pub fn sharpen(frame: &mut Frame) {
    let (w, h) = (frame.width(), frame.height());
    if w < 3 || h < 3 {
        return;
    }
    let src = frame.data().to_vec();
    let stride = w * Frame::CHANNELS;

    frame
        .data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(1)
        .take(h - 2)
        .for_each(|(y, row)| {
            for x in 1..w - 1 {
                for c in 0..3 {
                    let mut acc = 0i32;
                    for (ky, kernel_row) in SHARPEN_KERNEL.iter().enumerate() {
                        for (kx, &k) in kernel_row.iter().enumerate() {
                            if k == 0 {
                                continue;
                            }
                            let idx = (y + ky - 1) * stride + (x + kx - 1) * 4 + c;
                            acc += k * src[idx] as i32;
                        }
                    }
                    row[x * 4 + c] = acc.clamp(0, 255) as u8;
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_doubles_and_clamps() {
        // 6v - 4v = 2v on a flat field
        let mut frame = Frame::filled(4, 4, [50, 100, 200, 255]);
        sharpen(&mut frame);
        assert_eq!(frame.pixel(1, 1), [100, 200, 255, 255]);
        // Borders untouched
        assert_eq!(frame.pixel(0, 0), [50, 100, 200, 255]);
        assert_eq!(frame.pixel(3, 2), [50, 100, 200, 255]);
    }

    #[test]
    fn test_dark_pixel_next_to_bright_clamps_to_zero() {
        let mut frame = Frame::filled(3, 3, [255, 255, 255, 255]);
        frame.set_pixel(1, 1, [10, 10, 10, 255]);
        sharpen(&mut frame);
        assert_eq!(frame.pixel(1, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_tiny_frames_are_noop() {
        let mut frame = Frame::filled(2, 5, [1, 2, 3, 4]);
        let before = frame.clone();
        sharpen(&mut frame);
        assert_eq!(frame, before);
    }
}
