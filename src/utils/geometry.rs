//! Geometry utilities: sub-pixel sampling and rotation about the centre
use rayon::prelude::*;

use crate::models::{Frame, Point};

/// Bilinearly sample `frame` at a continuous position.
///
/// Pixel centres sit at `i + 0.5`; positions past the edge clamp to it.
pub fn sample_bilinear(frame: &Frame, x: f32, y: f32) -> [u8; 4] {
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return [0; 4];
    }
    let fx = (x - 0.5).clamp(0.0, (w - 1) as f32);
    let fy = (y - 0.5).clamp(0.0, (h - 1) as f32);
    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let p00 = frame.pixel(x0, y0);
    let p10 = frame.pixel(x1, y0);
    let p01 = frame.pixel(x0, y1);
    let p11 = frame.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
        let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Rotate `src` about its centre onto a canvas of the same size.
///
/// Positive angles turn clockwise on screen (y grows downward). Pixels that
/// map from outside the source stay transparent.
pub fn rotate_about_center(src: &Frame, degrees: f32) -> Frame {
    let (w, h) = (src.width(), src.height());
    let mut out = Frame::new(w, h);
    if src.is_empty() {
        return out;
    }

    let center = Point::new(w as f32 / 2.0, h as f32 / 2.0);
    // Inverse mapping: walk destination pixels, rotate back into the source
    let (sin, cos) = (-degrees).to_radians().sin_cos();

    out.data_mut()
        .par_chunks_mut(w * Frame::CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let dst = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let p = dst.rotate_about(&center, sin, cos);
                if p.x < 0.0 || p.y < 0.0 || p.x >= w as f32 || p.y >= h as f32 {
                    continue;
                }
                let px = sample_bilinear(src, p.x, p.y);
                row[x * 4..x * 4 + 4].copy_from_slice(&px);
            }
        });

    out
}
