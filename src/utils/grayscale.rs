//! Convert RGBA rasters to 8-bit luminance for the decode engine
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
//!
//! Fully transparent pixels read as white, matching how a canvas luminance
//! source treats the empty corners left by rotation.
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Rasters at least this large are converted row-parallel
pub const PARALLEL_THRESHOLD: usize = 256 * 256;

#[inline]
fn luma(px: &[u8]) -> u8 {
    if px[3] == 0 {
        return 0xFF;
    }
    let lum = (COEF_R * px[0] as u32 + COEF_G * px[1] as u32 + COEF_B * px[2] as u32) >> 8;
    lum.min(255) as u8
}

/// Convert RGBA to luma, picking the parallel path for large rasters
pub fn rgba_to_luma(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width * height >= PARALLEL_THRESHOLD {
        return rgba_to_luma_parallel(rgba, width, height);
    }
    let mut gray = vec![0u8; width * height];
    rgba_to_luma_with_buffer(rgba, width, height, &mut gray);
    gray
}

/// Convert RGBA to luma into a pre-allocated buffer (no allocation)
///
/// # Returns
/// Number of pixels written (width * height)
pub fn rgba_to_luma_with_buffer(
    rgba: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
) -> usize {
    let pixel_count = width * height;
    assert!(output.len() >= pixel_count, "Output buffer too small");

    for (out, px) in output[..pixel_count]
        .iter_mut()
        .zip(rgba.chunks_exact(4))
    {
        *out = luma(px);
    }

    pixel_count
}

/// Convert RGBA to luma using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgba_to_luma_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src = &rgba[y * width * 4..(y + 1) * width * 4];
        for (out, px) in row.iter_mut().zip(src.chunks_exact(4)) {
            *out = luma(px);
        }
    });

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_luma() {
        // Pure white
        let gray = rgba_to_luma(&[255, 255, 255, 255], 1, 1);
        assert!(gray[0] >= 254);

        // Pure black
        let gray = rgba_to_luma(&[0, 0, 0, 255], 1, 1);
        assert_eq!(gray[0], 0);

        // Pure green is brighter than pure red
        let red = rgba_to_luma(&[255, 0, 0, 255], 1, 1)[0];
        let green = rgba_to_luma(&[0, 255, 0, 255], 1, 1)[0];
        assert!(red > 0 && red < 255);
        assert!(green > red);
    }

    #[test]
    fn test_transparent_reads_white() {
        let gray = rgba_to_luma(&[0, 0, 0, 0, 0, 0, 0, 255], 2, 1);
        assert_eq!(gray, vec![255, 0]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (w, h) = (37, 23);
        let rgba: Vec<u8> = (0..w * h * 4).map(|i| (i * 7 % 256) as u8).collect();
        let mut serial = vec![0u8; w * h];
        rgba_to_luma_with_buffer(&rgba, w, h, &mut serial);
        assert_eq!(serial, rgba_to_luma_parallel(&rgba, w, h));
    }
}
