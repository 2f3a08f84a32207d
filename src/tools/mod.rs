//! Image-file helpers shared by `scantool`, benches and tests

use crate::models::Frame;
use image::GenericImageView;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

fn max_dim_from_env() -> Option<u32> {
    match env::var("SCAN_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image file as an RGBA frame.
///
/// `SCAN_MAX_DIM` caps the longest side (aspect ratio preserved).
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame, image::ImageError> {
    let img = image::open(path)?;
    let rgba = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgba8(),
        _ => img.to_rgba8(),
    };
    let (width, height) = rgba.dimensions();
    Ok(Frame::from_rgba(width as usize, height as usize, rgba.into_raw()).unwrap_or_default())
}

/// Image files directly inside `dir`, sorted by name
pub fn image_files<P: AsRef<Path>>(dir: P) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Write a frame as PNG
pub fn save_frame<P: AsRef<Path>>(path: P, frame: &Frame) -> Result<(), image::ImageError> {
    let buffer = image::RgbaImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.data().to_vec(),
    )
    .ok_or_else(|| {
        image::ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        ))
    })?;
    buffer.save(path)
}

/// Summary statistics for luma data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumaStats {
    /// Minimum value.
    pub min: u8,
    /// Maximum value.
    pub max: u8,
    /// Average value.
    pub avg: u8,
}

/// Compute min/max/avg for luma values.
pub fn luma_stats(gray: &[u8]) -> LumaStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    LumaStats { min, max, avg }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = env::temp_dir().join(format!("barscan_tools_{nanos}_{sequence}"));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        dir
    }

    #[test]
    fn test_save_then_load_frame() {
        let dir = temp_dir();
        let mut frame = Frame::filled(4, 3, [10, 20, 30, 255]);
        frame.set_pixel(2, 1, [200, 100, 50, 255]);
        let path = dir.join("frame.png");
        save_frame(&path, &frame).unwrap();
        assert_eq!(load_frame(&path).unwrap(), frame);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_image_files_filters_and_sorts() {
        let dir = temp_dir();
        for name in ["b.png", "a.JPG", "notes.txt"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        let files = image_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_luma_stats() {
        let stats = luma_stats(&[0, 100, 200]);
        assert_eq!(stats, LumaStats { min: 0, max: 200, avg: 100 });
        assert_eq!(luma_stats(&[]).avg, 0);
    }
}
