//! I/O collaborators for the CLI and integration tests.
//!
//! The numerical core never opens files; loading, saving, and summary
//! statistics live here.

use crate::models::GrayImage;
use image::GenericImageView;
use std::env;
use std::path::Path;

fn max_dim_from_env() -> Option<u32> {
    match env::var("DOCBIN_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as grayscale bytes along with its dimensions.
///
/// Color inputs are converted to luma by the decoder. Set `DOCBIN_MAX_DIM`
/// to downscale oversized inputs on load (0 or unset disables).
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?;
    let gray = if let Some(max_dim) = max_dim_from_env() {
        let (orig_w, orig_h) = img.dimensions();
        let max_side = orig_w.max(orig_h);
        if max_side > max_dim {
            let resized = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
            resized.to_luma8()
        } else {
            img.to_luma8()
        }
    } else {
        img.to_luma8()
    };
    let (width, height) = gray.dimensions();
    Ok((gray.into_raw(), width as usize, height as usize))
}

/// Save a grayscale image; the format is chosen from the file extension.
pub fn save_gray<P: AsRef<Path>>(path: P, img: &GrayImage) -> Result<(), image::ImageError> {
    image::save_buffer(
        path,
        img.as_bytes(),
        img.width() as u32,
        img.height() as u32,
        image::ColorType::L8,
    )
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binarized image.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of foreground (0) pixels.
    pub foreground_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of foreground pixels to total pixels.
    pub foreground_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn gray_stats(gray: &[u8]) -> GrayStats {
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
    GrayStats { min, max, avg }
}

/// Compute foreground pixel stats for a binarized image.
pub fn binary_stats(binary: &GrayImage) -> BinaryStats {
    let foreground = binary
        .as_bytes()
        .iter()
        .filter(|&&v| v == crate::threshold::binarize::LOW)
        .count();
    let total = binary.as_bytes().len();
    let ratio = if total == 0 {
        0.0
    } else {
        foreground as f64 / total as f64
    };
    BinaryStats {
        foreground_pixels: foreground,
        total_pixels: total,
        foreground_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_stats() {
        let stats = gray_stats(&[10, 250, 30, 90]);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 250);
        assert_eq!(stats.avg, 95);
    }

    #[test]
    fn test_gray_stats_empty() {
        let stats = gray_stats(&[]);
        assert_eq!(stats.min, 255);
        assert_eq!(stats.max, 0);
        assert_eq!(stats.avg, 0);
    }

    #[test]
    fn test_binary_stats() {
        let img = GrayImage::from_raw(2, 2, vec![0, 255, 0, 255]).unwrap();
        let stats = binary_stats(&img);
        assert_eq!(stats.foreground_pixels, 2);
        assert_eq!(stats.total_pixels, 4);
        assert_eq!(stats.foreground_ratio, 0.5);
    }
}
