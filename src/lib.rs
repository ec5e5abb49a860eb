//! docbin - Fast adaptive document binarization
//!
//! A pure Rust implementation of local-statistics image thresholding:
//! Niblack (1986), Sauvola et al. (1997), and Wolf-Jolion (2001). The
//! threshold for each pixel is derived from the mean and standard
//! deviation of a window centered on it, computed in constant time per
//! window via integral images; border pixels whose window would run off
//! the image take the threshold of the nearest interior pixel.
//!
//! # Example
//! ```
//! use docbin::{BinarizeConfig, Method, binarize};
//!
//! let gray = vec![128u8; 64 * 64];
//! let config = BinarizeConfig {
//!     window_width: Some(15),
//!     window_height: Some(15),
//!     ..BinarizeConfig::with_method(Method::Sauvola)
//! };
//! let binary = binarize(&gray, 64, 64, &config).unwrap();
//! assert!(binary.as_bytes().iter().all(|&v| v == 0 || v == 255));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Configuration, method selection, and error types
pub mod config;
/// Core data structures (GrayImage)
pub mod models;
/// The numerical core: integral tables, local stats, threshold surface,
/// final compare
pub mod threshold;
/// File loading/saving and summary statistics for the CLI and tests
pub mod tools;
/// Supporting utilities (memory pool)
pub mod utils;

mod debug;

pub use config::{BinarizeConfig, BinarizeError, Method, ResolvedConfig};
pub use models::GrayImage;
pub use threshold::{GlobalStats, IntegralImage, LocalStats, ThresholdSurface, WindowGeometry};

use threshold::{apply_surface_into, build_surface_into, compute_local_stats_into};
use utils::memory_pool::BufferPool;

/// Binarize a grayscale image.
///
/// # Arguments
/// * `gray` - Grayscale bytes (1 byte per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `config` - Method, sensitivity, and window settings
///
/// # Returns
/// An image of the same dimensions where every sample is 0 or 255.
pub fn binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &BinarizeConfig,
) -> Result<GrayImage, BinarizeError> {
    let mut pool = BufferPool::new();
    let mut out = GrayImage::default();
    binarize_into(gray, width, height, config, &mut pool, &mut out)?;
    Ok(out)
}

/// Binarize using a reusable buffer pool (faster for batch processing).
///
/// Scratch buffers come from `pool` and the result is written into `out`,
/// so repeated calls on similarly sized images allocate nothing.
pub fn binarize_into(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &BinarizeConfig,
    pool: &mut BufferPool,
    out: &mut GrayImage,
) -> Result<(), BinarizeError> {
    let params = prepare(gray, width, height, config)?;
    let geom = WindowGeometry::new(width, height, params.window_width, params.window_height);
    let (integral, stats, surface) = pool.parts();

    integral.compute_into(gray, width, height)?;
    compute_local_stats_into(integral, &geom, stats);
    let globals = GlobalStats::measure(gray, stats);

    if crate::debug::debug_enabled() {
        eprintln!(
            "BINARIZE: {}x{} window {}x{} method {} max_std {:.3}",
            width, height, params.window_width, params.window_height, params.method, globals.max_std
        );
    }

    build_surface_into(stats, globals, &geom, &params, surface);
    apply_surface_into(gray, surface, out);
    Ok(())
}

/// Compute the full threshold surface without applying it.
///
/// Useful for inspecting thresholds directly; [`binarize`] is equivalent
/// to comparing the image against this surface.
pub fn threshold_surface(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &BinarizeConfig,
) -> Result<ThresholdSurface, BinarizeError> {
    let params = prepare(gray, width, height, config)?;
    let geom = WindowGeometry::new(width, height, params.window_width, params.window_height);

    let integral = IntegralImage::compute(gray, width, height)?;
    let stats = threshold::compute_local_stats(&integral, &geom);
    let globals = GlobalStats::measure(gray, &stats);
    Ok(threshold::build_surface(&stats, globals, &geom, &params))
}

fn prepare(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &BinarizeConfig,
) -> Result<ResolvedConfig, BinarizeError> {
    let params = config.resolve(width, height)?;
    if gray.len() != width * height {
        return Err(BinarizeError::BufferSize {
            expected: width * height,
            actual: gray.len(),
        });
    }
    Ok(params)
}

/// Binarizer with fixed configuration and an optional buffer pool
pub struct Binarizer {
    config: BinarizeConfig,
    pool: Option<BufferPool>,
}

impl Binarizer {
    /// Create a binarizer with the given configuration.
    pub fn new(config: BinarizeConfig) -> Self {
        Self { config, pool: None }
    }

    /// Create a binarizer with buffer pooling enabled.
    pub fn with_pool(config: BinarizeConfig) -> Self {
        Self {
            config,
            pool: Some(BufferPool::new()),
        }
    }

    /// Binarize one image with this binarizer's configuration.
    pub fn binarize(
        &mut self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<GrayImage, BinarizeError> {
        match &mut self.pool {
            Some(pool) => {
                let mut out = GrayImage::default();
                binarize_into(gray, width, height, &self.config, pool, &mut out)?;
                Ok(out)
            }
            None => binarize(gray, width, height, &self.config),
        }
    }

    /// Drop pooled buffers, if pooling is enabled.
    pub fn clear_pool(&mut self) {
        if let Some(pool) = &mut self.pool {
            pool.clear();
        }
    }
}

impl Default for Binarizer {
    fn default() -> Self {
        Self::new(BinarizeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binarize_uniform_image() {
        let gray = vec![128u8; 10 * 10];
        let config = BinarizeConfig {
            window_width: Some(3),
            window_height: Some(3),
            ..Default::default()
        };
        let out = binarize(&gray, 10, 10, &config).unwrap();
        assert!(out.as_bytes().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_binarize_rejects_bad_buffer() {
        let config = BinarizeConfig {
            window_width: Some(3),
            window_height: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            binarize(&[0u8; 5], 10, 10, &config),
            Err(BinarizeError::BufferSize { .. })
        ));
    }

    #[test]
    fn test_binarizer_pool_and_plain_agree() {
        let gray: Vec<u8> = (0..400).map(|v| (v % 251) as u8).collect();
        let config = BinarizeConfig {
            window_width: Some(5),
            window_height: Some(5),
            ..Default::default()
        };
        let plain = Binarizer::new(config).binarize(&gray, 20, 20).unwrap();
        let mut pooled = Binarizer::with_pool(config);
        assert_eq!(pooled.binarize(&gray, 20, 20).unwrap(), plain);
        pooled.clear_pool();
        assert_eq!(pooled.binarize(&gray, 20, 20).unwrap(), plain);
    }

    #[test]
    fn test_surface_and_binarize_agree() {
        let gray: Vec<u8> = (0..144).map(|v| (v * 7 % 256) as u8).collect();
        let config = BinarizeConfig {
            window_width: Some(5),
            window_height: Some(3),
            ..Default::default()
        };
        let surface = threshold_surface(&gray, 12, 12, &config).unwrap();
        let out = binarize(&gray, 12, 12, &config).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                let expected = if gray[y * 12 + x] as f64 >= surface.get(x, y) {
                    255
                } else {
                    0
                };
                assert_eq!(out.get(x, y), expected);
            }
        }
    }
}
