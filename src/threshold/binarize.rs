//! Final compare pass: image against threshold surface.

use rayon::prelude::*;

use super::surface::ThresholdSurface;
use crate::models::GrayImage;

/// Output sample for pixels at or above their threshold (background).
pub const HIGH: u8 = 255;
/// Output sample for pixels below their threshold (foreground).
pub const LOW: u8 = 0;

/// Compare every pixel against its threshold and produce a two-level image.
pub fn apply_surface(gray: &[u8], surface: &ThresholdSurface) -> GrayImage {
    let mut out = GrayImage::new(0, 0);
    apply_surface_into(gray, surface, &mut out);
    out
}

/// Like [`apply_surface`], writing into an existing image.
///
/// Pure elementwise map over disjoint rows, so rows run in parallel.
pub fn apply_surface_into(gray: &[u8], surface: &ThresholdSurface, out: &mut GrayImage) {
    let width = surface.width();
    let height = surface.height();
    debug_assert_eq!(gray.len(), width * height);
    out.reset(width, height);

    out.as_bytes_mut()
        .par_chunks_mut(width)
        .zip(gray.par_chunks(width))
        .zip(surface.as_slice().par_chunks(width))
        .for_each(|((out_row, gray_row), th_row)| {
            for x in 0..width {
                out_row[x] = if gray_row[x] as f64 >= th_row[x] {
                    HIGH
                } else {
                    LOW
                };
            }
        });
}
