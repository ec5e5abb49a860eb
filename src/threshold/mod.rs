//! The numerical core of the binarization pipeline
//!
//! One file per stage, data flowing strictly forward:
//! - Integral tables ([`integral`])
//! - Local mean/std maps and global extrema ([`stats`])
//! - Threshold surface with border replication ([`surface`])
//! - Final 0/255 compare ([`binarize`])

pub mod binarize;
pub mod integral;
pub mod stats;
pub mod surface;

pub use binarize::{apply_surface, apply_surface_into};
pub use integral::IntegralImage;
pub use stats::{
    GlobalStats, LocalStats, compute_local_stats, compute_local_stats_into, intensity_extrema,
};
pub use surface::{ThresholdSurface, build_surface, build_surface_into};

/// Window placement derived from image and window dimensions.
///
/// The interior is the set of pixels whose window fits entirely inside the
/// image: anchored at `(x - wxh, y - wyh)` with truncating half-extents,
/// so even window sizes lean one pixel toward the top-left. The interior
/// is never empty for a valid window (`1 <= win <= image` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    /// Window width in pixels.
    pub winx: usize,
    /// Window height in pixels.
    pub winy: usize,
    /// Truncated half width, `winx / 2`.
    pub wxh: usize,
    /// Truncated half height, `winy / 2`.
    pub wyh: usize,
    /// First interior column.
    pub x_first: usize,
    /// First interior row.
    pub y_first: usize,
    /// Last interior column, `wxh + (width - winx)`.
    pub x_last: usize,
    /// Last interior row, `wyh + (height - winy)`.
    pub y_last: usize,
    /// Window positions per row minus one, `width - winx`.
    pub x_span: usize,
    /// Window area as a float, `winx * winy`.
    pub win_area: f64,
}

impl WindowGeometry {
    /// Compute interior bounds for a window inside an image. The caller
    /// guarantees `1 <= winx <= width` and `1 <= winy <= height`.
    pub fn new(width: usize, height: usize, winx: usize, winy: usize) -> Self {
        debug_assert!(winx >= 1 && winx <= width);
        debug_assert!(winy >= 1 && winy <= height);
        let wxh = winx / 2;
        let wyh = winy / 2;
        let x_span = width - winx;
        let y_span = height - winy;
        Self {
            winx,
            winy,
            wxh,
            wyh,
            x_first: wxh,
            y_first: wyh,
            x_last: wxh + x_span,
            y_last: wyh + y_span,
            x_span,
            win_area: (winx * winy) as f64,
        }
    }

    /// Number of interior rows.
    pub fn interior_rows(&self) -> usize {
        self.y_last - self.y_first + 1
    }
}
