//! Local mean/standard-deviation maps from integral tables.

use rayon::prelude::*;

use super::WindowGeometry;
use super::integral::IntegralImage;

/// Per-pixel local statistics, populated on the interior region only.
///
/// Cells outside the interior stay zero; the threshold surface builder
/// covers them by border replication and never reads them.
#[derive(Debug, Clone, Default)]
pub struct LocalStats {
    width: usize,
    height: usize,
    mean: Vec<f64>,
    std_dev: Vec<f64>,
    max_std: f64,
}

impl LocalStats {
    /// Create empty maps, ready for [`compute_local_stats_into`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Map width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Local mean at (x, y). Meaningful on the interior only.
    pub fn mean_at(&self, x: usize, y: usize) -> f64 {
        self.mean[y * self.width + x]
    }

    /// Local standard deviation at (x, y). Meaningful on the interior only.
    pub fn std_at(&self, x: usize, y: usize) -> f64 {
        self.std_dev[y * self.width + x]
    }

    /// Maximum standard deviation over all interior windows.
    pub fn max_std(&self) -> f64 {
        self.max_std
    }

    pub(crate) fn mean_plane(&self) -> &[f64] {
        &self.mean
    }

    pub(crate) fn std_plane(&self) -> &[f64] {
        &self.std_dev
    }

    fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.mean.clear();
        self.mean.resize(width * height, 0.0);
        self.std_dev.clear();
        self.std_dev.resize(width * height, 0.0);
        self.max_std = 0.0;
    }
}

/// Whole-image and whole-run scalar statistics needed by the threshold
/// formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalStats {
    /// Maximum local standard deviation over all interior windows.
    pub max_std: f64,
    /// Minimum pixel intensity of the image.
    pub min_intensity: u8,
    /// Maximum pixel intensity of the image.
    pub max_intensity: u8,
}

impl GlobalStats {
    /// Combine image intensity extrema with the stats pass result.
    pub fn measure(gray: &[u8], stats: &LocalStats) -> Self {
        let (min_intensity, max_intensity) = intensity_extrema(gray);
        Self {
            max_std: stats.max_std(),
            min_intensity,
            max_intensity,
        }
    }
}

/// Min/max pixel intensity over the whole image.
pub fn intensity_extrema(gray: &[u8]) -> (u8, u8) {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

/// Slide the window across the interior and fill the mean/std maps.
pub fn compute_local_stats(integral: &IntegralImage, geom: &WindowGeometry) -> LocalStats {
    let mut stats = LocalStats::new();
    compute_local_stats_into(integral, geom, &mut stats);
    stats
}

/// Like [`compute_local_stats`], reusing the maps in `stats`.
///
/// Each window sum is four table lookups, so advancing the window one
/// column only moves the four corner indices; a whole row costs O(width)
/// regardless of window area. Rows are independent and run in parallel.
pub fn compute_local_stats_into(
    integral: &IntegralImage,
    geom: &WindowGeometry,
    stats: &mut LocalStats,
) {
    let width = integral.width();
    let height = integral.height();
    stats.reset(width, height);

    let pitch = integral.pitch();
    let sum_plane = integral.sum_plane();
    let sq_plane = integral.sum_sq_plane();
    let WindowGeometry {
        winx,
        winy,
        wxh,
        wyh,
        y_first,
        x_span,
        win_area,
        ..
    } = *geom;

    let max_std = stats
        .mean
        .par_chunks_mut(width)
        .zip(stats.std_dev.par_chunks_mut(width))
        .enumerate()
        .skip(y_first)
        .take(geom.interior_rows())
        .map(|(y, (mean_row, std_row))| {
            // Corner offsets into the integral planes for this row's
            // first window; stepping right advances all four by one.
            let top = (y - wyh) * pitch;
            let bottom = (y - wyh + winy) * pitch;
            let mut row_max = 0.0f64;

            for i in 0..=x_span {
                let sum = sum_plane[bottom + i + winx] + sum_plane[top + i]
                    - sum_plane[top + i + winx]
                    - sum_plane[bottom + i];
                let sum_sq = sq_plane[bottom + i + winx] + sq_plane[top + i]
                    - sq_plane[top + i + winx]
                    - sq_plane[bottom + i];

                let mean = sum / win_area;
                let std_dev = ((sum_sq - mean * sum).max(0.0) / win_area).sqrt();

                mean_row[i + wxh] = mean;
                std_row[i + wxh] = std_dev;
                if std_dev > row_max {
                    row_max = std_dev;
                }
            }
            row_max
        })
        .reduce(|| 0.0f64, f64::max);

    stats.max_std = max_std;
}
