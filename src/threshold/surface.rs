//! Threshold surface synthesis: formula dispatch plus border replication.

use rayon::prelude::*;

use super::WindowGeometry;
use super::stats::{GlobalStats, LocalStats};
use crate::config::{Method, ResolvedConfig};

/// Per-pixel threshold grid, fully populated (interior plus replicated
/// border) once built.
#[derive(Debug, Clone, Default)]
pub struct ThresholdSurface {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ThresholdSurface {
    /// Create an empty surface, ready for [`build_surface_into`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Threshold at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// All thresholds, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.values.clear();
        self.values.resize(width * height, 0.0);
    }
}

/// Build a fully populated threshold surface.
pub fn build_surface(
    stats: &LocalStats,
    globals: GlobalStats,
    geom: &WindowGeometry,
    params: &ResolvedConfig,
) -> ThresholdSurface {
    let mut surface = ThresholdSurface::new();
    build_surface_into(stats, globals, geom, params, &mut surface);
    surface
}

/// Like [`build_surface`], reusing the grid in `surface`.
///
/// Interior rows are independent and run in parallel; each writes its own
/// left/right border clamp. The top/bottom replication copies whole rows
/// and must run after the interior pass has produced them.
pub fn build_surface_into(
    stats: &LocalStats,
    globals: GlobalStats,
    geom: &WindowGeometry,
    params: &ResolvedConfig,
    surface: &mut ThresholdSurface,
) {
    let width = stats.width();
    let height = stats.height();
    surface.reset(width, height);

    let mean_plane = stats.mean_plane();
    let std_plane = stats.std_plane();
    let method = params.method;
    let k = params.k;
    let dynamic_range = params.dynamic_range;
    let max_std = globals.max_std;
    let min_intensity = globals.min_intensity as f64;
    let WindowGeometry {
        wxh,
        x_first,
        y_first,
        x_last,
        x_span,
        ..
    } = *geom;

    surface
        .values
        .par_chunks_mut(width)
        .enumerate()
        .skip(y_first)
        .take(geom.interior_rows())
        .for_each(|(y, row)| {
            let mut th = 0.0f64;
            for i in 0..=x_span {
                let x = i + wxh;
                let m = mean_plane[y * width + x];
                let s = std_plane[y * width + x];
                th = match method {
                    Method::Niblack => m + k * s,
                    Method::Sauvola => m * (1.0 + k * (s / dynamic_range - 1.0)),
                    Method::WolfJolion => {
                        // A perfectly uniform image has max_std == 0; the
                        // normalized term then contributes nothing and the
                        // threshold degenerates to the local mean.
                        let norm = if max_std > 0.0 { s / max_std - 1.0 } else { 0.0 };
                        m + k * norm * (m - min_intensity)
                    }
                };
                row[x] = th;
            }

            // Clamp this row's border columns to the nearest interior value
            let first = row[x_first];
            row[..x_first].fill(first);
            row[x_last + 1..].fill(th);
        });

    replicate_vertical(&mut surface.values, width, y_first, geom.y_last);
}

/// Copy the first/last interior rows (left/right clamp included) over the
/// top/bottom border rows; the corner blocks fall out of the combination.
fn replicate_vertical(values: &mut [f64], width: usize, y_first: usize, y_last: usize) {
    if y_first > 0 {
        let (top, rest) = values.split_at_mut(y_first * width);
        let src = &rest[..width];
        for row in top.chunks_mut(width) {
            row.copy_from_slice(src);
        }
    }
    let height = values.len() / width;
    if y_last + 1 < height {
        let (head, tail) = values.split_at_mut((y_last + 1) * width);
        let src = &head[y_last * width..];
        for row in tail.chunks_mut(width) {
            row.copy_from_slice(src);
        }
    }
}
