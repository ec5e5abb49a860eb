//! Scratch buffer reuse for batch binarization.
//!
//! One run of the pipeline allocates two integral planes, two stats maps
//! and a threshold surface. When binarizing many pages of similar size the
//! pool keeps those allocations alive between runs.

use crate::threshold::{IntegralImage, LocalStats, ThresholdSurface};

/// Reusable scratch buffers for the binarization pipeline.
#[derive(Debug, Default)]
pub struct BufferPool {
    integral: IntegralImage,
    stats: LocalStats,
    surface: ThresholdSurface,
}

impl BufferPool {
    /// Create a new, empty pool. Buffers grow on first use and are then
    /// retained.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split-borrow all scratch buffers at once.
    pub(crate) fn parts(
        &mut self,
    ) -> (&mut IntegralImage, &mut LocalStats, &mut ThresholdSurface) {
        (&mut self.integral, &mut self.stats, &mut self.surface)
    }

    /// Drop buffer contents, keeping nothing; the next run reallocates.
    pub fn clear(&mut self) {
        self.integral = IntegralImage::new();
        self.stats = LocalStats::new();
        self.surface = ThresholdSurface::new();
    }
}
