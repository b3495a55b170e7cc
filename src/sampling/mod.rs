//! Weighted-random sampling from a probability grid.
//!
//! This module provides [`CellSampler`], an inverse-CDF sampler over the
//! cells of a [`ProbabilityGrid`], plus small randomness helpers. Randomness
//! is always injected through [`rand::RngCore`] so tests can drive draws
//! deterministically.
use rand::RngCore;

use crate::grid::ProbabilityGrid;

pub mod poses;

pub use poses::PoseSamples;

/// Inverse-CDF sampler over grid cells.
///
/// Precomputes the cumulative mass table once so repeated draws cost a
/// binary search instead of a full scan.
pub struct CellSampler {
    cumulative: Vec<f64>,
    cols: usize,
}

impl CellSampler {
    /// Builds the cumulative table for the given grid.
    pub fn new(grid: &ProbabilityGrid) -> Self {
        let mut cumulative = Vec::with_capacity(grid.data().len());
        let mut running = 0.0;
        for &cell in grid.data() {
            running += cell;
            cumulative.push(running);
        }

        Self {
            cumulative,
            cols: grid.cols(),
        }
    }

    /// Draws one `(row, col)` cell with probability equal to its mass.
    pub fn sample(&self, rng: &mut dyn RngCore) -> (usize, usize) {
        let roll = rand01(rng);
        // First cell whose cumulative mass exceeds the roll; zero-mass cells
        // share a boundary with their predecessor and are never selected.
        let index = self
            .cumulative
            .partition_point(|&mass| mass <= roll)
            .min(self.cumulative.len().saturating_sub(1));
        (index / self.cols, index % self.cols)
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1_u64 << 53) as f64)
}

/// Pick one element of a non-empty slice uniformly at random.
#[inline]
pub(crate) fn pick_uniform<'a, T>(values: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
    if values.is_empty() {
        return None;
    }
    let index = (rand01(rng) * values.len() as f64) as usize;
    values.get(index.min(values.len() - 1))
}
