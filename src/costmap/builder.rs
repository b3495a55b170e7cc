//! Distribution builder: combines registered cost functions into one
//! normalized probability grid.
//!
//! The combination is multiplicative: every cell starts at `1.0` and each
//! cost function's value at the cell's world coordinates is multiplied in,
//! in effective registration order (see
//! [`effective_order`](crate::costmap::registry::effective_order)). The
//! result is normalized to sum to one.
use tracing::debug;

use crate::costmap::registry::{effective_order, CostFunctionEntry};
use crate::error::{Error, Result};
use crate::grid::{GridMetadata, ProbabilityGrid};

/// Builds the normalized probability grid for the given entry list.
///
/// Fails with [`Error::NoCostFunctions`] when no functions are registered
/// and with [`Error::DegenerateDistribution`] when the combined grid has no
/// probability mass left.
pub(crate) fn build_distribution(
    metadata: &GridMetadata,
    entries: &[CostFunctionEntry],
) -> Result<ProbabilityGrid> {
    if entries.is_empty() {
        return Err(Error::NoCostFunctions);
    }

    let order = effective_order(entries);
    let rows = metadata.rows();
    let cols = metadata.cols();
    debug!(
        functions = order.len(),
        rows, cols, "building probability grid"
    );

    let mut data = vec![1.0_f64; rows * cols];
    for entry in &order {
        for row in 0..rows {
            for col in 0..cols {
                let point = metadata.cell_to_world(row, col);
                let value = entry.function.evaluate(point.x, point.y);
                debug_assert!(
                    (0.0..=1.0).contains(&value),
                    "cost function '{}' returned {} at ({}, {})",
                    entry.name,
                    value,
                    point.x,
                    point.y
                );
                data[row * cols + col] *= value;
            }
        }
    }

    let mass: f64 = data.iter().sum();
    debug!(mass, "combined grid mass before normalization");
    if mass == 0.0 {
        return Err(Error::DegenerateDistribution);
    }

    for cell in &mut data {
        *cell /= mass;
    }

    Ok(ProbabilityGrid::new(*metadata, data))
}
