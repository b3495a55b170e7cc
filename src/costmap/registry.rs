//! Registration seams for cost functions and generators.
//!
//! This module defines the traits a costmap combines:
//! - [`CostFunction`]: a named spatial preference in `[0, 1]`, multiplied
//!   into the grid by the distribution builder.
//! - [`HeightGenerator`]: deterministic candidate z-values for a point.
//! - [`OrientationGenerator`]: candidate orientations, chained so each
//!   generator sees its predecessor's output.
//!
//! Closures implement [`CostFunction`] directly, so most registrations pass
//! a plain `|x, y| ...`.
use std::collections::HashMap;
use std::sync::Arc;

use glam::DQuat;

/// A scoring function over world coordinates.
///
/// Contract: results lie in `[0, 1]` for every coordinate the grid build
/// evaluates. This is not checked at runtime (debug builds assert); values
/// outside the range make the normalized distribution meaningless.
pub trait CostFunction: Send + Sync {
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Produces candidate z-values for a world point. Deterministic; an empty
/// result means no admissible height (the sampler falls back to `z = 0`).
pub trait HeightGenerator: Send + Sync {
    fn evaluate(&self, x: f64, y: f64) -> Vec<f64>;
}

impl<F> HeightGenerator for F
where
    F: Fn(f64, f64) -> Vec<f64> + Send + Sync,
{
    fn evaluate(&self, x: f64, y: f64) -> Vec<f64> {
        self(x, y)
    }
}

/// Produces candidate orientations for a world point.
///
/// Generators form a chain: the first is called with an empty `prior` slice,
/// each subsequent one with the previous generator's output. Need not be
/// deterministic.
pub trait OrientationGenerator: Send + Sync {
    fn evaluate(&self, x: f64, y: f64, prior: &[DQuat]) -> Vec<DQuat>;
}

impl<F> OrientationGenerator for F
where
    F: Fn(f64, f64, &[DQuat]) -> Vec<DQuat> + Send + Sync,
{
    fn evaluate(&self, x: f64, y: f64, prior: &[DQuat]) -> Vec<DQuat> {
        self(x, y, prior)
    }
}

/// One registered cost function with its name and priority.
#[derive(Clone)]
pub(crate) struct CostFunctionEntry {
    pub name: String,
    pub priority: f64,
    pub function: Arc<dyn CostFunction>,
}

/// Resolves the effective evaluation order of a registered entry list.
///
/// Entries are deduplicated by name (the later registration survives and
/// keeps its own position), then stable-sorted descending by priority so
/// ties preserve registration order.
pub(crate) fn effective_order(entries: &[CostFunctionEntry]) -> Vec<&CostFunctionEntry> {
    let mut last_by_name: HashMap<&str, usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        last_by_name.insert(entry.name.as_str(), index);
    }

    let mut survivors: Vec<&CostFunctionEntry> = entries
        .iter()
        .enumerate()
        .filter(|(index, entry)| last_by_name[entry.name.as_str()] == *index)
        .map(|(_, entry)| entry)
        .collect();

    survivors.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    survivors
}
