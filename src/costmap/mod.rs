//! Costmap construction and sampling.
//!
//! A [`CostMap`] combines independently registered cost functions into one
//! normalized probability grid over a rectangular lattice and draws
//! weighted-random poses from it. Registration is incremental; the grid is
//! built once on first read and cached for the instance's lifetime.
use std::sync::{Arc, OnceLock};

use glam::{DQuat, DVec3};
use rand::RngCore;
use tracing::trace;

use crate::costmap::builder::build_distribution;
use crate::costmap::registry::{
    CostFunction, CostFunctionEntry, HeightGenerator, OrientationGenerator,
};
use crate::error::{Error, Result};
use crate::grid::{GridMetadata, ProbabilityGrid};
use crate::sampling::poses::PoseSamples;
use crate::sampling::{pick_uniform, CellSampler};

mod builder;
pub mod merge;
pub mod registry;

pub use merge::merge;

/// A costmap: registered cost functions and generators over a grid, plus the
/// lazily built, cached probability distribution.
///
/// The cache is sticky: the first call that needs the grid builds it, and
/// registrations made afterwards do not change the distribution of this
/// instance. Callers that need the late registrations reflected construct a
/// new costmap (or [`merge`] into one). Build errors are cached the same way
/// and replayed to later callers.
pub struct CostMap {
    metadata: GridMetadata,
    entries: Vec<CostFunctionEntry>,
    height: Option<Arc<dyn HeightGenerator>>,
    orientations: Vec<Arc<dyn OrientationGenerator>>,
    grid: OnceLock<Result<ProbabilityGrid>>,
}

impl CostMap {
    /// Creates an empty costmap over the given lattice.
    pub fn new(metadata: GridMetadata) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
            height: None,
            orientations: Vec::new(),
            grid: OnceLock::new(),
        }
    }

    /// Metadata of the underlying lattice.
    pub fn metadata(&self) -> &GridMetadata {
        &self.metadata
    }

    /// Registers a cost function under `name` with the given priority.
    ///
    /// A later registration under the same name replaces the earlier one at
    /// grid-build time. Higher priorities are evaluated first; ties keep
    /// registration order. There is no unregister operation.
    pub fn register_cost_function(
        &mut self,
        name: impl Into<String>,
        priority: f64,
        function: impl CostFunction + 'static,
    ) {
        self.entries.push(CostFunctionEntry {
            name: name.into(),
            priority,
            function: Arc::new(function),
        });
    }

    /// Registers the height generator, replacing any previous one.
    pub fn register_height_generator(&mut self, generator: impl HeightGenerator + 'static) {
        self.height = Some(Arc::new(generator));
    }

    /// Appends an orientation generator to the chain.
    ///
    /// The same generator (by `Arc` identity) is appended at most once;
    /// first-registration order is preserved.
    pub fn register_orientation_generator(&mut self, generator: Arc<dyn OrientationGenerator>) {
        if self
            .orientations
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &generator))
        {
            return;
        }
        self.orientations.push(generator);
    }

    /// Returns the normalized probability grid, building it on first call.
    pub fn get_cost_grid(&self) -> Result<&ProbabilityGrid> {
        self.grid
            .get_or_init(|| build_distribution(&self.metadata, &self.entries))
            .as_ref()
            .map_err(Error::clone)
    }

    /// Probability mass of the cell containing world point `(x, y)`.
    ///
    /// Builds the grid if necessary. Coordinates outside the grid are a
    /// caller error.
    pub fn get_map_value(&self, x: f64, y: f64) -> Result<f64> {
        Ok(self.get_cost_grid()?.value_at_world(x, y))
    }

    /// Draws one weighted-random point from the distribution.
    ///
    /// The cell is drawn with probability equal to its normalized mass and
    /// converted to world coordinates; `z` comes from the height generator
    /// (uniform pick from a non-empty result) or defaults to `0.0`.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> Result<DVec3> {
        let grid = self.get_cost_grid()?;
        let (row, col) = CellSampler::new(grid).sample(rng);
        let point = self.metadata.cell_to_world(row, col);
        let z = self.sample_height(point.x, point.y, rng);
        trace!(row, col, x = point.x, y = point.y, z, "sampled point");

        Ok(DVec3::new(point.x, point.y, z))
    }

    /// Returns a lazy, conceptually infinite stream of weighted-random poses.
    ///
    /// No work happens until the first element is pulled; grid build errors
    /// surface there and fuse the iterator. See [`PoseSamples`].
    pub fn pose_samples<R: RngCore>(&self, rng: R) -> PoseSamples<'_, R> {
        PoseSamples::new(self, rng)
    }

    pub(crate) fn sample_height(&self, x: f64, y: f64, rng: &mut dyn RngCore) -> f64 {
        match &self.height {
            Some(generator) => {
                let candidates = generator.evaluate(x, y);
                pick_uniform(&candidates, rng).copied().unwrap_or(0.0)
            }
            None => 0.0,
        }
    }

    /// Runs the orientation-generator chain at `(x, y)`.
    ///
    /// The first generator sees an empty prior slice; each subsequent one
    /// consumes its predecessor's output. An empty chain or an empty final
    /// result falls back to a single identity orientation.
    pub(crate) fn generate_orientations(&self, x: f64, y: f64) -> Vec<DQuat> {
        let mut current: Vec<DQuat> = Vec::new();
        for generator in &self.orientations {
            current = generator.evaluate(x, y, &current);
        }

        if current.is_empty() {
            vec![DQuat::IDENTITY]
        } else {
            current
        }
    }
}
