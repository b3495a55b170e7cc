#![forbid(unsafe_code)]
//! pose_scatter: costmap construction and weighted-random 6-DoF pose sampling.
//!
//! Modules:
//! - grid: lattice metadata and the normalized probability grid
//! - costmap: cost-function registry, distribution builder, merge
//! - sampling: weighted cell draws and the lazy pose stream
//! - pose: the produced pose type
//!
//! Cost functions register spatial preferences in `[0, 1]`; the costmap
//! multiplies them into one normalized distribution and draws poses from it
//! on demand.
pub mod costmap;
pub mod error;
pub mod grid;
pub mod pose;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use pose_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::costmap::registry::{CostFunction, HeightGenerator, OrientationGenerator};
    pub use crate::costmap::{merge, CostMap};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{GridMetadata, ProbabilityGrid};
    pub use crate::pose::Pose;
    pub use crate::sampling::{CellSampler, PoseSamples};
}
