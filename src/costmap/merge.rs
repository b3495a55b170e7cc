//! Merging costmap configurations.
//!
//! A merge combines the *configuration* of several costmaps over the same
//! lattice: cost-function entries are concatenated in input order (name
//! duplicates are resolved later-wins at grid-build time, so a later input
//! overrides an earlier one's same-named function), the first registered
//! height generator wins, and orientation chains are concatenated with
//! identity deduplication. Computed grids are not merged; the result builds
//! its own on first read.
use std::sync::Arc;

use crate::costmap::CostMap;
use crate::error::{Error, Result};

/// Merges the configurations of `costmaps` into a fresh [`CostMap`].
///
/// Fails with [`Error::InvalidConfig`] on empty input and with
/// [`Error::GridMismatch`] when the inputs disagree on grid metadata.
pub fn merge(costmaps: &[&CostMap]) -> Result<CostMap> {
    let Some(first) = costmaps.first() else {
        return Err(Error::InvalidConfig("merge requires at least one costmap".into()));
    };

    let metadata = first.metadata;
    for costmap in costmaps {
        if costmap.metadata != metadata {
            return Err(Error::GridMismatch {
                expected: metadata,
                found: costmap.metadata,
            });
        }
    }

    let mut merged = CostMap::new(metadata);
    for costmap in costmaps {
        merged.entries.extend(costmap.entries.iter().cloned());

        if merged.height.is_none() {
            merged.height = costmap.height.clone();
        }

        for generator in &costmap.orientations {
            if !merged
                .orientations
                .iter()
                .any(|existing| Arc::ptr_eq(existing, generator))
            {
                merged.orientations.push(generator.clone());
            }
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use glam::DQuat;

    use super::*;
    use crate::costmap::registry::OrientationGenerator;
    use crate::grid::GridMetadata;

    fn metadata_2x2() -> GridMetadata {
        GridMetadata::new(2.0, 2.0, 1.0, 0.0, 0.0).expect("valid metadata")
    }

    fn corner_mask(x_min: f64, y_min: f64) -> impl Fn(f64, f64) -> f64 + Send + Sync {
        move |x, y| {
            if x >= x_min && y >= y_min {
                1.0
            } else {
                0.5
            }
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(merge(&[]), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn mismatched_metadata_is_rejected() {
        let a = CostMap::new(metadata_2x2());
        let b = CostMap::new(
            GridMetadata::new(4.0, 4.0, 1.0, 0.0, 0.0).expect("valid metadata"),
        );
        assert!(matches!(merge(&[&a, &b]), Err(Error::GridMismatch { .. })));
    }

    #[test]
    fn merged_grid_matches_sequential_registration() {
        let mut a = CostMap::new(metadata_2x2());
        a.register_cost_function("a", 2.0, corner_mask(1.0, 0.0));
        let mut b = CostMap::new(metadata_2x2());
        b.register_cost_function("b", 1.0, corner_mask(0.0, 1.0));

        let merged = merge(&[&a, &b]).expect("merge succeeds");

        let mut sequential = CostMap::new(metadata_2x2());
        sequential.register_cost_function("a", 2.0, corner_mask(1.0, 0.0));
        sequential.register_cost_function("b", 1.0, corner_mask(0.0, 1.0));

        assert_eq!(
            merged.get_cost_grid().expect("merged build succeeds"),
            sequential.get_cost_grid().expect("sequential build succeeds")
        );
    }

    #[test]
    fn later_input_overrides_same_named_function() {
        let mut a = CostMap::new(metadata_2x2());
        a.register_cost_function("shared", 1.0, |_: f64, _: f64| 0.0);
        let mut b = CostMap::new(metadata_2x2());
        b.register_cost_function("shared", 1.0, |_: f64, _: f64| 1.0);

        let merged = merge(&[&a, &b]).expect("merge succeeds");
        let grid = merged.get_cost_grid().expect("build succeeds");
        let sum: f64 = grid.data().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn first_height_generator_wins() {
        let a = CostMap::new(metadata_2x2());
        let mut b = CostMap::new(metadata_2x2());
        b.register_height_generator(|_: f64, _: f64| vec![1.0]);
        let mut c = CostMap::new(metadata_2x2());
        c.register_height_generator(|_: f64, _: f64| vec![2.0]);

        let merged = merge(&[&a, &b, &c]).expect("merge succeeds");
        let heights = merged.height.as_ref().expect("height present").evaluate(0.0, 0.0);
        assert_eq!(heights, vec![1.0]);
    }

    #[test]
    fn orientation_chains_concatenate_with_identity_dedup() {
        let shared: Arc<dyn OrientationGenerator> =
            Arc::new(|_: f64, _: f64, _: &[DQuat]| vec![DQuat::IDENTITY]);
        let extra: Arc<dyn OrientationGenerator> =
            Arc::new(|_: f64, _: f64, _: &[DQuat]| Vec::new());

        let mut a = CostMap::new(metadata_2x2());
        a.register_orientation_generator(shared.clone());
        let mut b = CostMap::new(metadata_2x2());
        b.register_orientation_generator(shared.clone());
        b.register_orientation_generator(extra);

        let merged = merge(&[&a, &b]).expect("merge succeeds");
        assert_eq!(merged.orientations.len(), 2);
        assert!(Arc::ptr_eq(&merged.orientations[0], &shared));
    }

    #[test]
    fn merged_costmap_builds_fresh() {
        let mut a = CostMap::new(metadata_2x2());
        a.register_cost_function("uniform", 1.0, |_: f64, _: f64| 1.0);
        let _ = a.get_cost_grid().expect("build succeeds");

        // Input caches do not leak into the merged instance.
        let merged = merge(&[&a]).expect("merge succeeds");
        assert!(merged.grid.get().is_none());
        assert!(merged.get_cost_grid().is_ok());
    }
}
