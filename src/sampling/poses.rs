//! Lazy, infinite stream of weighted-random poses drawn from a costmap.
use std::collections::VecDeque;

use glam::DVec3;
use rand::RngCore;

use crate::costmap::CostMap;
use crate::error::Result;
use crate::pose::Pose;
use crate::sampling::CellSampler;

/// Iterator over weighted-random poses from one [`CostMap`].
///
/// Construction performs no work. The first pull builds the probability grid
/// (build failures are yielded once, then the iterator returns `None`) and
/// snapshots it into a cumulative table, so later draws never see functions
/// registered afterwards. Each drawn point expands into one pose per
/// orientation produced by the generator chain, all sharing the point;
/// points are re-drawn indefinitely, so termination is the consumer's
/// responsibility.
pub struct PoseSamples<'a, R: RngCore> {
    costmap: &'a CostMap,
    rng: R,
    sampler: Option<CellSampler>,
    queued: VecDeque<Pose>,
    failed: bool,
}

impl<'a, R: RngCore> PoseSamples<'a, R> {
    pub(crate) fn new(costmap: &'a CostMap, rng: R) -> Self {
        Self {
            costmap,
            rng,
            sampler: None,
            queued: VecDeque::new(),
            failed: false,
        }
    }

    fn draw_next_group(&mut self) {
        let Some(sampler) = &self.sampler else {
            return;
        };

        let (row, col) = sampler.sample(&mut self.rng);
        let point = self.costmap.metadata().cell_to_world(row, col);
        let z = self.costmap.sample_height(point.x, point.y, &mut self.rng);
        let position = DVec3::new(point.x, point.y, z);

        for orientation in self.costmap.generate_orientations(point.x, point.y) {
            self.queued.push_back(Pose::new(position, orientation));
        }
    }
}

impl<R: RngCore> Iterator for PoseSamples<'_, R> {
    type Item = Result<Pose>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if self.sampler.is_none() {
            match self.costmap.get_cost_grid() {
                Ok(grid) => self.sampler = Some(CellSampler::new(grid)),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }

        while self.queued.is_empty() {
            // The chain's identity fallback guarantees progress: every drawn
            // point queues at least one pose.
            self.draw_next_group();
        }

        self.queued.pop_front().map(Ok)
    }
}
