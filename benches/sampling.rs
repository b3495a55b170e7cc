use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pose_scatter::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const GRID_CELLS: [usize; 3] = [32, 128, 512];

fn gaussian_costmap(cells: usize) -> CostMap {
    let extent = cells as f64;
    let metadata = GridMetadata::new(extent, extent, 1.0, -extent / 2.0, -extent / 2.0)
        .expect("valid metadata");

    let mut costmap = CostMap::new(metadata);
    let sigma = extent / 4.0;
    costmap.register_cost_function("gaussian", 10.0, move |x: f64, y: f64| {
        (-(x * x + y * y) / (2.0 * sigma * sigma)).exp()
    });
    costmap.register_cost_function("right-half", 5.0, |x: f64, _: f64| {
        if x >= 0.0 {
            1.0
        } else {
            0.5
        }
    });
    costmap
}

fn grid_build_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("costmap/build");

    for &cells in &GRID_CELLS {
        group.bench_with_input(BenchmarkId::from_parameter(cells), &cells, |b, &cells| {
            b.iter(|| {
                let costmap = gaussian_costmap(cells);
                let grid = costmap.get_cost_grid().expect("build succeeds");
                black_box(grid.data().len());
            });
        });
    }

    group.finish();
}

fn pose_sampling_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("costmap/pose_samples");

    for &cells in &GRID_CELLS {
        let costmap = gaussian_costmap(cells);
        let _ = costmap.get_cost_grid().expect("build succeeds");
        let rng = StdRng::seed_from_u64(0xA11CE ^ cells as u64);

        group.bench_with_input(BenchmarkId::from_parameter(cells), &cells, |b, _| {
            let mut samples = costmap.pose_samples(rng.clone());
            b.iter(|| {
                let pose = samples.next().expect("stream is infinite");
                black_box(pose.expect("sampling succeeds").position);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, grid_build_benches, pose_sampling_benches);
criterion_main!(benches);
