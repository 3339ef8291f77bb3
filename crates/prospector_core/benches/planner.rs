//! Planner benchmarks for prospector_core.
//!
//! Run with: `cargo bench -p prospector_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use prospector_core::prelude::*;
use prospector_test_utils::fixtures::SnapshotBuilder;

fn crowded_snapshot(size: i32, ships: i32) -> Snapshot {
    let mut builder = SnapshotBuilder::new().size(size, size).fill(150).turn(100);
    for i in 0..ships {
        let x = (i * 7) % size;
        let y = (i * 13) % size;
        builder = builder
            .halite(x, (y + 1) % size, 600)
            .ship(x, y, ((i * 97) % 1000) as u32);
    }
    builder.build()
}

/// Runs planning benchmarks for the prospector_core crate.
pub fn planner_benchmark(c: &mut Criterion) {
    let small = crowded_snapshot(32, 20);
    let large = crowded_snapshot(64, 60);

    c.bench_function("plan_turn_32x32_20_ships", |b| {
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        b.iter(|| planner.plan_turn(black_box(&small)));
    });

    c.bench_function("plan_turn_64x64_60_ships", |b| {
        let mut planner = TurnPlanner::new(StrategyConfig::default());
        b.iter(|| planner.plan_turn(black_box(&large)));
    });
}

criterion_group!(benches, planner_benchmark);
criterion_main!(benches);
