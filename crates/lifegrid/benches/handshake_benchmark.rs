//! # Handshake Benchmark
//!
//! Round trip of one frame signal through a live simulation thread: signal,
//! step, and wait until the new generation is visible.

#![allow(missing_docs)]

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lifegrid::{EngineConfig, Pattern, Simulation};

fn bench_frame_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_round_trip");

    for (height, width) in [(8, 8), (66, 160), (256, 256)] {
        let config = EngineConfig {
            height,
            width,
            rng_seed: Some(7),
            ..EngineConfig::default()
        };
        let mut sim = Simulation::new(config).expect("valid config");
        sim.seed(Pattern::Random { one_in: 8 }).expect("valid pattern");
        let running = sim.start().expect("simulation thread starts");

        group.bench_with_input(
            BenchmarkId::new("sync_frame", format!("{height}x{width}")),
            &(height, width),
            |b, _| {
                b.iter(|| {
                    let target = running.generation() + 1;
                    running.sync_frame().expect("loop running");
                    running.wait_for_generation(target, Duration::from_secs(1))
                });
            },
        );

        let _ = running.shutdown();
    }

    group.finish();
}

criterion_group!(benches, bench_frame_round_trip);
criterion_main!(benches);
