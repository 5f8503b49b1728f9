//! Benchmarks for axis construction and the force simulation.
//!
//! Run with: cargo bench -p beeswarm-layout

use beeswarm_core::record::Record;
use beeswarm_layout::{CategoryAxis, Simulation, SimulationConfig};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn dataset(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let s = ((i * 37) % 200) as f64 / 100.0 - 1.0;
            let o = ((i * 53) % 100) as f64 / 100.0;
            Record::new(MONTHS[i % MONTHS.len()], s, o, format!("tweet {i}"))
        })
        .collect()
}

// ============================================================================
// Axis
// ============================================================================

fn bench_axis_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/axis");
    for n in [100, 1_000, 10_000] {
        let records = dataset(n);
        group.bench_with_input(BenchmarkId::new("build", n), &records, |b, records| {
            b.iter(|| black_box(CategoryAxis::build(records, 410.0)))
        });
    }
    group.finish();
}

// ============================================================================
// Simulation
// ============================================================================

fn bench_single_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/tick");
    let config = SimulationConfig::default().with_seed(42);
    for n in [100, 500, 2_000] {
        let records = dataset(n);
        let axis = CategoryAxis::build(&records, config.inner_height);
        group.bench_with_input(BenchmarkId::new("first", n), &axis, |b, axis| {
            b.iter_batched(
                || Simulation::new(axis, &config),
                |mut sim| {
                    sim.tick();
                    black_box(sim)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_run_to_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/settle");
    group.sample_size(10);
    let config = SimulationConfig::default().with_seed(42);
    for n in [100, 500, 2_000] {
        let records = dataset(n);
        let axis = CategoryAxis::build(&records, config.inner_height);
        group.bench_with_input(BenchmarkId::new("full", n), &axis, |b, axis| {
            b.iter(|| {
                let mut sim = Simulation::new(axis, &config);
                while sim.tick().is_some() {}
                black_box(sim.positions().len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_axis_build, bench_single_tick, bench_run_to_settle);
criterion_main!(benches);
