//! Benchmarks for the statevector simulator
//!
//! Run with: cargo bench -p ketline-adapter-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ketline_adapter_sim::Simulator;
use ketline_ir::ops::measure;
use ketline_ir::{Circuit, Gate, InsertStrategy, LineQubit};

/// GHZ preparation followed by a full-register measurement.
fn ghz_measured(n: i32) -> Circuit {
    let mut circuit = Circuit::ghz(n).unwrap();
    circuit
        .push(measure(LineQubit::range(n), Some("m")).unwrap())
        .unwrap();
    circuit
}

/// Benchmark evolving GHZ states of increasing width
fn bench_simulate_ghz(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_ghz");
    let mut sim = Simulator::with_seed(0);

    for n in &[4, 8, 12, 16] {
        let circuit = Circuit::ghz(*n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            b.iter(|| sim.simulate(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the generic unitary path with fractional exponents
fn bench_fractional_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("fractional_layer");
    let mut sim = Simulator::with_seed(0);

    for n in &[4, 8, 12] {
        let mut circuit = Circuit::new();
        circuit
            .append(
                LineQubit::range(*n)
                    .into_iter()
                    .map(|q| Gate::y_pow(0.25).on([q]).unwrap()),
                InsertStrategy::Earliest,
            )
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            b.iter(|| sim.simulate(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark sampling with terminal measurements
fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_ghz");
    let mut sim = Simulator::with_seed(0);

    for repetitions in &[100, 1000, 10000] {
        let circuit = ghz_measured(8);
        group.bench_with_input(
            BenchmarkId::from_parameter(repetitions),
            repetitions,
            |b, &reps| {
                b.iter(|| sim.run(black_box(&circuit), reps).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_simulate_ghz, bench_fractional_layer, bench_run);
criterion_main!(benches);
