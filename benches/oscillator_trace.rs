//! Benchmarks for oscillator trace sampling.
//!
//! Run:
//! - cargo bench --bench oscillator_trace

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use minikame::core::oscillator::Oscillator;
use minikame::core::trace::{SideGate, Trace};
use minikame::gait::{GaitDriver, SIDE_BUCKET};

const TICK_LENS: [usize; 3] = [354, 1000, 2000];

fn bench_trace_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_sample");
    group.sample_size(50);

    let osc = Oscillator::new(0.5, std::f64::consts::FRAC_PI_2, 0.1, 500.0, 0.0).unwrap();
    for &ticks in &TICK_LENS {
        let id = BenchmarkId::new("ungated", ticks);
        group.bench_with_input(id, &ticks, |b, &ticks| {
            b.iter(|| black_box(Trace::sample(&osc, black_box(1234.0), ticks, None)));
        });

        let gate = SideGate::new(1, SIDE_BUCKET);
        let id = BenchmarkId::new("gated", ticks);
        group.bench_with_input(id, &ticks, |b, &ticks| {
            b.iter(|| black_box(Trace::sample(&osc, black_box(1234.0), ticks, Some(gate))));
        });
    }

    group.finish();
}

fn bench_driver_step(c: &mut Criterion) {
    let mut driver = GaitDriver::default();
    let mut t = 0.0;
    c.bench_function("driver_step", |b| {
        b.iter(|| {
            t += 16.0;
            black_box(driver.step(black_box(t)));
        });
    });
}

criterion_group!(benches, bench_trace_sample, bench_driver_step);
criterion_main!(benches);
