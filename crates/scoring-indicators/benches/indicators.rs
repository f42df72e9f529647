//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scoring_core::{Indicator, PriceSeries};
use scoring_indicators::{compute, Ema, IndicatorParams, Macd, Rsi, Sma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_moving_averages(c: &mut Criterion) {
    let mut group = c.benchmark_group("MovingAverage");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma", size), &data, |b, data| {
            let sma = Sma::new(20);
            b.iter(|| sma.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            let ema = Ema::new(20);
            b.iter(|| ema.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_momentum(c: &mut Criterion) {
    let mut group = c.benchmark_group("Momentum");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("rsi", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("macd_state", size), &data, |b, data| {
            let macd = Macd::new();
            b.iter(|| macd.state(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("Snapshot");
    let params = IndicatorParams::default();

    for size in [250, 1000, 5000].iter() {
        let series = PriceSeries::from_closes(0, 60_000, &generate_test_data(*size))
            .expect("generated series is valid");
        let volumes = vec![1_000.0; *size];

        group.bench_with_input(BenchmarkId::new("compute", size), &series, |b, series| {
            b.iter(|| compute(black_box(series), black_box(&volumes), &params))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_moving_averages, benchmark_momentum, benchmark_snapshot);
criterion_main!(benches);
