//! Criterion benchmarks for the batch pipeline.
//!
//! Benchmarks:
//! 1. Indicator computation (MACD + DMI/ADX) over one batch
//! 2. Windowed training, sequential vs parallel
//! 3. Full line processing against the in-memory store

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use barcast_core::domain::Bar;
use barcast_core::engine::IndicatorEngine;
use barcast_core::model::WindowedModelTrainer;
use barcast_core::store::MemoryTradeStore;
use barcast_core::Pipeline;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar::new(close, close + 1.5, close - 1.5)
        })
        .collect()
}

fn make_line(n: usize) -> String {
    let rows: Vec<String> = make_bars(n)
        .iter()
        .map(|b| format!(r#"{{"close":{},"high":{},"low":{}}}"#, b.close, b.high, b.low))
        .collect();
    format!("[{}]", rows.join(","))
}

// ── 1. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let engine = IndicatorEngine::default();
    let mut group = c.benchmark_group("indicators");
    for n in [60, 500, 5_000] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| engine.compute(black_box(bars)))
        });
    }
    group.finish();
}

// ── 2. Training ──────────────────────────────────────────────────────

fn bench_training(c: &mut Criterion) {
    let rows = IndicatorEngine::default().compute(&make_bars(500));
    let sequential = WindowedModelTrainer::default();
    let parallel = WindowedModelTrainer::default().with_parallelism(true);

    let mut group = c.benchmark_group("training");
    group.bench_function("sequential", |b| b.iter(|| sequential.train(black_box(&rows))));
    group.bench_function("parallel", |b| b.iter(|| parallel.train(black_box(&rows))));
    group.finish();
}

// ── 3. Full line ─────────────────────────────────────────────────────

fn bench_process_line(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let line = make_line(200);
    c.bench_function("process_line_200", |b| {
        b.iter(|| {
            let mut store = MemoryTradeStore::new();
            pipeline.process_line(black_box(&line), &mut store)
        })
    });
}

criterion_group!(benches, bench_indicators, bench_training, bench_process_line);
criterion_main!(benches);
