//! Criterion benchmarks for the forecaster and payload parsing.
//!
//! Benchmarks:
//! 1. AR(1) fit over compact (100) and full-history (5000) windows
//! 2. Parsing a daily payload into a TimeSeries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{Map, Value};

use tickercast_core::data::parse_series;
use tickercast_core::{fit_ar1, forecast, SeriesKind, Ticker};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.01)
        .collect()
}

fn make_daily_payload(n: usize) -> Value {
    let start = chrono::NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let mut series = Map::new();
    for (i, close) in make_closes(n).into_iter().enumerate() {
        let date = start + chrono::Duration::days(i as i64);
        let mut entry = Map::new();
        entry.insert("4. close".into(), Value::String(format!("{close:.4}")));
        series.insert(date.format("%Y-%m-%d").to_string(), Value::Object(entry));
    }
    let mut root = Map::new();
    root.insert("Time Series (Daily)".into(), Value::Object(series));
    Value::Object(root)
}

// ── 1. Fit ───────────────────────────────────────────────────────────

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_ar1");
    for n in [100usize, 5000] {
        let closes = make_closes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &closes, |b, closes| {
            b.iter(|| fit_ar1(black_box(closes)))
        });
    }
    group.finish();

    let closes = make_closes(100);
    c.bench_function("forecast_100", |b| b.iter(|| forecast(black_box(&closes))));
}

// ── 2. Parse ─────────────────────────────────────────────────────────

fn bench_parse(c: &mut Criterion) {
    let payload = make_daily_payload(5000);
    let ticker = Ticker::parse("IBM").unwrap();
    c.bench_function("parse_daily_5000", |b| {
        b.iter(|| parse_series(black_box(&ticker), SeriesKind::Daily, black_box(&payload)))
    });
}

criterion_group!(benches, bench_fit, bench_parse);
criterion_main!(benches);
