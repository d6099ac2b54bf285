//! Benchmarks for series processing operations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sensorscope::{locate_nearest, scale_to_range};

fn make_series(len: usize) -> Vec<f64> {
    (0..len).map(|i| 1550.0 + (i as f64 / 25.0).sin()).collect()
}

fn make_compensation(len: usize) -> Vec<f64> {
    (0..len).map(|i| 25.0 + (i as f64 / 300.0).cos()).collect()
}

fn bench_scale_to_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale_to_range");

    for size in [1_000, 10_000, 100_000].iter() {
        let data = make_compensation(*size);
        let reference = make_series(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("rescale", size), size, |b, _| {
            b.iter(|| scale_to_range(black_box(&data), black_box(&reference)).unwrap());
        });
    }

    group.finish();
}

fn bench_locate_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_nearest");

    for size in [1_000, 10_000, 100_000].iter() {
        let raw = make_series(*size);
        let mapping = scale_to_range(&make_compensation(*size), &raw).unwrap();
        let inverse = mapping.inverse.unwrap();
        let cursor_x = *size as f64 / 2.0;

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("dual_curve", size), size, |b, _| {
            b.iter(|| {
                locate_nearest(
                    black_box(cursor_x),
                    black_box(1550.5),
                    &raw,
                    Some(&mapping.scaled),
                    Some(&inverse),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scale_to_range, bench_locate_nearest);
criterion_main!(benches);
