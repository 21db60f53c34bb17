// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use understory_optics::{
    Extraction, Metric, OpticsParams, OrderingEngine, Point, StoreOrder, cluster, extract,
};

/// `blobs` dense groups of `per_blob` points plus `noise` scattered points.
fn gen_blobs(blobs: usize, per_blob: usize, noise: usize, seed: u64) -> Vec<Point<f64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(blobs * per_blob + noise);
    for b in 0..blobs {
        let cx = (b % 8) as f64 * 500.0;
        let cy = (b / 8) as f64 * 500.0;
        for _ in 0..per_blob {
            out.push(Point::new(
                cx + rng.gen_range(0.0..40.0),
                cy + rng.gen_range(0.0..40.0),
            ));
        }
    }
    for _ in 0..noise {
        out.push(Point::new(
            rng.gen_range(0.0..4000.0),
            rng.gen_range(0.0..4000.0),
        ));
    }
    out
}

fn gen_grid(n: usize, cell: i64) -> Vec<Point<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as i64 * cell, y as i64 * cell));
        }
    }
    out
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");
    for &n in &[100_usize, 400, 1600] {
        let points = gen_blobs(n / 50, 40, n / 5, 0xC0FF_EE00);
        let params = OpticsParams::new(30.0, 8);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("blobs_n{}", points.len()), |b| {
            b.iter(|| {
                let plot = OrderingEngine::new(black_box(&points), params)
                    .unwrap()
                    .finish();
                black_box(plot.len());
            });
        });
    }
    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let points = gen_grid(30, 2);
    group.throughput(Throughput::Elements(points.len() as u64));
    for metric in [Metric::Manhattan, Metric::Euclidean, Metric::SquaredEuclidean] {
        let params = OpticsParams::new(5.0, 6).with_metric(metric);
        group.bench_function(format!("grid_{metric:?}"), |b| {
            b.iter(|| black_box(cluster(black_box(&points), params).unwrap().cluster_count()));
        });
    }
    group.finish();
}

fn bench_store_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_order");
    let points = gen_blobs(8, 50, 100, 7);
    for order in [
        StoreOrder::Insertion,
        StoreOrder::Sorted,
        StoreOrder::Shuffled { seed: 42 },
    ] {
        let params = OpticsParams::new(30.0, 8).with_store_order(order);
        group.bench_function(format!("{order:?}"), |b| {
            b.iter(|| black_box(cluster(black_box(&points), params).unwrap().cluster_count()));
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let points = gen_blobs(16, 60, 200, 99);
    let params = OpticsParams::new(30.0, 8);
    let plot = OrderingEngine::new(&points, params).unwrap().finish();
    group.throughput(Throughput::Elements(plot.len() as u64));
    for extraction in [Extraction::RunBased, Extraction::ThresholdWalk] {
        group.bench_function(format!("{extraction:?}"), |b| {
            b.iter(|| {
                black_box(extract(
                    black_box(&plot),
                    extraction,
                    params.min_cluster_size,
                    params.threshold(),
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ordering,
    bench_metrics,
    bench_store_order,
    bench_extract
);
criterion_main!(benches);
