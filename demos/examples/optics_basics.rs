// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step the ordering one run at a time, then compare both extraction policies.
//!
//! Run:
//! - `cargo run -p understory_demos --example optics_basics`

use understory_optics::{Extraction, Metric, OpticsParams, OrderingEngine, Point, extract};

fn main() -> anyhow::Result<()> {
    // Two tight groups, a loose chain between them, and one far outlier.
    let mut points: Vec<Point<f64>> = Vec::new();
    for (cx, cy) in [(0.0, 0.0), (20.0, 0.0)] {
        for i in 0..6 {
            let a = f64::from(i) * core::f64::consts::TAU / 6.0;
            points.push(Point::new(cx + a.cos(), cy + a.sin()));
        }
    }
    for i in 1..4 {
        points.push(Point::new(f64::from(i) * 5.0, 0.0));
    }
    points.push(Point::new(100.0, 100.0));

    let params = OpticsParams::new(6.0, 3)
        .with_metric(Metric::Euclidean)
        .with_min_cluster_size(3);
    let mut engine = OrderingEngine::new(&points, params)?;
    while let Some(run) = engine.next_run() {
        println!(
            "run {:>2}: seed #{:<2} {} point(s)",
            run.run.0,
            run.seed.index(),
            run.len
        );
    }

    let plot = engine.finish();
    println!("\n  id  run  reachability  core");
    for e in &plot {
        let fmt = |d: Option<f64>| d.map_or_else(|| "undefined".to_owned(), |d| format!("{d:.3}"));
        println!(
            "  {:>2}  {:>3}  {:>12}  {}",
            e.id.index(),
            e.run.0,
            fmt(e.reachability),
            fmt(e.core_distance)
        );
    }

    // A tighter cut than epsilon separates the groups the chain joined.
    for (extraction, threshold) in [
        (Extraction::RunBased, params.threshold()),
        (Extraction::ThresholdWalk, params.threshold()),
        (Extraction::ThresholdWalk, 2.0),
    ] {
        let labeling = extract(&plot, extraction, params.min_cluster_size, threshold);
        println!(
            "\n{extraction:?} at {threshold}: {} cluster(s), {} noise",
            labeling.cluster_count(),
            labeling.noise_count()
        );
        println!("labels: {:?}", labeling.labels());
    }
    Ok(())
}
