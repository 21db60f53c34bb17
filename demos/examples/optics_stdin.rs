// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster a point field read from stdin and print one label per point.
//!
//! Input is whitespace separated:
//!
//! ```text
//! find <ci> [to <cj>] clusters <n> points <x1> <y1> ... <xn> <yn>
//! ```
//!
//! The cluster-count hint is handed to the algorithm, which ignores it and
//! installs its fixed parameters. Label `0` is noise.
//!
//! Run:
//! - `echo "find 1 clusters 3 points 0 0 0 1 5 5" | cargo run -p understory_demos --example optics_stdin -- --epsilon 2 --min-pts 1`
//! - `RUST_LOG=understory_optics=debug` shows the per-run trace.

use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, bail, ensure};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_optics::{DensityClustering, Extraction, Metric, Optics, Point, StoreOrder};

#[derive(Parser, Debug)]
#[command(name = "optics_stdin")]
#[command(about = "OPTICS clustering of 2D integer points read from stdin", long_about = None)]
struct Args {
    /// Distance metric.
    #[arg(long, value_enum, default_value_t = MetricArg::SquaredEuclidean)]
    metric: MetricArg,

    /// How the reachability plot is cut into clusters.
    #[arg(long, value_enum, default_value_t = ExtractionArg::RunBased)]
    extraction: ExtractionArg,

    /// Visit points in lexicographic order instead of input order.
    #[arg(long, conflicts_with = "shuffle")]
    sorted: bool,

    /// Visit points in a shuffled order drawn from this seed.
    #[arg(long)]
    shuffle: Option<u64>,

    /// Override the fixed neighborhood radius.
    #[arg(long)]
    epsilon: Option<f64>,

    /// Override the fixed density threshold; also sets the minimum cluster size.
    #[arg(long)]
    min_pts: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MetricArg {
    Manhattan,
    Euclidean,
    SquaredEuclidean,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ExtractionArg {
    RunBased,
    ThresholdWalk,
}

/// A parsed `find` request.
#[derive(Debug)]
struct Request {
    min_clusters: usize,
    max_clusters: usize,
    points: Vec<Point<i64>>,
}

struct Tokens<'a>(std::str::SplitWhitespace<'a>);

impl Tokens<'_> {
    fn word(&mut self, expected: &str) -> anyhow::Result<()> {
        match self.0.next() {
            Some(t) if t == expected => Ok(()),
            Some(t) => bail!("expected `{expected}`, found `{t}`"),
            None => bail!("expected `{expected}`, found end of input"),
        }
    }

    fn number<N: std::str::FromStr>(&mut self, what: &str) -> anyhow::Result<N>
    where
        N::Err: std::error::Error + Send + Sync + 'static,
    {
        let t = self.0.next().with_context(|| format!("missing {what}"))?;
        t.parse().with_context(|| format!("invalid {what} `{t}`"))
    }
}

fn parse_request(input: &str) -> anyhow::Result<Request> {
    let mut tokens = Tokens(input.split_whitespace());
    tokens.word("find")?;
    let min_clusters: usize = tokens.number("cluster count")?;
    let max_clusters = match tokens.0.next() {
        Some("to") => {
            let cj = tokens.number("cluster count")?;
            tokens.word("clusters")?;
            cj
        }
        Some("clusters") => min_clusters,
        other => bail!("expected `to` or `clusters`, found {other:?}"),
    };
    ensure!(
        min_clusters <= max_clusters,
        "cluster range {min_clusters} to {max_clusters} is empty"
    );

    let n: usize = tokens.number("point count")?;
    tokens.word("points")?;
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let x = tokens.number("x coordinate").with_context(|| format!("point {i}"))?;
        let y = tokens.number("y coordinate").with_context(|| format!("point {i}"))?;
        points.push(Point::<i64>::new(x, y));
    }
    Ok(Request {
        min_clusters,
        max_clusters,
        points,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    let request = parse_request(&input)?;
    let point_count = request.points.len();
    info!(
        points = point_count,
        min_clusters = request.min_clusters,
        max_clusters = request.max_clusters,
        "request parsed"
    );

    let mut optics = Optics::<i64>::default();
    optics.set_field(request.points);
    optics.find_parameters(request.min_clusters, request.max_clusters, point_count);

    let mut params = *optics.params();
    if let Some(epsilon) = args.epsilon {
        params.epsilon = epsilon;
    }
    if let Some(min_pts) = args.min_pts {
        params.min_pts = min_pts;
        params.min_cluster_size = min_pts;
    }
    params.metric = match args.metric {
        MetricArg::Manhattan => Metric::Manhattan,
        MetricArg::Euclidean => Metric::Euclidean,
        MetricArg::SquaredEuclidean => Metric::SquaredEuclidean,
    };
    params.extraction = match args.extraction {
        ExtractionArg::RunBased => Extraction::RunBased,
        ExtractionArg::ThresholdWalk => Extraction::ThresholdWalk,
    };
    params.store_order = match (args.sorted, args.shuffle) {
        (_, Some(seed)) => StoreOrder::Shuffled { seed },
        (true, None) => StoreOrder::Sorted,
        (false, None) => StoreOrder::Insertion,
    };
    optics.set_params(params);

    let clustering = optics.run().context("clustering failed")?;
    info!(
        clusters = clustering.cluster_count(),
        noise = clustering.labeling.noise_count(),
        runs = clustering.plot.run_count(),
        "done"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    for label in clustering.labels() {
        writeln!(out, "{label}")?;
    }
    out.flush()?;
    Ok(())
}
