// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_optics --heading-base-level=0

//! Understory OPTICS: density-based cluster ordering of 2D points.
//!
//! OPTICS visits points so that density-connected points end up next to each
//! other, recording for each point the *reachability distance* at which it was
//! reached. The resulting reachability plot can be cut into flat clusters.
//!
//! - [`PointStore`] owns the points and their traversal state; identity is a [`PointId`].
//! - [`Metric`] selects Manhattan, Euclidean, or squared-Euclidean distances at run time.
//! - [`query`] scans the store once for a point's epsilon-neighborhood and its
//!   `min_pts` nearest candidates; [`core_distance`] follows from the latter.
//! - [`SeedFrontier`] is an indexed min-heap with logarithmic decrease-key.
//! - [`OrderingEngine`] drives the traversal and builds the [`ReachabilityPlot`].
//! - [`extract`] turns a plot into a [`Labeling`], either per traversal run or by
//!   walking the plot against epsilon (see [`Extraction`]).
//! - [`Optics`] wires all of it behind the [`DensityClustering`] capability.
//!
//! # Example
//!
//! ```rust
//! use understory_optics::{Metric, OpticsParams, Point, cluster};
//!
//! let points = [
//!     Point::new(0_i64, 0),
//!     Point::new(0, 1),
//!     Point::new(1, 0),
//!     Point::new(1, 1),
//!     Point::new(100, 100),
//! ];
//! let params = OpticsParams::new(5.0, 3)
//!     .with_metric(Metric::Manhattan)
//!     .with_min_cluster_size(3);
//!
//! let clustering = cluster(&points, params).unwrap();
//! assert_eq!(clustering.labels(), [1, 1, 1, 1, 0]);
//! assert_eq!(clustering.plot.len(), points.len());
//! ```
//!
//! The traversal can also be stepped one run at a time, which is the only
//! point where it may be stopped:
//!
//! ```rust
//! use understory_optics::{OrderingEngine, OpticsParams, Point};
//!
//! let points: Vec<_> = (0..8).map(|i| Point::new(i as f64, 0.0)).collect();
//! let mut engine = OrderingEngine::new(&points, OpticsParams::new(1.5, 2)).unwrap();
//! while let Some(run) = engine.next_run() {
//!     assert!(run.len >= 1);
//! }
//! assert!(engine.is_done());
//! ```
//!
//! ## Choices
//!
//! - Neighbor queries never include the query point itself; `min_pts` counts
//!   other points only.
//! - The outer loop follows [`StoreOrder::Insertion`] unless configured otherwise;
//!   [`StoreOrder::Shuffled`] is explicit and seeded.
//! - The traversal only assigns provisional [`RunId`]s; labels are assigned by [`extract`].
//! - Every point is written to the plot when it is processed, reachable or not.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` for dependencies such as `kurbo`.
//! - `libm`: floating-point math through `libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! ### Float semantics
//!
//! Coordinates must be finite; [`PointStore::load`] rejects NaN and infinities.
//! Distances are computed in `f64`.

#![no_std]

extern crate alloc;

mod algorithm;
mod engine;
mod error;
mod extract;
mod frontier;
mod metric;
mod neighbors;
mod params;
mod store;
mod types;

pub use algorithm::{Clustering, DensityClustering, Optics, cluster};
pub use engine::{OrderingEngine, PlotEntry, ReachabilityPlot, RunSummary};
pub use error::{OpticsError, Result};
pub use extract::{Extraction, Labeling, extract};
pub use frontier::SeedFrontier;
pub use metric::Metric;
pub use neighbors::{Neighbor, Neighborhood, core_distance, query};
pub use params::OpticsParams;
pub use store::{AlgorithmPoint, Duplicates, PointId, PointStore, RunId, StoreOrder};
pub use types::{Point, Scalar};
