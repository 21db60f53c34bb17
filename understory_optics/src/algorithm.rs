// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The density-clustering capability and its OPTICS implementation.

use alloc::vec::Vec;

use tracing::debug;

use crate::engine::{OrderingEngine, ReachabilityPlot};
use crate::error::{OpticsError, Result};
use crate::extract::{Labeling, extract};
use crate::params::OpticsParams;
use crate::store::PointId;
use crate::types::{Point, Scalar};

/// Output of a clustering run.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// The ordered reachability plot.
    pub plot: ReachabilityPlot,
    /// Final labels derived from the plot.
    pub labeling: Labeling,
}

impl Clustering {
    /// Label of the `index`-th input point: `0` for noise, `1..=k` otherwise.
    #[inline]
    pub fn label(&self, index: usize) -> u32 {
        self.labeling.label(PointId::new(index))
    }

    /// Labels of all input points in input order.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        self.labeling.labels()
    }

    /// Number of surviving clusters.
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.labeling.cluster_count()
    }
}

/// A density-based clustering algorithm driven by a host adapter.
///
/// The host hands over the point field, lets the algorithm settle its
/// parameters, and then runs it. Implementations own all state of a run, so
/// two instances never interfere.
pub trait DensityClustering<T: Scalar> {
    /// Replace the point field to cluster.
    fn set_field(&mut self, points: Vec<Point<T>>);

    /// Settle parameters for a field of `point_count` points, given the host's
    /// hint that between `min_clusters` and `max_clusters` clusters are expected.
    ///
    /// Implementations are free to ignore the hint.
    fn find_parameters(&mut self, min_clusters: usize, max_clusters: usize, point_count: usize);

    /// Cluster the current field.
    fn run(&mut self) -> Result<Clustering>;
}

/// OPTICS ordering followed by flat extraction.
///
/// ```rust
/// use understory_optics::{DensityClustering, Metric, Optics, OpticsParams, Point};
///
/// let mut optics = Optics::new(
///     OpticsParams::new(5.0, 3)
///         .with_metric(Metric::Manhattan)
///         .with_min_cluster_size(3),
/// );
/// optics.set_field(vec![
///     Point::new(0_i64, 0),
///     Point::new(0, 1),
///     Point::new(1, 0),
///     Point::new(1, 1),
///     Point::new(100, 100),
/// ]);
/// let clustering = optics.run().unwrap();
/// assert_eq!(clustering.labels(), [1, 1, 1, 1, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct Optics<T> {
    field: Option<Vec<Point<T>>>,
    params: OpticsParams,
}

impl<T> Default for Optics<T> {
    fn default() -> Self {
        Self {
            field: None,
            params: OpticsParams::default(),
        }
    }
}

impl<T: Scalar> Optics<T> {
    /// Create an instance with explicit parameters and no field.
    pub fn new(params: OpticsParams) -> Self {
        Self {
            field: None,
            params,
        }
    }

    /// Current parameters.
    #[inline]
    pub fn params(&self) -> &OpticsParams {
        &self.params
    }

    /// Replace the parameters.
    pub fn set_params(&mut self, params: OpticsParams) {
        self.params = params;
    }

    /// Current field, if one was set.
    pub fn field(&self) -> Option<&[Point<T>]> {
        self.field.as_deref()
    }
}

impl<T: Scalar> DensityClustering<T> for Optics<T> {
    fn set_field(&mut self, points: Vec<Point<T>>) {
        self.field = Some(points);
    }

    /// Install the fixed radius, density, and minimum cluster size of
    /// [`OpticsParams::default`], keeping the other settings.
    ///
    /// The cluster-count hint and the point count are ignored.
    fn find_parameters(&mut self, min_clusters: usize, max_clusters: usize, point_count: usize) {
        let defaults = OpticsParams::default();
        self.params.epsilon = defaults.epsilon;
        self.params.min_pts = defaults.min_pts;
        self.params.min_cluster_size = defaults.min_cluster_size;
        debug!(
            min_clusters,
            max_clusters, point_count, "cluster-count hint ignored; fixed parameters installed"
        );
    }

    fn run(&mut self) -> Result<Clustering> {
        let points = self.field.as_deref().ok_or(OpticsError::NoField)?;
        cluster(points, self.params)
    }
}

/// Order `points` and extract flat clusters in one call.
pub fn cluster<T: Scalar>(points: &[Point<T>], params: OpticsParams) -> Result<Clustering> {
    let plot = OrderingEngine::new(points, params)?.finish();
    let labeling = extract(
        &plot,
        params.extraction,
        params.min_cluster_size,
        params.threshold(),
    );
    Ok(Clustering { plot, labeling })
}
