// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run configuration.

use crate::error::{OpticsError, Result};
use crate::extract::Extraction;
use crate::metric::Metric;
use crate::store::{Duplicates, StoreOrder};

/// Parameters of one OPTICS run.
///
/// The defaults are the fixed triple installed by
/// [`DensityClustering::find_parameters`][crate::DensityClustering::find_parameters]:
/// a wide radius of `1000.0`, `min_pts = 50`, and the same value as the
/// minimum cluster size.
///
/// ```rust
/// use understory_optics::{Extraction, Metric, OpticsParams};
///
/// let params = OpticsParams::new(5.0, 3)
///     .with_metric(Metric::Manhattan)
///     .with_min_cluster_size(3)
///     .with_extraction(Extraction::ThresholdWalk);
/// assert!(params.validate(5).is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OpticsParams {
    /// Neighborhood radius, as a length (not squared, whatever the metric).
    pub epsilon: f64,
    /// Neighbors required, excluding the point itself, for a point to be a core point.
    pub min_pts: usize,
    /// Smallest run that survives extraction as a cluster.
    pub min_cluster_size: usize,
    /// Distance policy.
    pub metric: Metric,
    /// Outer-loop visiting order.
    pub store_order: StoreOrder,
    /// Policy for coincident input points.
    pub duplicates: Duplicates,
    /// How the reachability plot is cut into clusters.
    pub extraction: Extraction,
}

impl Default for OpticsParams {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            min_pts: Self::DEFAULT_MIN_PTS,
            min_cluster_size: Self::DEFAULT_MIN_PTS,
            metric: Metric::default(),
            store_order: StoreOrder::default(),
            duplicates: Duplicates::default(),
            extraction: Extraction::default(),
        }
    }
}

impl OpticsParams {
    /// Radius used by [`OpticsParams::default`].
    pub const DEFAULT_EPSILON: f64 = 1000.0;
    /// `min_pts` (and minimum cluster size) used by [`OpticsParams::default`].
    pub const DEFAULT_MIN_PTS: usize = 50;

    /// Parameters with the given radius and density; the minimum cluster size follows `min_pts`.
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self {
            epsilon,
            min_pts,
            min_cluster_size: min_pts,
            ..Self::default()
        }
    }

    /// Set the minimum cluster size.
    #[must_use]
    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Set the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the outer-loop visiting order.
    #[must_use]
    pub fn with_store_order(mut self, store_order: StoreOrder) -> Self {
        self.store_order = store_order;
        self
    }

    /// Set the duplicate-coordinate policy.
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: Duplicates) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Set the cluster extraction policy.
    #[must_use]
    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Epsilon in the metric's comparison space.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.metric.threshold(self.epsilon)
    }

    /// Check the parameters against a point count before any work is done.
    pub fn validate(&self, point_count: usize) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(OpticsError::InvalidEpsilon(self.epsilon));
        }
        if self.min_pts == 0 {
            return Err(OpticsError::InvalidMinPts);
        }
        if self.min_cluster_size == 0 {
            return Err(OpticsError::InvalidMinClusterSize);
        }
        if point_count == 0 {
            return Err(OpticsError::EmptyInput);
        }
        if point_count <= self.min_pts {
            return Err(OpticsError::TooFewPoints {
                len: point_count,
                min_pts: self.min_pts,
            });
        }
        Ok(())
    }
}
