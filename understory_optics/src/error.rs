// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported before a traversal starts.

/// Reasons a clustering run is rejected.
///
/// Every check happens up front; once a traversal begins it always completes.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OpticsError {
    /// Epsilon must be finite and strictly positive.
    #[error("epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),
    /// `min_pts` must be at least 1.
    #[error("min_pts must be at least 1")]
    InvalidMinPts,
    /// `min_cluster_size` must be at least 1.
    #[error("min_cluster_size must be at least 1")]
    InvalidMinClusterSize,
    /// No points were supplied.
    #[error("the point set is empty")]
    EmptyInput,
    /// At most `min_pts` points, so no point can have `min_pts` others around it.
    #[error("{len} points cannot contain a core point with min_pts = {min_pts}")]
    TooFewPoints {
        /// Number of points supplied.
        len: usize,
        /// Configured `min_pts`.
        min_pts: usize,
    },
    /// More points than a store can address.
    #[error("{len} points exceed the store capacity")]
    TooManyPoints {
        /// Number of points supplied.
        len: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Input position of the offending point.
        index: usize,
    },
    /// Two points share coordinates while duplicates are rejected.
    #[error("points {first} and {second} share the same coordinates")]
    DuplicatePoint {
        /// Input position of the first occurrence.
        first: usize,
        /// Input position of the repeated point.
        second: usize,
    },
    /// [`DensityClustering::run`][crate::DensityClustering::run] was called before a field was set.
    #[error("no point field has been set")]
    NoField,
}

/// Result alias used throughout the crate.
pub type Result<T, E = OpticsError> = core::result::Result<T, E>;
