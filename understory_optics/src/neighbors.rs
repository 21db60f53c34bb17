// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force neighbor discovery.
//!
//! A query scans every other point of the store once and produces both the
//! epsilon-neighborhood and the `min_pts` nearest candidates, from which the
//! core distance follows.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;

use crate::metric::Metric;
use crate::store::{PointId, PointStore};
use crate::types::Scalar;

/// A point seen from a query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    /// Identity of the neighbor.
    pub id: PointId,
    /// Distance to the query point, in the metric's space.
    pub distance: f64,
}

/// Heap entry ordered farthest-first, so the worst candidate sits on top and is
/// the one evicted when a strictly closer point shows up.
#[derive(Copy, Clone, Debug)]
struct FarthestFirst(Neighbor);

impl PartialEq for FarthestFirst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FarthestFirst {}

impl PartialOrd for FarthestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FarthestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .distance
            .total_cmp(&other.0.distance)
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

/// Result of one neighbor query.
#[derive(Clone, Debug, Default)]
pub struct Neighborhood {
    within: Vec<Neighbor>,
    nearest: SmallVec<[Neighbor; 8]>,
}

impl Neighborhood {
    /// All other points within epsilon, in store input order.
    #[inline]
    pub fn within_epsilon(&self) -> &[Neighbor] {
        &self.within
    }

    /// Up to `min_pts` nearest other points, closest first.
    ///
    /// Candidates are not limited to epsilon; [`core_distance`] applies the radius.
    #[inline]
    pub fn nearest(&self) -> &[Neighbor] {
        &self.nearest
    }

    /// Core distance of the query point, see [`core_distance`].
    #[inline]
    pub fn core_distance(&self, min_pts: usize, threshold: f64) -> Option<f64> {
        core_distance(&self.nearest, min_pts, threshold)
    }
}

/// Scan the store once for the neighbors of `id`.
///
/// `threshold` is epsilon in the metric's space (see [`Metric::threshold`]).
/// The query point itself never appears in the result; other points at the
/// same position do.
pub fn query<T: Scalar>(
    store: &PointStore<T>,
    id: PointId,
    metric: Metric,
    threshold: f64,
    min_pts: usize,
) -> Neighborhood {
    let origin = store.get(id).point();
    let mut within = Vec::new();
    let mut heap: BinaryHeap<FarthestFirst> = BinaryHeap::with_capacity(min_pts + 1);

    for (other, p) in store.others(id) {
        let n = Neighbor {
            id: other,
            distance: metric.distance(origin, p.point()),
        };
        if n.distance <= threshold {
            within.push(n);
        }
        if heap.len() < min_pts {
            heap.push(FarthestFirst(n));
        } else if heap.peek().is_some_and(|worst| n.distance < worst.0.distance) {
            heap.pop();
            heap.push(FarthestFirst(n));
        }
    }

    Neighborhood {
        within,
        nearest: heap.into_sorted_vec().into_iter().map(|c| c.0).collect(),
    }
}

/// Distance to the `min_pts`-th nearest neighbor, if the point is a core point.
///
/// Defined only when `candidates` holds exactly `min_pts` entries and the
/// farthest of them lies within `threshold`; the result is that farthest distance.
pub fn core_distance(candidates: &[Neighbor], min_pts: usize, threshold: f64) -> Option<f64> {
    if min_pts == 0 || candidates.len() != min_pts {
        return None;
    }
    let farthest = candidates
        .iter()
        .map(|n| n.distance)
        .fold(f64::NEG_INFINITY, f64::max);
    (farthest <= threshold).then_some(farthest)
}
