// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point storage and per-point traversal state.

use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::error::{OpticsError, Result};
use crate::types::{Point, Scalar};

/// Identity handle of a point inside a [`PointStore`].
///
/// Ids are dense: the `i`-th input point gets id `i`, whatever the run order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u32);

impl PointId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Point ids are intentionally 32-bit; stores are bounded by `PointStore::MAX_POINTS`."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the point in the original input sequence.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Provisional run counter assigned while traversing.
///
/// Each outer-loop seed opens a new run; runs are numbered from 1 in discovery order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u32);

/// Order in which the outer loop visits unprocessed points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoreOrder {
    /// Input order.
    #[default]
    Insertion,
    /// Ascending by `x`, then `y`; equal coordinates keep input order.
    Sorted,
    /// A seeded permutation of the input.
    ///
    /// Reproducible for a fixed seed, but two different seeds generally yield
    /// different plots and labels.
    Shuffled {
        /// Seed of the permutation.
        seed: u64,
    },
}

/// Policy for input points with identical coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Duplicates {
    /// Keep them as distinct points; identity, not position, tells them apart.
    #[default]
    Allow,
    /// Reject the input with [`OpticsError::DuplicatePoint`].
    Reject,
}

/// A point together with its traversal state.
#[derive(Clone, Debug)]
pub struct AlgorithmPoint<T> {
    point: Point<T>,
    pub(crate) processed: bool,
    pub(crate) reachability: Option<f64>,
    pub(crate) core_distance: Option<f64>,
    pub(crate) run: Option<RunId>,
    pub(crate) order_index: Option<usize>,
}

impl<T: Copy> AlgorithmPoint<T> {
    fn new(point: Point<T>) -> Self {
        Self {
            point,
            processed: false,
            reachability: None,
            core_distance: None,
            run: None,
            order_index: None,
        }
    }

    /// The wrapped input point.
    #[inline]
    pub const fn point(&self) -> &Point<T> {
        &self.point
    }

    /// Whether the point has been emitted to the reachability plot.
    #[inline]
    pub const fn is_processed(&self) -> bool {
        self.processed
    }

    /// Smallest reachability distance seen so far; `None` while undefined.
    #[inline]
    pub const fn reachability(&self) -> Option<f64> {
        self.reachability
    }

    /// Core distance computed when the point was processed.
    #[inline]
    pub const fn core_distance(&self) -> Option<f64> {
        self.core_distance
    }

    /// Provisional run the point was emitted in.
    #[inline]
    pub const fn run(&self) -> Option<RunId> {
        self.run
    }

    /// Position in the reachability plot, once written.
    #[inline]
    pub const fn order_index(&self) -> Option<usize> {
        self.order_index
    }

    pub(crate) fn mark_processed(&mut self) {
        debug_assert!(!self.processed, "a point must be processed exactly once");
        self.processed = true;
    }
}

/// Owns every [`AlgorithmPoint`] of one run.
#[derive(Clone, Debug)]
pub struct PointStore<T> {
    points: Vec<AlgorithmPoint<T>>,
    order: Vec<PointId>,
}

impl<T: Scalar> PointStore<T> {
    /// Largest number of points a store can address.
    pub const MAX_POINTS: usize = u32::MAX as usize;

    /// Build one [`AlgorithmPoint`] per input point.
    ///
    /// Fails on non-finite coordinates, or on coincident points when
    /// `duplicates` is [`Duplicates::Reject`].
    pub fn load(points: &[Point<T>], order: StoreOrder, duplicates: Duplicates) -> Result<Self> {
        if points.len() > Self::MAX_POINTS {
            return Err(OpticsError::TooManyPoints { len: points.len() });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(OpticsError::NonFiniteCoordinate { index });
        }
        if duplicates == Duplicates::Reject {
            let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(points.len());
            for (i, p) in points.iter().enumerate() {
                match seen.entry(p.coord_key()) {
                    Entry::Occupied(first) => {
                        return Err(OpticsError::DuplicatePoint {
                            first: *first.get(),
                            second: i,
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(i);
                    }
                }
            }
        }

        let mut ids: Vec<PointId> = (0..points.len()).map(PointId::new).collect();
        match order {
            StoreOrder::Insertion => {}
            StoreOrder::Sorted => ids.sort_by(|a, b| {
                let (pa, pb) = (&points[a.index()], &points[b.index()]);
                cmp_coord(pa.x, pb.x).then_with(|| cmp_coord(pa.y, pb.y))
            }),
            StoreOrder::Shuffled { seed } => {
                let mut rng = SmallRng::seed_from_u64(seed);
                ids.shuffle(&mut rng);
            }
        }

        Ok(Self {
            points: points.iter().copied().map(AlgorithmPoint::new).collect(),
            order: ids,
        })
    }
}

/// Orders coordinates natively, so large integers stay distinct.
fn cmp_coord<T: Scalar>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.to_f64().total_cmp(&b.to_f64()))
}

impl<T> PointStore<T> {
    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ids in the configured run order.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.order.iter().copied()
    }

    /// Id at position `pos` of the run order.
    #[inline]
    pub fn id_at(&self, pos: usize) -> Option<PointId> {
        self.order.get(pos).copied()
    }

    /// Access a point by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this store.
    #[inline]
    pub fn get(&self, id: PointId) -> &AlgorithmPoint<T> {
        &self.points[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: PointId) -> &mut AlgorithmPoint<T> {
        &mut self.points[id.index()]
    }

    /// All points with their ids, in input order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &AlgorithmPoint<T>)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId::new(i), p))
    }

    /// All points except `id` itself, in input order.
    ///
    /// Exclusion is by identity: a different point at the same position is kept.
    pub fn others(&self, id: PointId) -> impl Iterator<Item = (PointId, &AlgorithmPoint<T>)> + '_ {
        self.iter().filter(move |(other, _)| *other != id)
    }
}
