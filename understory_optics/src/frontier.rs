// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seed frontier: an indexed min-heap keyed by reachability distance.
//!
//! Each queued point remembers its heap position, so a decrease-key is a
//! sift-up from that position rather than a linear search and reinsert.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::store::PointId;

#[derive(Copy, Clone, Debug)]
struct Slot {
    id: PointId,
    key: f64,
    // Insertion sequence; breaks ties between equal keys.
    seq: u64,
}

impl Slot {
    /// Min-first: smaller reachability pops first, then earlier insertion.
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
            == Ordering::Less
    }
}

/// Points reachable from a processed core point but not yet processed themselves.
///
/// Every point is queued at most once; further improvements go through
/// [`SeedFrontier::decrease_key`].
#[derive(Clone, Debug, Default)]
pub struct SeedFrontier {
    heap: Vec<Slot>,
    // Heap position by `PointId::index`.
    positions: Vec<Option<usize>>,
    next_seq: u64,
}

impl SeedFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frontier sized for ids below `n`.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            heap: Vec::with_capacity(n),
            positions: alloc::vec![None; n],
            next_seq: 0,
        }
    }

    /// Number of queued points.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no point is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `id` is currently queued.
    #[inline]
    pub fn contains(&self, id: PointId) -> bool {
        self.position(id).is_some()
    }

    /// Current key of a queued point.
    pub fn key_of(&self, id: PointId) -> Option<f64> {
        self.position(id).map(|pos| self.heap[pos].key)
    }

    /// Queue `id` with reachability `key`.
    ///
    /// Returns `false`, leaving the frontier untouched, if `id` is already queued.
    pub fn push(&mut self, id: PointId, key: f64) -> bool {
        if self.contains(id) {
            return false;
        }
        if self.positions.len() <= id.index() {
            self.positions.resize(id.index() + 1, None);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let pos = self.heap.len();
        self.heap.push(Slot { id, key, seq });
        self.positions[id.index()] = Some(pos);
        self.sift_up(pos);
        true
    }

    /// Lower the key of a queued point.
    ///
    /// Applied only when `key` is strictly smaller than the current key; returns
    /// whether the frontier changed. The point keeps its original tie-break rank.
    pub fn decrease_key(&mut self, id: PointId, key: f64) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        if key.total_cmp(&self.heap[pos].key) != Ordering::Less {
            return false;
        }
        self.heap[pos].key = key;
        self.sift_up(pos);
        true
    }

    /// Smallest queued key without removing it.
    pub fn peek_min(&self) -> Option<(PointId, f64)> {
        self.heap.first().map(|s| (s.id, s.key))
    }

    /// Remove and return the point with the smallest key.
    pub fn pop_min(&mut self) -> Option<(PointId, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.positions[top.id.index()] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top.id, top.key))
    }

    /// Drop every queued point.
    pub fn clear(&mut self) {
        for s in self.heap.drain(..) {
            self.positions[s.id.index()] = None;
        }
    }

    #[inline]
    fn position(&self, id: PointId) -> Option<usize> {
        self.positions.get(id.index()).copied().flatten()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].id.index()] = Some(a);
        self.positions[self.heap[b].id.index()] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut best = pos;
            if left < len && self.heap[left].precedes(&self.heap[best]) {
                best = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[best]) {
                best = right;
            }
            if best == pos {
                break;
            }
            self.swap(pos, best);
            pos = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SeedFrontier;
    use crate::store::PointId;
    use alloc::vec::Vec;

    fn id(i: usize) -> PointId {
        PointId::new(i)
    }

    fn drain(f: &mut SeedFrontier) -> Vec<(usize, f64)> {
        core::iter::from_fn(|| f.pop_min())
            .map(|(i, k)| (i.index(), k))
            .collect()
    }

    #[test]
    fn pops_in_key_order() {
        let mut f = SeedFrontier::new();
        for (i, k) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 4.0), (4, 2.0)] {
            assert!(f.push(id(i), k));
        }
        assert_eq!(f.len(), 5);
        assert_eq!(f.peek_min(), Some((id(1), 1.0)));
        assert_eq!(
            drain(&mut f),
            [(1, 1.0), (4, 2.0), (2, 3.0), (3, 4.0), (0, 5.0)]
        );
        assert!(f.is_empty());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut f = SeedFrontier::with_capacity(8);
        for i in [6, 2, 7, 0, 3] {
            f.push(id(i), 1.0);
        }
        let order: Vec<_> = drain(&mut f).into_iter().map(|(i, _)| i).collect();
        assert_eq!(order, [6, 2, 7, 0, 3]);
    }

    #[test]
    fn duplicate_push_is_refused() {
        let mut f = SeedFrontier::new();
        assert!(f.push(id(3), 2.0));
        assert!(!f.push(id(3), 1.0));
        assert_eq!(f.len(), 1);
        assert_eq!(f.key_of(id(3)), Some(2.0));
    }

    #[test]
    fn decrease_key_reorders() {
        let mut f = SeedFrontier::new();
        f.push(id(0), 1.0);
        f.push(id(1), 2.0);
        f.push(id(2), 3.0);
        assert!(f.decrease_key(id(2), 0.5));
        assert_eq!(f.key_of(id(2)), Some(0.5));
        assert_eq!(drain(&mut f), [(2, 0.5), (0, 1.0), (1, 2.0)]);
    }

    #[test]
    fn decrease_key_ignores_equal_larger_and_absent() {
        let mut f = SeedFrontier::new();
        f.push(id(0), 1.0);
        assert!(!f.decrease_key(id(0), 1.0));
        assert!(!f.decrease_key(id(0), 4.0));
        assert!(!f.decrease_key(id(9), 0.0));
        assert_eq!(f.key_of(id(0)), Some(1.0));
    }

    #[test]
    fn decrease_key_keeps_tie_break_rank() {
        let mut f = SeedFrontier::new();
        f.push(id(0), 5.0);
        f.push(id(1), 1.0);
        assert!(f.decrease_key(id(0), 1.0 - f64::EPSILON));
        f.push(id(2), 1.0);
        f.push(id(3), 9.0);
        assert!(f.decrease_key(id(3), 1.0));
        let order: Vec<_> = drain(&mut f).into_iter().map(|(i, _)| i).collect();
        assert_eq!(order, [0, 1, 2, 3]);
    }

    #[test]
    fn popped_points_can_be_queued_again() {
        let mut f = SeedFrontier::new();
        f.push(id(1), 1.0);
        assert_eq!(f.pop_min(), Some((id(1), 1.0)));
        assert!(!f.contains(id(1)));
        assert!(f.push(id(1), 2.0));
    }

    #[test]
    fn clear_forgets_positions() {
        let mut f = SeedFrontier::with_capacity(4);
        f.push(id(0), 1.0);
        f.push(id(3), 2.0);
        f.clear();
        assert!(f.is_empty());
        assert!(!f.contains(id(3)));
        assert_eq!(f.pop_min(), None);
    }

    #[test]
    fn many_random_updates_stay_sorted() {
        // Small LCG so the sequence is fixed.
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        let mut next = || {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (state >> 33) as f64
        };
        let mut f = SeedFrontier::new();
        for i in 0..200 {
            f.push(id(i), next());
        }
        for i in (0..200).step_by(3) {
            let k = f.key_of(id(i)).unwrap();
            f.decrease_key(id(i), k / 2.0);
        }
        let keys: Vec<_> = drain(&mut f).into_iter().map(|(_, k)| k).collect();
        assert_eq!(keys.len(), 200);
        assert!(keys.windows(2).all(|w| w[0] <= w[1]), "keys out of order");
    }
}
