// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordering traversal that builds the reachability plot.

use alloc::vec::Vec;

use tracing::{debug, debug_span};

use crate::error::Result;
use crate::frontier::SeedFrontier;
use crate::neighbors::{self, Neighborhood};
use crate::params::OpticsParams;
use crate::store::{PointId, PointStore, RunId};
use crate::types::{Point, Scalar};

/// One emitted point of the reachability plot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlotEntry {
    /// The emitted point.
    pub id: PointId,
    /// Reachability when emitted; `None` only for the seed of a run.
    pub reachability: Option<f64>,
    /// Core distance of the point; `None` if it is not a core point.
    pub core_distance: Option<f64>,
    /// Provisional run the point was emitted in.
    pub run: RunId,
}

/// Points in traversal order with their reachability distances.
///
/// Append-only while the traversal runs; once complete it holds every input
/// point exactly once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReachabilityPlot {
    entries: Vec<PlotEntry>,
    runs: u32,
    // Size of the store the plot was built from.
    points: usize,
}

impl ReachabilityPlot {
    fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            runs: 0,
            points: n,
        }
    }

    /// Number of points in the store being ordered, emitted or not.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points
    }

    /// Whether every point of the store has been emitted.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.points
    }

    /// Number of emitted points.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been emitted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in emission order.
    #[inline]
    pub fn entries(&self) -> &[PlotEntry] {
        &self.entries
    }

    /// Iterate entries in emission order.
    pub fn iter(&self) -> core::slice::Iter<'_, PlotEntry> {
        self.entries.iter()
    }

    /// Number of runs started so far.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs as usize
    }

    /// Emission order as point ids.
    pub fn ordering(&self) -> impl Iterator<Item = PointId> + '_ {
        self.entries.iter().map(|e| e.id)
    }
}

impl<'a> IntoIterator for &'a ReachabilityPlot {
    type Item = &'a PlotEntry;
    type IntoIter = core::slice::Iter<'a, PlotEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Summary of one completed run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Provisional id of the run.
    pub run: RunId,
    /// Outer-loop point that opened the run.
    pub seed: PointId,
    /// Points emitted by the run, seed included.
    pub len: usize,
}

/// Drives the OPTICS traversal over one [`PointStore`].
///
/// The engine owns its store, frontier, and plot; independent engines share
/// nothing. Runs are the only interruption points: [`OrderingEngine::next_run`]
/// always drains the frontier before returning.
#[derive(Debug)]
pub struct OrderingEngine<T> {
    store: PointStore<T>,
    params: OpticsParams,
    threshold: f64,
    frontier: SeedFrontier,
    plot: ReachabilityPlot,
    cursor: usize,
}

impl<T: Scalar> OrderingEngine<T> {
    /// Validate `params`, load `points`, and prepare a traversal.
    pub fn new(points: &[Point<T>], params: OpticsParams) -> Result<Self> {
        params.validate(points.len())?;
        let store = PointStore::load(points, params.store_order, params.duplicates)?;
        Self::from_store(store, params)
    }

    /// Prepare a traversal over an already loaded store.
    ///
    /// The store must be fresh: no point processed yet.
    pub fn from_store(store: PointStore<T>, params: OpticsParams) -> Result<Self> {
        params.validate(store.len())?;
        debug_assert!(
            store.iter().all(|(_, p)| !p.is_processed()),
            "an ordering engine needs an unprocessed store"
        );
        debug!(
            points = store.len(),
            epsilon = params.epsilon,
            min_pts = params.min_pts,
            metric = ?params.metric,
            "ordering prepared"
        );
        Ok(Self {
            frontier: SeedFrontier::with_capacity(store.len()),
            plot: ReachabilityPlot::with_capacity(store.len()),
            threshold: params.threshold(),
            store,
            params,
            cursor: 0,
        })
    }

    /// Start the next run from the next unprocessed point in store order and
    /// drain it completely. Returns `None` once every point is processed.
    pub fn next_run(&mut self) -> Option<RunSummary> {
        let seed = loop {
            let id = self.store.id_at(self.cursor)?;
            self.cursor += 1;
            if !self.store.get(id).is_processed() {
                break id;
            }
        };
        self.plot.runs += 1;
        let run = RunId(self.plot.runs);
        let _span = debug_span!("optics_run", run = run.0).entered();
        let len = self.expand(seed, run);
        debug!(seed = seed.index(), len, "run drained");
        Some(RunSummary { run, seed, len })
    }

    /// Run the traversal to completion and return the plot.
    pub fn finish(self) -> ReachabilityPlot {
        self.into_parts().1
    }

    /// Run the traversal to completion and return the store and the plot.
    pub fn into_parts(mut self) -> (PointStore<T>, ReachabilityPlot) {
        while self.next_run().is_some() {}
        debug_assert_eq!(
            self.plot.len(),
            self.store.len(),
            "every point is emitted exactly once"
        );
        (self.store, self.plot)
    }

    /// Whether every point has been emitted.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.plot.is_complete()
    }

    /// The plot built so far.
    #[inline]
    pub fn plot(&self) -> &ReachabilityPlot {
        &self.plot
    }

    /// The store with its per-point state.
    #[inline]
    pub fn store(&self) -> &PointStore<T> {
        &self.store
    }

    /// Parameters of this traversal.
    #[inline]
    pub fn params(&self) -> &OpticsParams {
        &self.params
    }

    fn expand(&mut self, seed: PointId, run: RunId) -> usize {
        let start = self.plot.len();
        self.store.get_mut(seed).mark_processed();
        self.emit(seed, run);
        while let Some((next, _)) = self.frontier.pop_min() {
            self.store.get_mut(next).mark_processed();
            self.emit(next, run);
        }
        self.plot.len() - start
    }

    /// Query around `id` itself, append it to the plot, and relax its neighbors
    /// if it is a core point.
    fn emit(&mut self, id: PointId, run: RunId) {
        let hood = neighbors::query(
            &self.store,
            id,
            self.params.metric,
            self.threshold,
            self.params.min_pts,
        );
        let core_distance = hood.core_distance(self.params.min_pts, self.threshold);

        let order_index = self.plot.len();
        let p = self.store.get_mut(id);
        p.core_distance = core_distance;
        p.run = Some(run);
        p.order_index = Some(order_index);
        self.plot.entries.push(PlotEntry {
            id,
            reachability: p.reachability,
            core_distance,
            run,
        });

        if let Some(core) = core_distance {
            self.update(&hood, core);
        }
    }

    fn update(&mut self, hood: &Neighborhood, anchor_core: f64) {
        for n in hood.within_epsilon() {
            let o = self.store.get_mut(n.id);
            if o.processed {
                continue;
            }
            let candidate = anchor_core.max(n.distance);
            match o.reachability {
                None => {
                    o.reachability = Some(candidate);
                    let queued = self.frontier.push(n.id, candidate);
                    debug_assert!(queued, "a point without reachability is never queued");
                }
                Some(current) if candidate < current => {
                    o.reachability = Some(candidate);
                    let lowered = self.frontier.decrease_key(n.id, candidate);
                    debug_assert!(lowered, "an unprocessed reachable point is always queued");
                }
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Metric;
    use alloc::vec;

    fn line(n: i64, step: i64) -> Vec<Point<i64>> {
        (0..n).map(|i| Point::new(i * step, 0)).collect()
    }

    #[test]
    fn every_point_emitted_once() {
        let pts = line(10, 1);
        let params = OpticsParams::new(1.5, 2).with_metric(Metric::Euclidean);
        let (store, plot) = OrderingEngine::new(&pts, params).unwrap().into_parts();
        assert_eq!(plot.len(), pts.len());
        let mut seen: Vec<_> = plot.ordering().map(PointId::index).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        for (i, e) in plot.iter().enumerate() {
            let p = store.get(e.id);
            assert!(p.is_processed());
            assert_eq!(p.order_index(), Some(i));
            assert_eq!(p.run(), Some(e.run));
        }
    }

    #[test]
    fn chain_is_one_run_with_defined_reachability() {
        let pts = line(6, 1);
        let params = OpticsParams::new(1.0, 1).with_metric(Metric::Manhattan);
        let plot = OrderingEngine::new(&pts, params).unwrap().finish();
        assert_eq!(plot.run_count(), 1);
        let reach: Vec<_> = plot.iter().map(|e| e.reachability).collect();
        assert_eq!(
            reach,
            [None, Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)]
        );
        let order: Vec<_> = plot.ordering().map(PointId::index).collect();
        assert_eq!(order, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn reachability_is_max_of_core_and_distance() {
        // From the origin with min_pts = 2 the core distance is 2, so the point
        // at distance 1 is reachable at 2 and the one at distance 3 at 3.
        let pts = vec![
            Point::new(0_i64, 0),
            Point::new(1, 0),
            Point::new(0, 2),
            Point::new(0, -3),
        ];
        let params = OpticsParams::new(3.0, 2).with_metric(Metric::Manhattan);
        let mut engine = OrderingEngine::new(&pts, params).unwrap();
        let first = engine.next_run().unwrap();
        assert_eq!(first.seed, PointId::new(0));
        let plot = engine.plot();
        assert_eq!(plot.entries()[0].core_distance, Some(2.0));
        assert_eq!(plot.entries()[1].id, PointId::new(1));
        assert_eq!(plot.entries()[1].reachability, Some(2.0));
        assert_eq!(plot.entries()[2].id, PointId::new(2));
        assert_eq!(plot.entries()[2].reachability, Some(2.0));
        assert_eq!(plot.entries()[3].id, PointId::new(3));
        assert_eq!(plot.entries()[3].reachability, Some(3.0));
    }

    #[test]
    fn reachability_is_lowered_by_a_closer_core_point() {
        // The far point is first reached from the origin at 4, then from
        // (3, 0) at 1 once that point has been processed.
        let pts = vec![
            Point::new(0_i64, 0),
            Point::new(3, 0),
            Point::new(4, 0),
            Point::new(-1, 0),
        ];
        let params = OpticsParams::new(4.0, 1).with_metric(Metric::Manhattan);
        let plot = OrderingEngine::new(&pts, params).unwrap().finish();
        let order: Vec<_> = plot.ordering().map(PointId::index).collect();
        assert_eq!(order, [0, 3, 1, 2]);
        assert_eq!(plot.entries()[3].reachability, Some(1.0));
    }

    #[test]
    fn runs_are_checkpoints() {
        let pts = vec![
            Point::new(0_i64, 0),
            Point::new(1, 0),
            Point::new(100, 0),
            Point::new(101, 0),
        ];
        let params = OpticsParams::new(2.0, 1).with_metric(Metric::Euclidean);
        let mut engine = OrderingEngine::new(&pts, params).unwrap();

        let a = engine.next_run().unwrap();
        assert_eq!((a.run, a.seed, a.len), (RunId(1), PointId::new(0), 2));
        assert!(!engine.is_done());
        assert!(!engine.store().get(PointId::new(2)).is_processed());

        let b = engine.next_run().unwrap();
        assert_eq!((b.run, b.seed, b.len), (RunId(2), PointId::new(2), 2));
        assert!(engine.is_done());
        assert_eq!(engine.next_run(), None);
    }

    #[test]
    fn isolated_points_each_open_a_run() {
        let pts = line(4, 10);
        let params = OpticsParams::new(1.0, 1).with_metric(Metric::Manhattan);
        let plot = OrderingEngine::new(&pts, params).unwrap().finish();
        assert_eq!(plot.run_count(), 4);
        assert!(plot.iter().all(|e| e.reachability.is_none()));
        assert!(plot.iter().all(|e| e.core_distance.is_none()));
    }

    #[test]
    fn invalid_params_rejected_before_any_work() {
        let pts = line(4, 1);
        assert!(OrderingEngine::new(&pts, OpticsParams::new(-1.0, 2)).is_err());
        assert!(OrderingEngine::new(&pts, OpticsParams::new(1.0, 5)).is_err());
    }
}
