// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat cluster extraction from a completed reachability plot.
//!
//! Both policies cut the plot into contiguous segments, drop segments smaller
//! than the minimum cluster size, and number the survivors `1..=k` in plot
//! order. Label `0` is noise.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use tracing::debug;

use crate::engine::ReachabilityPlot;
use crate::store::PointId;

/// How a reachability plot is cut into candidate clusters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Extraction {
    /// One segment per provisional run of the traversal.
    #[default]
    RunBased,
    /// A new segment wherever reachability is undefined or exceeds epsilon.
    ThresholdWalk,
}

/// Final per-point cluster labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labeling {
    // Indexed by `PointId::index`.
    labels: Vec<u32>,
    cluster_count: u32,
}

impl Labeling {
    /// Label of every point in input order: `0` for noise, `1..=k` for clusters.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label of one point.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not part of the labeled plot.
    #[inline]
    pub fn label(&self, id: PointId) -> u32 {
        self.labels[id.index()]
    }

    /// Number of surviving clusters.
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count as usize
    }

    /// Number of points labeled as noise.
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 0).count()
    }

    /// Members of each cluster; entry `i` holds cluster `i + 1`, in input order.
    pub fn clusters(&self) -> Vec<Vec<PointId>> {
        let mut out = vec![Vec::new(); self.cluster_count()];
        for (i, &label) in self.labels.iter().enumerate() {
            if label > 0 {
                out[label as usize - 1].push(PointId::new(i));
            }
        }
        out
    }
}

/// Turn a plot into labels.
///
/// Labels cover every point of the ordered store. On a plot that is still
/// being built, points not emitted yet are labeled `0`.
///
/// `threshold` is epsilon in the metric's space and only matters for
/// [`Extraction::ThresholdWalk`].
pub fn extract(
    plot: &ReachabilityPlot,
    extraction: Extraction,
    min_cluster_size: usize,
    threshold: f64,
) -> Labeling {
    let mut labels = vec![0_u32; plot.point_count()];
    let mut cluster_count = 0_u32;
    for segment in segments(plot, extraction, threshold) {
        if segment.len() < min_cluster_size {
            continue;
        }
        cluster_count += 1;
        for entry in &plot.entries()[segment] {
            labels[entry.id.index()] = cluster_count;
        }
    }
    let labeling = Labeling {
        labels,
        cluster_count,
    };
    debug!(
        ?extraction,
        clusters = labeling.cluster_count(),
        noise = labeling.noise_count(),
        "clusters extracted"
    );
    labeling
}

/// Contiguous plot ranges forming candidate clusters.
fn segments(plot: &ReachabilityPlot, extraction: Extraction, threshold: f64) -> Vec<Range<usize>> {
    let entries = plot.entries();
    let mut out = Vec::new();
    let mut start = 0;
    for (i, entry) in entries.iter().enumerate().skip(1) {
        let opens = match extraction {
            Extraction::RunBased => entry.run != entries[i - 1].run,
            Extraction::ThresholdWalk => entry.reachability.is_none_or(|r| r > threshold),
        };
        if opens {
            out.push(start..i);
            start = i;
        }
    }
    if !entries.is_empty() {
        out.push(start..entries.len());
    }
    out
}
