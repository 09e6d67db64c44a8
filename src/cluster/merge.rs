//! Greedy nearest-cluster merging.
//!
//! # The Algorithm
//!
//! Start from the clusters held by a [`DisjointSet`] (singletons, or whatever
//! components the caller already unioned). Each step:
//!
//! 1. Group every registered point by its root.
//! 2. Bulk load an R*-tree over all points, each tagged with its cluster.
//! 3. For every point, walk its nearest neighbors, skipping members of its
//!    own cluster, to find the closest outside point.
//! 4. Take the globally closest pair, union its two clusters, and record it.
//!
//! Repeat until the target number of clusters remains. Merging down to one
//! cluster from `n` singletons yields `n - 1` events: the edges of a Euclidean
//! minimum spanning tree, in single-linkage merge order.
//!
//! ## Ties
//!
//! Clusters are visited in order of their earliest-registered member, points
//! in registration order, and a candidate only replaces the current best when
//! it is strictly closer. For one point, equally close outside points resolve
//! to the earliest cluster, then the earliest-registered member. The first
//! pair encountered at the minimum distance wins.
//!
//! ## Complexity
//!
//! Every step rebuilds the index in O(n log n). Each point's walk stops as
//! soon as the next candidate is no closer than the best pair found so far in
//! the step, so most queries touch only a handful of tree entries.

use tracing::{debug, trace};

use super::disjoint_set::DisjointSet;
use super::index::PointIndex;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::point::Point;

/// One recorded merge: the closest cross-cluster pair at that step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    /// The point whose query found the pair.
    pub a: Point,
    /// Its nearest point in another cluster.
    pub b: Point,
    /// Euclidean distance between `a` and `b`.
    pub distance: f64,
}

/// Sum of the distances of `events`.
pub fn total_distance(events: &[MergeEvent]) -> f64 {
    events.iter().map(|e| e.distance).sum()
}

/// Repeatedly joins the two closest clusters.
#[derive(Debug, Clone)]
pub struct NearestClusterMerger {
    /// Stop once this many clusters remain.
    target_clusters: usize,
}

impl NearestClusterMerger {
    /// Create a merger that runs until a single cluster remains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop merging once `k` clusters remain.
    pub fn with_target_clusters(mut self, k: usize) -> Self {
        self.target_clusters = k;
        self
    }

    /// Register `points` as singletons and merge them.
    pub fn merge_points(&self, points: &[Point]) -> Result<Vec<MergeEvent>> {
        let mut set = DisjointSet::from_points(points.iter().copied())?;
        self.run(&mut set)
    }

    /// Merge the clusters of `set` until the target is reached.
    ///
    /// Returns the merge events in the order they happened. With a target of
    /// one and `c` clusters at the start, exactly `c - 1` events are returned
    /// (none for an empty or single-point set).
    pub fn run(&self, set: &mut DisjointSet) -> Result<Vec<MergeEvent>> {
        self.validate()?;

        let start = set.num_clusters();
        debug!(
            points = set.len(),
            clusters = start,
            target = self.target_clusters,
            "merging clusters"
        );

        let mut events = Vec::with_capacity(start.saturating_sub(self.target_clusters));
        while let Some(event) = self.step(set)? {
            events.push(event);
        }
        Ok(events)
    }

    /// Perform one merge.
    ///
    /// Returns `Ok(None)` once no more than the target number of clusters
    /// remains, which is also the case for an empty set.
    pub fn step(&self, set: &mut DisjointSet) -> Result<Option<MergeEvent>> {
        self.validate()?;

        let clusters = set.partition();
        if clusters.len() <= self.target_clusters {
            return Ok(None);
        }

        let mut cluster_of = vec![0; set.len()];
        for (slot, members) in clusters.iter().enumerate() {
            for &id in members {
                cluster_of[id] = slot;
            }
        }
        let index = PointIndex::build((0..set.len()).map(|id| (id, set.point(id))));
        trace!(points = index.len(), clusters = clusters.len(), "built point index");

        let mut best: Option<(usize, usize, f64)> = None;
        for (slot, members) in clusters.iter().enumerate() {
            for &id in members {
                let bound = best.map_or(f64::INFINITY, |(_, _, d)| d);
                let p = set.point(id);
                if let Some(neighbor) = index.nearest_outside(&p, &cluster_of, slot, bound) {
                    best = Some((id, neighbor.id, neighbor.distance));
                }
            }
        }

        // At least two non-empty clusters exist, so some pair was found.
        let Some((a, b, distance)) = best else {
            return Err(Error::EmptyIndexQuery);
        };

        let merged = set.union_ids(a, b);
        debug_assert!(merged, "nearest pair must span two clusters");

        let event = MergeEvent {
            a: set.point(a),
            b: set.point(b),
            distance,
        };
        debug!(
            a = %event.a,
            b = %event.b,
            distance,
            remaining = clusters.len() - 1,
            "merged clusters"
        );
        Ok(Some(event))
    }

    fn validate(&self) -> Result<()> {
        if self.target_clusters == 0 {
            return Err(Error::InvalidParameter {
                name: "target_clusters",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for NearestClusterMerger {
    fn default() -> Self {
        Self { target_clusters: 1 }
    }
}

impl Clustering for NearestClusterMerger {
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        let mut set = DisjointSet::from_points(points.iter().copied())?;
        self.run(&mut set)?;

        // Registration ids follow input order, so labels index straight back.
        let mut labels = vec![0; points.len()];
        for (label, members) in set.partition().into_iter().enumerate() {
            for id in members {
                labels[id] = label;
            }
        }
        Ok(labels)
    }

    fn n_clusters(&self) -> usize {
        self.target_clusters
    }
}
