//! Disjoint-set forest over registered points.
//!
//! Each point gets a dense id at registration; parent and rank live in flat
//! arrays indexed by that id, and a map from coordinates to id answers lookups.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::point::Point;

/// Union-find over 2-D points with path compression and union by rank.
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    ids: HashMap<Point, usize>,
    points: Vec<Point>,
    pub(crate) parent: Vec<usize>,
    pub(crate) rank: Vec<u32>,
}

impl DisjointSet {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty structure with room for `n` points.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(n),
            points: Vec::with_capacity(n),
            parent: Vec::with_capacity(n),
            rank: Vec::with_capacity(n),
        }
    }

    /// Register every point as its own singleton cluster.
    ///
    /// Fails on the first duplicate or non-finite point.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let iter = points.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for p in iter {
            set.make_set(p)?;
        }
        Ok(set)
    }

    /// Register the endpoints of every edge and union each edge.
    ///
    /// Endpoints are registered in first-seen order; an endpoint that shows up
    /// again in a later edge is not registered twice.
    pub fn from_edges<'a, I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a (Point, Point)>,
    {
        let mut set = Self::new();
        for (a, b) in edges {
            for p in [a, b] {
                if !set.contains(p) {
                    set.make_set(*p)?;
                }
            }
            set.union(a, b)?;
        }
        Ok(set)
    }

    /// Register `p` as a singleton cluster and return its id.
    ///
    /// Registering the same coordinates twice is rejected with
    /// [`Error::DuplicateRegistration`] and leaves the existing node as it was.
    pub fn make_set(&mut self, p: Point) -> Result<usize> {
        if !p.is_finite() {
            return Err(Error::NonFiniteCoordinate { point: p });
        }
        if self.ids.contains_key(&p) {
            return Err(Error::DuplicateRegistration { point: p });
        }
        let id = self.points.len();
        self.ids.insert(p, id);
        self.points.push(p);
        self.parent.push(id);
        self.rank.push(0);
        Ok(id)
    }

    /// Representative point of the cluster containing `p`.
    pub fn find(&mut self, p: &Point) -> Result<Point> {
        let id = self.id_of(p)?;
        let root = self.find_id(id);
        Ok(self.points[root])
    }

    /// Merge the clusters containing `a` and `b`.
    ///
    /// Returns `false` if they were already in the same cluster.
    pub fn union(&mut self, a: &Point, b: &Point) -> Result<bool> {
        let ia = self.id_of(a)?;
        let ib = self.id_of(b)?;
        Ok(self.union_ids(ia, ib))
    }

    /// Whether `a` and `b` are in the same cluster.
    pub fn same_set(&mut self, a: &Point, b: &Point) -> Result<bool> {
        let ia = self.id_of(a)?;
        let ib = self.id_of(b)?;
        Ok(self.find_id(ia) == self.find_id(ib))
    }

    /// Rank stored for `p`'s node (meaningful as a height bound only at roots).
    pub fn rank(&self, p: &Point) -> Result<u32> {
        Ok(self.rank[self.id_of(p)?])
    }

    /// Whether `p` has been registered.
    pub fn contains(&self, p: &Point) -> bool {
        self.ids.contains_key(p)
    }

    /// Number of registered points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no point has been registered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Registered points in registration order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of distinct clusters.
    pub fn num_clusters(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .count()
    }

    /// The current partition.
    ///
    /// Clusters are ordered by their earliest-registered member and list their
    /// members in registration order.
    pub fn clusters(&mut self) -> Vec<Vec<Point>> {
        self.partition()
            .into_iter()
            .map(|ids| ids.into_iter().map(|id| self.points[id]).collect())
            .collect()
    }

    pub(crate) fn id_of(&self, p: &Point) -> Result<usize> {
        self.ids
            .get(p)
            .copied()
            .ok_or(Error::NotFound { point: *p })
    }

    pub(crate) fn point(&self, id: usize) -> Point {
        self.points[id]
    }

    /// Partition ids by root, in the order described on [`Self::clusters`].
    pub(crate) fn partition(&mut self) -> Vec<Vec<usize>> {
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for id in 0..self.points.len() {
            let root = self.find_id(id);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(id);
        }
        groups
    }

    /// Root of `x`, rewiring every node on the path directly to it.
    pub(crate) fn find_id(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    pub(crate) fn union_ids(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find_id(a);
        let rb = self.find_id(b);
        if ra == rb {
            return false;
        }

        // Union by rank; on a tie the first root wins and grows.
        if self.rank[ra] >= self.rank[rb] {
            if self.rank[ra] == self.rank[rb] {
                self.rank[ra] += 1;
            }
            self.parent[rb] = ra;
        } else {
            self.parent[ra] = rb;
        }
        true
    }
}
