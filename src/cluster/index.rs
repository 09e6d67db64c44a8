//! Exact nearest-neighbor index over a fixed set of registered points.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::error::{Error, Result};
use crate::point::Point;

/// A tree coordinate tagged with the registration id and original point.
type IndexedPoint = GeomWithData<[f64; 2], (usize, Point)>;

/// Tree coordinates are rescaled so no squared distance exceeds `f64::MAX`.
const MAX_TREE_EXPONENT: i32 = 500;

/// Relative slack between the tree's squared distances and `hypot` distances.
const SLACK: f64 = 1e-9;

/// The closest indexed point to a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Registration id of the indexed point.
    pub id: usize,
    /// The indexed point.
    pub point: Point,
    /// Euclidean distance from the query.
    pub distance: f64,
}

/// R*-tree over a fixed set of points, bulk loaded once.
///
/// Distances reported and compared are `hypot` distances on the original
/// coordinates. The tree itself only orders the search, on coordinates scaled
/// by a power of two when they are large enough to overflow a squared distance.
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
    scale: f64,
}

impl PointIndex {
    /// Build an index over `(id, point)` pairs.
    pub fn build<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (usize, Point)>,
    {
        let members: Vec<(usize, Point)> = members.into_iter().collect();
        let max_abs = members
            .iter()
            .map(|(_, p)| p.x.abs().max(p.y.abs()))
            .fold(0.0f64, f64::max);
        let scale = tree_scale(max_abs);

        let entries: Vec<IndexedPoint> = members
            .into_iter()
            .map(|(id, p)| GeomWithData::new([p.x * scale, p.y * scale], (id, p)))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            scale,
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// True if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closest indexed point to `query`.
    ///
    /// Among equally close points the one with the smallest id is returned, so
    /// the answer does not depend on the tree's internal layout.
    pub fn nearest(&self, query: &Point) -> Result<Neighbor> {
        self.search(query, f64::INFINITY, |id| Some((0, id)))
            .ok_or(Error::EmptyIndexQuery)
    }

    /// Closest indexed point whose cluster differs from `own`, if it is
    /// strictly closer than `bound`.
    ///
    /// `cluster_of[id]` is the cluster slot of each indexed id. Points in `own`
    /// are skipped. Among equally close points the lowest `(slot, id)` wins.
    pub fn nearest_outside(
        &self,
        query: &Point,
        cluster_of: &[usize],
        own: usize,
        bound: f64,
    ) -> Option<Neighbor> {
        self.search(query, bound, |id| {
            let slot = cluster_of[id];
            (slot != own).then_some((slot, id))
        })
    }

    /// Whether `p` is one of the indexed points.
    pub fn contains(&self, p: &Point) -> bool {
        self.tree
            .nearest_neighbor(&self.to_tree(p))
            .is_some_and(|entry| entry.data.1 == *p)
    }

    fn to_tree(&self, p: &Point) -> [f64; 2] {
        [p.x * self.scale, p.y * self.scale]
    }

    /// Walk candidates in ascending distance until none can beat the best
    /// accepted one (or `bound`). `key` rejects an id with `None` and orders
    /// equally close ids otherwise.
    fn search<F>(&self, query: &Point, bound: f64, key: F) -> Option<Neighbor>
    where
        F: Fn(usize) -> Option<(usize, usize)>,
    {
        let q = self.to_tree(query);
        let mut best: Option<((usize, usize), Neighbor)> = None;

        for entry in self.tree.nearest_neighbor_iter(&q) {
            let limit = best.map_or(bound, |(_, n)| n.distance) * self.scale;
            if tree_distance_2(entry.geom(), &q) > limit * limit * (1.0 + SLACK) {
                break;
            }

            let (id, point) = entry.data;
            let Some(k) = key(id) else {
                continue;
            };
            let distance = query.distance(&point);
            let better = match best {
                None => distance < bound,
                Some((best_k, n)) => {
                    distance < n.distance || (distance == n.distance && k < best_k)
                }
            };
            if better {
                best = Some((k, Neighbor { id, point, distance }));
            }
        }

        best.map(|(_, n)| n)
    }
}

// Power of two, so scaling is exact.
fn tree_scale(max_abs: f64) -> f64 {
    if max_abs <= 2f64.powi(MAX_TREE_EXPONENT) {
        return 1.0;
    }
    let excess = max_abs.log2().ceil() as i32 - MAX_TREE_EXPONENT;
    2f64.powi(-excess)
}

#[inline]
fn tree_distance_2(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(points: &[(f64, f64)]) -> PointIndex {
        PointIndex::build(
            points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| (i, Point::new(x, y))),
        )
    }

    #[test]
    fn nearest_is_exact() {
        let idx = index(&[(0.0, 0.0), (10.0, 0.0), (3.0, 4.0), (-2.0, -2.0)]);
        let n = idx.nearest(&Point::new(4.0, 4.0)).unwrap();

        assert_eq!(n.id, 2);
        assert_eq!(n.point, Point::new(3.0, 4.0));
        assert_eq!(n.distance, 1.0);
    }

    #[test]
    fn nearest_matches_brute_force() {
        let pts: Vec<(f64, f64)> = (0..60)
            .map(|i| (((i * 37) % 23) as f64 * 0.7, ((i * 11) % 17) as f64 * 1.3))
            .collect();
        let idx = index(&pts);

        for q in [(0.0, 0.0), (5.5, 5.5), (100.0, -3.0), (7.1, 12.2)] {
            let q = Point::new(q.0, q.1);
            let brute = pts
                .iter()
                .map(|&(x, y)| q.distance(&Point::new(x, y)))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(idx.nearest(&q).unwrap().distance, brute);
        }
    }

    #[test]
    fn equidistant_points_resolve_to_smallest_id() {
        let idx = index(&[(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0)]);
        let n = idx.nearest(&Point::new(0.0, 0.0)).unwrap();
        assert_eq!(n.id, 0);
        assert_eq!(n.distance, 2.0);
    }

    #[test]
    fn empty_index_query_fails() {
        let idx = PointIndex::build(std::iter::empty());
        assert!(idx.is_empty());
        assert_eq!(
            idx.nearest(&Point::new(0.0, 0.0)).unwrap_err(),
            Error::EmptyIndexQuery
        );
    }

    #[test]
    fn membership() {
        let idx = index(&[(1.0, 1.0), (2.0, 3.0)]);
        assert_eq!(idx.len(), 2);
        assert!(idx.contains(&Point::new(2.0, 3.0)));
        assert!(!idx.contains(&Point::new(2.0, 2.9)));
    }

    #[test]
    fn nearest_outside_skips_own_cluster() {
        // Slots: 0 = {0, 1, 2}, 1 = {3}, 2 = {4}.
        let idx = index(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.0), (5.0, 0.0), (0.0, 7.0)]);
        let cluster_of = [0, 0, 0, 1, 2];

        let n = idx
            .nearest_outside(&Point::new(0.0, 0.0), &cluster_of, 0, f64::INFINITY)
            .unwrap();
        assert_eq!(n.id, 3);
        assert_eq!(n.distance, 5.0);

        // Nothing outside slot 0 beats the bound.
        assert!(idx
            .nearest_outside(&Point::new(0.0, 0.0), &cluster_of, 0, 5.0)
            .is_none());

        // Every point belongs to the query's own cluster.
        assert!(idx
            .nearest_outside(&Point::new(0.0, 0.0), &[0; 5], 0, f64::INFINITY)
            .is_none());
    }

    #[test]
    fn nearest_outside_ties_go_to_lowest_slot() {
        // Ids 1 and 2 are both at distance 1; id 2 lies in the earlier slot.
        let idx = index(&[(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0)]);
        let cluster_of = [0, 2, 1];

        let n = idx
            .nearest_outside(&Point::new(0.0, 0.0), &cluster_of, 0, f64::INFINITY)
            .unwrap();
        assert_eq!(n.id, 2);
    }

    #[test]
    fn huge_coordinates_keep_their_order() {
        let idx = index(&[(1e160, 0.0), (2e154, 0.0)]);
        let n = idx.nearest(&Point::new(0.0, 0.0)).unwrap();

        assert_eq!(n.id, 1);
        assert_eq!(n.distance, 2e154);
    }
}
