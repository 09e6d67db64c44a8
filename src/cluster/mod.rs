//! Greedy single-linkage clustering of points in the plane.
//!
//! ## Building blocks
//!
//! - [`DisjointSet`]: union-find over registered points. Path compression and
//!   union by rank keep `find` near constant time amortized.
//! - [`PointIndex`]: an exact nearest-neighbor index (R*-tree) over the
//!   registered points, able to skip the members of the query's own cluster.
//! - [`NearestClusterMerger`]: the merge loop. Each step finds the closest
//!   pair of points lying in different clusters and unions their clusters.
//!
//! ## Single linkage
//!
//! The distance between two clusters is the distance between their closest
//! members:
//!
//! ```text
//! d(A, B) = min_{a ∈ A, b ∈ B} ||a - b||
//! ```
//!
//! Joining the closest pair of clusters until one remains records the edges of
//! a Euclidean minimum spanning tree. The recorded distances are not
//! necessarily sorted when the loop starts from pre-seeded components.
//!
//! ## Usage
//!
//! ```rust
//! use linkage::{Clustering, NearestClusterMerger, Point};
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(5.0, 5.0),
//!     Point::new(5.0, 6.0),
//! ];
//!
//! let events = NearestClusterMerger::new().merge_points(&points).unwrap();
//! assert_eq!(events.len(), 3);
//! assert_eq!(events[0].distance, 1.0);
//!
//! // Stop early and read off labels.
//! let labels = NearestClusterMerger::new()
//!     .with_target_clusters(2)
//!     .fit_predict(&points)
//!     .unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

mod disjoint_set;
mod index;
mod merge;
mod traits;

pub use disjoint_set::DisjointSet;
pub use index::{Neighbor, PointIndex};
pub use merge::{total_distance, MergeEvent, NearestClusterMerger};
pub use traits::Clustering;
