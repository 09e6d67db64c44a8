//! Greedy nearest-cluster merging of 2-D points.
//!
//! `linkage` joins a set of points into ever larger clusters by repeatedly
//! merging the two closest ones, recording each merge.
//!
//! The primary public API is under [`cluster`], which provides:
//! - a union-find over points (path compression, union by rank)
//! - an R*-tree nearest-neighbor index that can skip a point's own cluster
//! - the merge loop producing [`MergeEvent`]s
//!
//! [`edges`] reads edge lists and writes merge sequences in a plain
//! `[x,y] [x,y]` line format.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod edges;
pub mod error;
pub mod point;

pub use cluster::{
    total_distance, Clustering, DisjointSet, MergeEvent, NearestClusterMerger, Neighbor,
    PointIndex,
};
pub use error::{Error, Result};
pub use point::Point;
