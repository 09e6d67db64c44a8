//! Seed clusters from an edge list, merge them greedily, and print the result.
//!
//! Run with `RUST_LOG=linkage=debug` to see every merge as it happens.

use linkage::edges::{parse_edge_list, write_merge_events};
use linkage::{total_distance, Clustering, DisjointSet, NearestClusterMerger, Point};
use tracing_subscriber::EnvFilter;

const EDGES: &str = "\
[0,0] [1,0]
[1,0] [1,1]
[10,0] [11,0]
[10,5] [10,6]
[4,4] [5,4]
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Pre-seeded components from the edge list.
    let edges = parse_edge_list(EDGES)?;
    let mut set = DisjointSet::from_edges(&edges)?;
    println!(
        "=== {} points in {} seeded clusters ===",
        set.len(),
        set.num_clusters()
    );

    let events = NearestClusterMerger::new().run(&mut set)?;
    write_merge_events(std::io::stdout().lock(), &events)?;
    println!("Distance: {:.12}", total_distance(&events));

    // Hard labels for three well-separated groups.
    let data = [
        Point::new(0.0, 0.0),
        Point::new(0.1, 0.2),
        Point::new(5.0, 5.0),
        Point::new(5.1, 4.9),
        Point::new(10.0, 0.0),
        Point::new(10.1, 0.1),
    ];
    let merger = NearestClusterMerger::new().with_target_clusters(3);
    let labels = merger.fit_predict(&data)?;
    println!("\n=== Single linkage (k=3) ===");
    for (p, label) in data.iter().zip(&labels) {
        println!("  point {p} => cluster {label}");
    }

    Ok(())
}
