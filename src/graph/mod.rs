//! Graph components: partition map (A) and per-peer local graph store (B).

pub mod local_graph;
pub mod partition;

pub use local_graph::{Edge, LocalGraph, LocalGraphBuilder};
pub use partition::{padded_vertex_count, PartitionMap};
