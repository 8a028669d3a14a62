//! Local graph store.
//!
//! Per-peer adjacency slice for locally-owned vertices. Built incrementally
//! by the loader (geometric-growth `Vec`s, one per owned vertex), then
//! flattened into a compressed-sparse-row layout before the driver runs, to
//! linearize memory access in the hot scan.
//!
//! Not thread-shared within a peer: per-peer execution is single-threaded,
//! so none of this needs atomics or branding.

/// A single weighted out-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Destination, as a global vertex id.
    pub dest_global: i64,
    /// Edge weight (may be negative; negative cycles are undefined behavior).
    pub weight: i64,
}

/// Growable per-vertex adjacency, built while loading.
///
/// `internal_edges_only[local]` tracks whether the *destination* vertex at
/// `local` ever receives an edge from a source owned by a different peer.
/// It starts `true` and is cleared the first time the loader observes a
/// cross-peer incoming edge. This is what `relax`'s local fast path needs:
/// not "all of u's out-edges stay local," but "no remote peer can ever
/// write here," which is a property of the destination, not the source.
pub struct LocalGraphBuilder {
    partition_size: usize,
    adjacency: Vec<Vec<Edge>>,
    internal_edges_only: Vec<bool>,
}

impl LocalGraphBuilder {
    /// Creates a builder for a peer owning `partition_size` vertices.
    pub fn new(partition_size: usize) -> Self {
        Self {
            partition_size,
            adjacency: (0..partition_size).map(|_| Vec::new()).collect(),
            internal_edges_only: vec![true; partition_size],
        }
    }

    /// Appends an out-edge from the owned vertex at `source_local`.
    ///
    /// # Panics
    /// Panics if `source_local` is out of range.
    pub fn add_edge(&mut self, source_local: usize, dest_global: i64, weight: i64) {
        self.adjacency[source_local].push(Edge { dest_global, weight });
    }

    /// Marks the owned vertex at `dest_local` as receiving at least one
    /// incoming edge from a source owned by another peer.
    ///
    /// # Panics
    /// Panics if `dest_local` is out of range.
    pub fn mark_cross_peer_incoming(&mut self, dest_local: usize) {
        self.internal_edges_only[dest_local] = false;
    }

    /// Flattens the builder into a read-only CSR-style [`LocalGraph`].
    pub fn freeze(self) -> LocalGraph {
        let mut offsets = Vec::with_capacity(self.partition_size + 1);
        let mut edges = Vec::new();
        offsets.push(0usize);
        for bucket in &self.adjacency {
            edges.extend_from_slice(bucket);
            offsets.push(edges.len());
        }
        LocalGraph {
            partition_size: self.partition_size,
            offsets,
            edges,
            internal_edges_only: self.internal_edges_only,
        }
    }
}

/// Read-only, CSR-flattened adjacency for one peer's owned vertices.
pub struct LocalGraph {
    partition_size: usize,
    offsets: Vec<usize>,
    edges: Vec<Edge>,
    internal_edges_only: Vec<bool>,
}

impl LocalGraph {
    /// Number of vertices owned by this peer (`S`).
    pub fn partition_size(&self) -> usize {
        self.partition_size
    }

    /// Out-edges of the owned vertex at `local`, in load order.
    ///
    /// # Panics
    /// Panics if `local` is out of range.
    pub fn out_edges(&self, local: usize) -> &[Edge] {
        &self.edges[self.offsets[local]..self.offsets[local + 1]]
    }

    /// Whether the owned vertex at `local` never receives an edge from a
    /// remote peer (enables `relax`'s local fast path).
    ///
    /// # Panics
    /// Panics if `local` is out of range.
    pub fn internal_edges_only(&self, local: usize) -> bool {
        self.internal_edges_only[local]
    }

    /// Total number of out-edges held by this peer (for accounting only).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csr_flattening_preserves_edge_order() {
        let mut builder = LocalGraphBuilder::new(3);
        builder.add_edge(0, 10, 5);
        builder.add_edge(0, 11, 7);
        builder.add_edge(2, 12, 1);
        let graph = builder.freeze();

        assert_eq!(graph.out_edges(0).len(), 2);
        assert_eq!(graph.out_edges(0)[0].dest_global, 10);
        assert_eq!(graph.out_edges(0)[1].dest_global, 11);
        assert!(graph.out_edges(1).is_empty());
        assert_eq!(graph.out_edges(2)[0].weight, 1);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn internal_edges_only_defaults_true_until_marked() {
        let mut builder = LocalGraphBuilder::new(2);
        assert!(builder.internal_edges_only[0]);
        builder.mark_cross_peer_incoming(0);
        let graph = builder.freeze();
        assert!(!graph.internal_edges_only(0));
        assert!(graph.internal_edges_only(1));
    }
}
