//! Loader interface.
//!
//! Parses the ASCII graph format (`V` then `(a b w)` triples) into a
//! per-peer [`LocalGraph`]. Each peer reads the *entire* file independently
//! and keeps only the edges relevant to vertices it owns, matching a
//! one-file-read-per-process loading model.
//!
//! In undirected mode, a peer materializes `(a -> b, w)` when it owns `a`,
//! and additionally materializes `(b -> a, w)` when it owns `b`, regardless
//! of who owns the other endpoint. Each directed image of an edge is
//! therefore added exactly once, cluster-wide.

use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SsspError};
use crate::graph::{LocalGraph, LocalGraphBuilder, PartitionMap};

/// Whether the input graph is interpreted as directed or undirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionMode {
    /// Each `(a, b, w)` line is one directed edge `a -> b`.
    Directed,
    /// Each `(a, b, w)` line is two directed edges, `a -> b` and `b -> a`.
    Undirected,
}

impl FromStr for DirectionMode {
    type Err = SsspError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "directed" => Ok(Self::Directed),
            "undirected" => Ok(Self::Undirected),
            other => Err(SsspError::UnknownDirectionMode(other.to_string())),
        }
    }
}

/// Reads only the leading vertex-count token, so the orchestrator can build
/// a [`PartitionMap`] before each peer parses the full edge list.
pub fn read_vertex_count(path: &Path) -> Result<i64> {
    let content = read_file(path)?;
    let mut tokens = tokenize(&content).into_iter();
    let (token, line) = tokens
        .next()
        .ok_or_else(|| SsspError::GraphFormat { line: 1, reason: "graph file is empty".into() })?;
    token
        .parse::<i64>()
        .map_err(|_| SsspError::GraphFormat { line, reason: format!("expected vertex count, got {token:?}") })
}

/// Parses the full edge list and returns the out-edges and
/// `internal_edges_only` flags owned by peer `my_pe`.
pub fn load_for_peer(
    path: &Path,
    mode: DirectionMode,
    my_pe: usize,
    partition: &PartitionMap,
) -> Result<LocalGraph> {
    let content = read_file(path)?;
    let mut tokens = tokenize(&content).into_iter();

    // Leading vertex-count token: already consumed conceptually by
    // `read_vertex_count`; skip it here too so the edge stream starts at
    // the first triple.
    tokens.next();

    let mut builder = LocalGraphBuilder::new(partition.partition_size() as usize);

    loop {
        let Some((a_tok, a_line)) = tokens.next() else { break };
        let a = parse_vertex(&a_tok, a_line)?;
        let (b_tok, b_line) = tokens
            .next()
            .ok_or_else(|| SsspError::GraphFormat { line: a_line, reason: "truncated edge triple".into() })?;
        let b = parse_vertex(&b_tok, b_line)?;
        let (w_tok, w_line) = tokens
            .next()
            .ok_or_else(|| SsspError::GraphFormat { line: b_line, reason: "truncated edge triple".into() })?;
        let w: i64 = w_tok
            .parse()
            .map_err(|_| SsspError::GraphFormat { line: w_line, reason: format!("expected integer weight, got {w_tok:?}") })?;

        if a == b {
            continue; // self-loops dropped
        }
        if !partition.is_valid_vertex(a) || !partition.is_valid_vertex(b) {
            return Err(SsspError::GraphFormat {
                line: w_line,
                reason: format!("edge endpoint out of range: ({a}, {b})"),
            });
        }

        let (owner_a, local_a) = partition.locate(a);
        let (owner_b, local_b) = partition.locate(b);

        if owner_b == my_pe && owner_a != my_pe {
            builder.mark_cross_peer_incoming(local_b);
        }
        if mode == DirectionMode::Undirected && owner_a == my_pe && owner_b != my_pe {
            builder.mark_cross_peer_incoming(local_a);
        }
        if owner_a == my_pe {
            builder.add_edge(local_a, b, w);
        }
        if mode == DirectionMode::Undirected && owner_b == my_pe {
            builder.add_edge(local_b, a, w);
        }
    }

    Ok(builder.freeze())
}

fn parse_vertex(token: &str, line: usize) -> Result<i64> {
    token
        .parse()
        .map_err(|_| SsspError::GraphFormat { line, reason: format!("expected integer vertex id, got {token:?}") })
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SsspError::GraphIo { path: path.to_path_buf(), source })
}

/// Splits file contents into whitespace-delimited tokens, each paired with
/// its (1-based) source line number for diagnostics.
fn tokenize(content: &str) -> Vec<(String, usize)> {
    content
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (t.to_string(), i + 1)).collect::<Vec<_>>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &str) -> tempfile_like::TempPath {
        tempfile_like::TempPath::new(content)
    }

    // A tiny self-contained temp-file helper so this test module does not
    // need an extra dev-dependency just to write one scratch file.
    mod tempfile_like {
        use std::path::PathBuf;
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        pub struct TempPath(PathBuf);

        impl TempPath {
            pub fn new(content: &str) -> Self {
                let mut path = std::env::temp_dir();
                let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
                path.push(format!("bellman_pgas_loader_test_{}_{unique}.txt", std::process::id()));
                std::fs::write(&path, content).unwrap();
                Self(path)
            }
        }

        impl std::ops::Deref for TempPath {
            type Target = std::path::Path;
            fn deref(&self) -> &std::path::Path {
                &self.0
            }
        }

        impl Drop for TempPath {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.0);
            }
        }
    }

    #[test]
    fn directed_mode_keeps_only_owned_forward_edges() {
        let path = write_temp("4\n0 1 1\n1 2 1\n2 3 1\n");
        let partition = PartitionMap::new(4, 2);
        let vc = read_vertex_count(&path).unwrap();
        assert_eq!(vc, 4);

        let peer0 = load_for_peer(&path, DirectionMode::Directed, 0, &partition).unwrap();
        assert_eq!(peer0.out_edges(0).len(), 1); // 0->1
        assert_eq!(peer0.out_edges(1).len(), 1); // 1->2

        let peer1 = load_for_peer(&path, DirectionMode::Directed, 1, &partition).unwrap();
        assert_eq!(peer1.out_edges(0).len(), 1); // 2->3 (local index 0 = global 2)
        assert_eq!(peer1.out_edges(1).len(), 0);
    }

    #[test]
    fn undirected_mode_adds_reverse_edge_exactly_once() {
        let path = write_temp("2\n0 1 5\n");
        let partition = PartitionMap::new(2, 2);

        let peer0 = load_for_peer(&path, DirectionMode::Undirected, 0, &partition).unwrap();
        assert_eq!(peer0.out_edges(0)[0].dest_global, 1);

        let peer1 = load_for_peer(&path, DirectionMode::Undirected, 1, &partition).unwrap();
        assert_eq!(peer1.out_edges(0)[0].dest_global, 0);
    }

    #[test]
    fn self_loops_are_dropped() {
        let path = write_temp("2\n0 0 9\n0 1 5\n");
        let partition = PartitionMap::new(2, 1);
        let graph = load_for_peer(&path, DirectionMode::Directed, 0, &partition).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn malformed_weight_reports_line_number() {
        let path = write_temp("2\n0 1 notanumber\n");
        let partition = PartitionMap::new(2, 1);
        let err = load_for_peer(&path, DirectionMode::Directed, 0, &partition).unwrap_err();
        match err {
            SsspError::GraphFormat { line, .. } => assert_eq!(line, 2),
            other => panic!("expected GraphFormat, got {other:?}"),
        }
    }
}
