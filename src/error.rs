//! Error taxonomy.
//!
//! Typed argument/IO/parse errors, kept distinct from the algorithmic
//! conditions (CAS exhaustion, negative cycles) that are logged or treated
//! as undefined behavior rather than surfaced as `Err`.

use std::path::PathBuf;

/// The crate's error type. `main` reports these on stderr and exits
/// non-zero; library code never calls `std::process::exit`.
#[derive(Debug, thiserror::Error)]
pub enum SsspError {
    /// `--peers` was zero.
    #[error("invalid peer count {0}: must be >= 1")]
    InvalidPeerCount(usize),

    /// The source vertex named on the command line is outside `[0, V)`.
    #[error("source vertex {source} is out of range for {vertex_count} vertices")]
    SourceOutOfRange {
        /// The rejected source vertex.
        source: i64,
        /// The graph's (padded) vertex count.
        vertex_count: i64,
    },

    /// The direction-mode argument was neither `directed` nor `undirected`.
    #[error("unknown direction mode {0:?}: expected \"directed\" or \"undirected\"")]
    UnknownDirectionMode(String),

    /// The iteration count was zero or negative.
    #[error("iteration count must be positive, got {0}")]
    NonPositiveIterationCount(i64),

    /// The graph file could not be opened or read.
    #[error("could not read graph file {path}")]
    GraphIo {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The graph file's contents did not parse.
    #[error("malformed graph data at line {line}: {reason}")]
    GraphFormat {
        /// 1-based line number in the input file.
        line: usize,
        /// Human-readable description of what failed to parse.
        reason: String,
    },
}

/// Convenience alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, SsspError>;
