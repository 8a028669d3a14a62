//! Run orchestrator.
//!
//! Ties every other component together into a runnable program: validates
//! arguments, loads the graph once, then runs `N` timed iterations of the
//! driver across a simulated cluster of peer threads, reporting wall time
//! and traversed-edges-per-second per iteration plus arithmetic/harmonic
//! means across the run.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::concurrency::scoped::with_read_scope;
use crate::driver;
use crate::error::{Result, SsspError};
use crate::graph::{padded_vertex_count, PartitionMap};
use crate::loader::{self, DirectionMode};
use crate::relax::RetryLimits;
use crate::transport::{Cluster, Transport};
use crate::GhostToken;

/// Everything the orchestrator needs to run one job.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Global source vertex for the shortest-paths search.
    pub source: i64,
    /// Directed or undirected interpretation of the input edges.
    pub mode: DirectionMode,
    /// Path to the ASCII graph file.
    pub graph_path: PathBuf,
    /// Number of timed iterations to run.
    pub iterations: usize,
    /// Number of simulated peers (`P`).
    pub peer_count: usize,
}

/// Per-iteration timing and throughput.
#[derive(Debug, Clone, Copy)]
pub struct IterationReport {
    /// Wall-clock time for the iteration, in seconds.
    pub wall_time_secs: f64,
    /// Total out-edges relaxed across all peers this iteration.
    pub traversed_edges: u64,
    /// Traversed-edges-per-second for this iteration.
    pub teps: f64,
}

/// Full result of a run: per-iteration reports, summary statistics, and the
/// final distance/predecessor arrays (global vertex order) from the last
/// iteration, for verification.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Padded global vertex count actually used for the run.
    pub vertex_count: i64,
    /// Peer count used for the run.
    pub peer_count: usize,
    /// One entry per iteration, in order.
    pub iterations: Vec<IterationReport>,
    /// Arithmetic mean of per-iteration wall time, in seconds.
    pub arithmetic_mean_time: f64,
    /// Harmonic mean of per-iteration wall time, in seconds.
    pub harmonic_mean_time: f64,
    /// Arithmetic mean of per-iteration TEPS.
    pub arithmetic_mean_teps: f64,
    /// Harmonic mean of per-iteration TEPS.
    pub harmonic_mean_teps: f64,
    /// `distance[v]` for every global vertex `v`, from the final iteration.
    pub final_distance: Vec<i64>,
    /// `predecessor[v]` for every global vertex `v`, from the final iteration.
    pub final_predecessor: Vec<i64>,
}

/// Runs the configured job end to end.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    if config.peer_count == 0 {
        return Err(SsspError::InvalidPeerCount(config.peer_count));
    }
    if config.iterations == 0 {
        return Err(SsspError::NonPositiveIterationCount(0));
    }

    let raw_vertex_count = loader::read_vertex_count(&config.graph_path)?;
    let vertex_count = padded_vertex_count(raw_vertex_count, config.peer_count);
    if !(0..vertex_count).contains(&config.source) {
        return Err(SsspError::SourceOutOfRange { source: config.source, vertex_count });
    }

    let partition = PartitionMap::new(vertex_count, config.peer_count);
    let graphs = (0..config.peer_count)
        .map(|pe| loader::load_for_peer(&config.graph_path, config.mode, pe, &partition))
        .collect::<Result<Vec<_>>>()?;

    let total_edges: usize = graphs.iter().map(|g| g.edge_count()).sum();
    info!(
        vertex_count,
        peer_count = config.peer_count,
        total_edges,
        source = config.source,
        "graph loaded"
    );

    let limits = RetryLimits::from_env();
    let source = config.source;
    let iterations = config.iterations;

    let (iteration_results, final_distance, final_predecessor) = GhostToken::new(|token| {
        let cluster = Cluster::new(&token, config.peer_count, partition.partition_size() as usize);
        let mut iteration_results = Vec::with_capacity(iterations);

        for iter_idx in 0..iterations {
            let per_peer: Vec<(std::time::Duration, u64)> = with_read_scope(&token, |scope| {
                let handles: Vec<_> = (0..config.peer_count)
                    .map(|pe| {
                        let graph = &graphs[pe];
                        let partition = &partition;
                        let cluster = &cluster;
                        let limits = &limits;
                        scope.spawn(move |tok| {
                            let state = cluster.peer_state(pe);
                            state.reset();
                            let (owner, local) = partition.locate(source);
                            if owner == pe {
                                state.set_source(local);
                            }
                            let handle = cluster.handle(pe);
                            handle.barrier_all(tok);

                            let start = Instant::now();
                            let report =
                                driver::bellman_ford_synchronous(state, graph, partition, &handle, limits, tok);
                            let elapsed = start.elapsed();

                            let total = handle.int_sum_to_all(report.traversed_edges as i64, tok);
                            handle.barrier_all(tok);
                            (elapsed, total as u64)
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().expect("peer thread panicked")).collect()
            });

            let wall_time = per_peer.iter().map(|(d, _)| *d).max().expect("at least one peer");
            let traversed_edges = per_peer[0].1;
            let wall_time_secs = wall_time.as_secs_f64();
            let teps = if wall_time_secs > 0.0 { traversed_edges as f64 / wall_time_secs } else { f64::INFINITY };

            info!(iteration = iter_idx, wall_time_secs, traversed_edges, teps, "iteration complete");
            iteration_results.push(IterationReport { wall_time_secs, traversed_edges, teps });
        }

        let final_distance = gather_distances(&cluster, &partition);
        let final_predecessor = gather_predecessors(&cluster, &partition);
        (iteration_results, final_distance, final_predecessor)
    });

    let arithmetic_mean_time = arithmetic_mean(iteration_results.iter().map(|r| r.wall_time_secs));
    let harmonic_mean_time = harmonic_mean(iteration_results.iter().map(|r| r.wall_time_secs));
    let arithmetic_mean_teps = arithmetic_mean(iteration_results.iter().map(|r| r.teps));
    let harmonic_mean_teps = harmonic_mean(iteration_results.iter().map(|r| r.teps));

    Ok(RunReport {
        vertex_count,
        peer_count: config.peer_count,
        iterations: iteration_results,
        arithmetic_mean_time,
        harmonic_mean_time,
        arithmetic_mean_teps,
        harmonic_mean_teps,
        final_distance,
        final_predecessor,
    })
}

fn gather_distances<'brand>(cluster: &Cluster<'brand>, partition: &PartitionMap) -> Vec<i64> {
    let mut out = vec![0i64; partition.vertex_count() as usize];
    for pe in 0..partition.peer_count() {
        let state = cluster.peer_state(pe);
        for local in 0..state.partition_size() {
            out[partition.global(pe, local) as usize] = state.load_distance(local);
        }
    }
    out
}

fn gather_predecessors<'brand>(cluster: &Cluster<'brand>, partition: &PartitionMap) -> Vec<i64> {
    let mut out = vec![0i64; partition.vertex_count() as usize];
    for pe in 0..partition.peer_count() {
        let state = cluster.peer_state(pe);
        for local in 0..state.partition_size() {
            out[partition.global(pe, local) as usize] = state.load_predecessor(local);
        }
    }
    out
}

fn arithmetic_mean(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let count = values.clone().count();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn harmonic_mean(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let count = values.clone().count();
    if count == 0 {
        return 0.0;
    }
    let reciprocal_sum: f64 = values.filter(|v| *v > 0.0).map(|v| 1.0 / v).sum();
    if reciprocal_sum == 0.0 {
        return 0.0;
    }
    count as f64 / reciprocal_sum
}
