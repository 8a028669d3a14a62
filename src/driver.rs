//! Iteration driver.
//!
//! The synchronous Bellman-Ford outer loop: scan active local vertices,
//! relax their out-edges, then vote on convergence via a collective
//! reduction. Bounded by `V - 1` rounds, the standard Bellman-Ford upper
//! bound on the number of rounds needed to propagate any shortest path.

use tracing::{debug, warn};

use crate::graph::{LocalGraph, PartitionMap};
use crate::relax::{relax, RelaxOutcome, RetryLimits};
use crate::state::SymmetricState;
use crate::transport::Transport;

/// Summary of one peer's run of the driver for one iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverReport {
    /// Out-edges relaxed across all rounds (TEPS numerator).
    pub traversed_edges: u64,
    /// Number of rounds executed before convergence (<= `V - 1`).
    pub rounds: u32,
}

/// Runs the synchronous Bellman-Ford driver for one peer until every peer
/// votes "did no work this round," or until the `V - 1` round bound is hit.
///
/// `state` and `graph` are this peer's own symmetric slice and local
/// adjacency; `transport` is this peer's [`Transport`] handle into the
/// wider cluster.
pub fn bellman_ford_synchronous<'brand, T: Transport<'brand>>(
    state: &SymmetricState<'brand>,
    graph: &LocalGraph,
    partition: &PartitionMap,
    transport: &T,
    limits: &RetryLimits,
    token: &crate::GhostToken<'brand>,
) -> DriverReport {
    let peer_count = partition.peer_count() as i64;
    let max_rounds = (partition.vertex_count() - 1).max(0);
    let mut report = DriverReport::default();

    for round in 0..max_rounds {
        let did_work = if !state.any_active() {
            false
        } else {
            state.clear_any_active();
            let mut did_work = false;
            for local in 0..graph.partition_size() {
                if !state.is_active(local) {
                    continue;
                }
                did_work = true;
                state.clear_active(local);
                let d_u = state.load_distance(local);
                for edge in graph.out_edges(local) {
                    let outcome = relax(
                        transport,
                        graph,
                        partition,
                        local,
                        edge.dest_global,
                        edge.weight,
                        limits,
                    );
                    report.traversed_edges += 1;
                    match outcome {
                        RelaxOutcome::Exhausted => {
                            warn!(
                                source_distance = d_u,
                                dest = edge.dest_global,
                                "distance CAS loop exhausted; update dropped"
                            );
                        }
                        RelaxOutcome::Applied { predecessor_exhausted: true } => {
                            debug!(
                                dest = edge.dest_global,
                                "predecessor CAS loop exhausted; distance updated, predecessor stale"
                            );
                        }
                        _ => {}
                    }
                }
            }
            did_work
        };

        let converged_vote: i64 = if did_work { 0 } else { 1 };
        let reduced = transport.int_sum_to_all(converged_vote, token);
        report.rounds = round as u32 + 1;
        debug!(round, did_work, reduced, peer_count, "round complete");
        if reduced == peer_count {
            break;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LocalGraphBuilder;
    use crate::state::{INFINITE_DISTANCE, NO_PREDECESSOR};
    use crate::transport::Cluster;
    use crate::GhostToken;

    #[test]
    fn single_peer_path_converges_to_expected_distances() {
        GhostToken::new(|token| {
            // V=4, path 0->1->2->3 each weight 1, single peer.
            let mut builder = LocalGraphBuilder::new(4);
            builder.add_edge(0, 1, 1);
            builder.add_edge(1, 2, 1);
            builder.add_edge(2, 3, 1);
            let graph = builder.freeze();
            let partition = PartitionMap::new(4, 1);
            let cluster = Cluster::new(&token, 1, 4);
            let state = cluster.peer_state(0);
            state.set_source(0);
            let handle = cluster.handle(0);

            let report = bellman_ford_synchronous(
                state,
                &graph,
                &partition,
                &handle,
                &RetryLimits::DEFAULT,
                &token,
            );

            assert_eq!(state.load_distance(0), 0);
            assert_eq!(state.load_distance(1), 1);
            assert_eq!(state.load_distance(2), 2);
            assert_eq!(state.load_distance(3), 3);
            assert_eq!(state.load_predecessor(3), 2);
            assert!(report.traversed_edges >= 3);
        });
    }

    #[test]
    fn unreachable_vertex_stays_infinite() {
        GhostToken::new(|token| {
            let mut builder = LocalGraphBuilder::new(3);
            builder.add_edge(0, 1, 7);
            let graph = builder.freeze();
            let partition = PartitionMap::new(3, 1);
            let cluster = Cluster::new(&token, 1, 3);
            let state = cluster.peer_state(0);
            state.set_source(0);
            let handle = cluster.handle(0);

            bellman_ford_synchronous(state, &graph, &partition, &handle, &RetryLimits::DEFAULT, &token);

            assert_eq!(state.load_distance(1), 7);
            assert_eq!(state.load_distance(2), INFINITE_DISTANCE);
            assert_eq!(state.load_predecessor(2), NO_PREDECESSOR);
        });
    }
}
