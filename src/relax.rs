//! Relaxation primitive.
//!
//! `relax(u_local, v_global, w)` is the one piece of this engine that has to
//! reason about concurrent writers: it either takes a lock-free local fast
//! path or a bounded remote CAS loop.

use crate::graph::{LocalGraph, PartitionMap};
use crate::state::INFINITE_DISTANCE;
use crate::transport::{Addr, Transport};

/// Bounded-retry attempt caps for the distance and predecessor CAS loops.
///
/// The 10/100 defaults are heuristic; convergence must not depend on their
/// exact value. `SSSP_CAS_RETRY_LIMIT` / `SSSP_CAS_PRED_RETRY_LIMIT` let
/// tuning and property tests override them without recompiling.
#[derive(Debug, Clone, Copy)]
pub struct RetryLimits {
    /// Maximum attempts on the outer distance CAS loop.
    pub distance_attempts: u32,
    /// Maximum attempts on the inner predecessor CAS loop.
    pub predecessor_attempts: u32,
}

impl RetryLimits {
    /// The defaults from the source implementation: 10 outer, 100 inner.
    pub const DEFAULT: Self = Self {
        distance_attempts: 10,
        predecessor_attempts: 100,
    };

    /// Reads overrides from `SSSP_CAS_RETRY_LIMIT` / `SSSP_CAS_PRED_RETRY_LIMIT`,
    /// falling back to [`RetryLimits::DEFAULT`] for any variable that is
    /// unset or fails to parse as a positive integer.
    pub fn from_env() -> Self {
        let distance_attempts = std::env::var("SSSP_CAS_RETRY_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(Self::DEFAULT.distance_attempts);
        let predecessor_attempts = std::env::var("SSSP_CAS_PRED_RETRY_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(Self::DEFAULT.predecessor_attempts);
        Self { distance_attempts, predecessor_attempts }
    }
}

impl Default for RetryLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What happened when `relax` was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxOutcome {
    /// `d_new >= d_old`: the source's distance does not improve the target.
    NoImprovement,
    /// Applied via the local fast path (plain write, no CAS).
    LocalFastPath,
    /// Applied via the contended path. `predecessor_exhausted` is set if the
    /// inner predecessor CAS loop ran out of attempts (the distance update
    /// still landed; only the predecessor pointer may be stale).
    Applied { predecessor_exhausted: bool },
    /// The outer distance CAS loop exhausted its attempts without either
    /// winning or observing a value that already dominates `d_new`. Dropped;
    /// algorithmically safe because the winning writer (if any) also raises
    /// the destination's active flag.
    Exhausted,
}

/// Attempts to improve `distance[v_global]` using the edge `(u_local, w)`
/// from the current peer's owned source vertex at `u_local`.
///
/// Round 0 marks every vertex active regardless of reachability, so `u_local`
/// is not guaranteed to be reached yet when this is called; an unreached
/// source (`distance[u_local] == +∞`) is a no-op, not a precondition
/// violation.
pub fn relax<'brand, T: Transport<'brand>>(
    transport: &T,
    graph: &LocalGraph,
    partition: &PartitionMap,
    u_local: usize,
    v_global: i64,
    weight: i64,
    limits: &RetryLimits,
) -> RelaxOutcome {
    let my_pe = transport.my_pe();
    let d_u = transport.get64(my_pe, Addr::Distance(u_local));
    if d_u == INFINITE_DISTANCE {
        return RelaxOutcome::NoImprovement;
    }

    let (pe, loc) = partition.locate(v_global);
    let mut d_old = transport.get64(pe, Addr::Distance(loc));
    let pi_old = transport.get64(pe, Addr::Predecessor(loc));
    let d_new = d_u.saturating_add(weight);

    if d_new >= d_old {
        return RelaxOutcome::NoImprovement;
    }

    let winning_predecessor = partition.global(my_pe, u_local);

    if pe == my_pe && graph.internal_edges_only(loc) {
        transport.put64(pe, Addr::Distance(loc), d_new);
        transport.put64(pe, Addr::Predecessor(loc), winning_predecessor);
        transport.activate(pe, loc);
        return RelaxOutcome::LocalFastPath;
    }

    for _ in 0..limits.distance_attempts {
        let observed = transport.cas64(pe, Addr::Distance(loc), d_old, d_new);
        if observed == d_old {
            let mut predecessor_exhausted = true;
            let mut current_pred = pi_old;
            for _ in 0..limits.predecessor_attempts {
                let observed_pred =
                    transport.cas64(pe, Addr::Predecessor(loc), current_pred, winning_predecessor);
                if observed_pred == current_pred {
                    predecessor_exhausted = false;
                    break;
                }
                current_pred = observed_pred;
            }
            transport.activate(pe, loc);
            transport.quiet();
            return RelaxOutcome::Applied { predecessor_exhausted };
        }
        if observed < d_new {
            return RelaxOutcome::NoImprovement;
        }
        d_old = observed;
    }
    RelaxOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LocalGraphBuilder;
    use crate::transport::Cluster;
    use crate::GhostToken;

    #[test]
    fn single_peer_local_fast_path_applies() {
        GhostToken::new(|token| {
            let cluster = Cluster::new(&token, 1, 2);
            let mut builder = LocalGraphBuilder::new(2);
            builder.add_edge(0, 1, 5);
            let graph = builder.freeze();
            let partition = crate::graph::PartitionMap::new(2, 1);

            let handle = cluster.handle(0);
            handle.put64(0, Addr::Distance(0), 0);
            let outcome = relax(&handle, &graph, &partition, 0, 1, 5, &RetryLimits::DEFAULT);

            assert_eq!(outcome, RelaxOutcome::LocalFastPath);
            assert_eq!(cluster.peer_state(0).load_distance(1), 5);
            assert_eq!(cluster.peer_state(0).load_predecessor(1), 0);
            assert!(cluster.peer_state(0).is_active(1));
        });
    }

    #[test]
    fn no_improvement_when_existing_distance_already_better() {
        GhostToken::new(|token| {
            let cluster = Cluster::new(&token, 1, 2);
            let mut builder = LocalGraphBuilder::new(2);
            builder.add_edge(0, 1, 5);
            let graph = builder.freeze();
            let partition = crate::graph::PartitionMap::new(2, 1);

            let handle = cluster.handle(0);
            handle.put64(0, Addr::Distance(0), 0);
            handle.put64(0, Addr::Distance(1), 1);
            let outcome = relax(&handle, &graph, &partition, 0, 1, 5, &RetryLimits::DEFAULT);

            assert_eq!(outcome, RelaxOutcome::NoImprovement);
            assert_eq!(cluster.peer_state(0).load_distance(1), 1);
        });
    }

    #[test]
    fn unreached_source_is_a_no_op_even_with_negative_weight() {
        GhostToken::new(|token| {
            let cluster = Cluster::new(&token, 1, 2);
            let mut builder = LocalGraphBuilder::new(2);
            builder.add_edge(0, 1, -5);
            let graph = builder.freeze();
            let partition = crate::graph::PartitionMap::new(2, 1);

            // Source vertex 0 is left at its reset-time +inf: round 0 scans
            // every vertex active regardless of reachability.
            let handle = cluster.handle(0);
            let outcome = relax(&handle, &graph, &partition, 0, 1, -5, &RetryLimits::DEFAULT);

            assert_eq!(outcome, RelaxOutcome::NoImprovement);
            assert_eq!(cluster.peer_state(0).load_distance(1), crate::state::INFINITE_DISTANCE);
            assert_eq!(cluster.peer_state(0).load_predecessor(1), crate::state::NO_PREDECESSOR);
        });
    }

    #[test]
    fn contended_path_used_when_destination_not_internal_only() {
        GhostToken::new(|token| {
            let cluster = Cluster::new(&token, 2, 2);
            let mut builder = LocalGraphBuilder::new(2);
            builder.add_edge(0, 2, 5);
            builder.mark_cross_peer_incoming(0);
            let graph = builder.freeze();
            let partition = crate::graph::PartitionMap::new(4, 2);

            let handle = cluster.handle(0);
            handle.put64(0, Addr::Distance(0), 0);
            let outcome = relax(&handle, &graph, &partition, 0, 2, 5, &RetryLimits::DEFAULT);

            assert!(matches!(outcome, RelaxOutcome::Applied { .. }));
            assert_eq!(cluster.peer_state(1).load_distance(0), 5);
            assert_eq!(cluster.peer_state(1).load_predecessor(0), 0);
        });
    }
}
