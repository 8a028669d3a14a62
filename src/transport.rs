//! Transport adapter.
//!
//! A thin abstraction over the six PGAS primitives
//! (`get64`/`put64`/`cas64`/`quiet`/`barrier_all`/`int_sum_to_all`), plus the
//! concrete in-process realization this crate ships: each peer is a scoped
//! OS thread and the symmetric heap is a slice of [`SymmetricState`] shared
//! behind a reference. A networked PGAS backend would implement the same
//! [`Transport`] trait; this module only ships the simulated one.

use std::sync::atomic::{fence, Ordering};

use crate::concurrency::atomic::GhostAtomicI64;
use crate::concurrency::sync::GhostBarrier;
use crate::state::SymmetricState;
use crate::GhostToken;

/// A symmetric-heap address: which array, and which local slot.
///
/// Real PGAS layers address remote memory by a raw `(peer, offset)` pair
/// into a single symmetric segment; since our "segment" is a typed Rust
/// struct rather than a flat byte region, addressing is expressed as an
/// enum naming the field instead of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addr {
    /// `distance[local]`.
    Distance(usize),
    /// `predecessor[local]`.
    Predecessor(usize),
}

/// The six PGAS primitives, restricted to the two CAS-able arrays
/// (`Distance`/`Predecessor`) this crate's symmetric heap exposes.
/// Raising `active`/`any_active` does not need compare-and-swap (it is an
/// idempotent set) and is exposed directly on [`SymmetricState`] instead.
pub trait Transport<'brand> {
    /// Blocking single-element read of `addr` on peer `pe`.
    fn get64(&self, pe: usize, addr: Addr) -> i64;

    /// Atomic compare-and-swap at `addr` on peer `pe`; returns the
    /// pre-CAS observed value whether or not the swap succeeded.
    fn cas64(&self, pe: usize, addr: Addr, expected: i64, desired: i64) -> i64;

    /// Non-blocking write of `value` to `addr` on peer `pe`; completion is
    /// only guaranteed after a subsequent [`Transport::quiet`]. Used by
    /// `relax`'s local fast path, where `pe` is always the current peer.
    fn put64(&self, pe: usize, addr: Addr, value: i64);

    /// Sets the destination's active flag on peer `pe`: a local store if
    /// `pe` is the current peer, otherwise a single-element remote put.
    fn activate(&self, pe: usize, local: usize);

    /// Waits for all outstanding remote writes/atomics issued by this peer
    /// to become globally visible.
    fn quiet(&self);

    /// Global barrier across all peers.
    fn barrier_all(&self, token: &GhostToken<'brand>);

    /// Integer sum reduction: every peer contributes `value`; every peer
    /// receives the sum. Collective: all peers must call this exactly once
    /// per round, or the workspace's internal barriers deadlock.
    fn int_sum_to_all(&self, value: i64, token: &GhostToken<'brand>) -> i64;

    /// The peer id this handle was created for.
    fn my_pe(&self) -> usize;
}

/// Workspace for [`Cluster::int_sum_to_all`]: preallocated once at cluster
/// construction so the reduction never allocates on the hot path, mirroring
/// the `pWrk`/`pSync` workspace arrays the source SHMEM reduction API
/// requires callers to preallocate.
struct ReduceWorkspace<'brand> {
    contributions: Vec<GhostAtomicI64<'brand>>,
}

impl<'brand> ReduceWorkspace<'brand> {
    fn new(peer_count: usize) -> Self {
        Self {
            contributions: (0..peer_count).map(|_| GhostAtomicI64::new(0)).collect(),
        }
    }
}

/// The simulated cluster: every peer's symmetric state, a shared barrier,
/// and the reduction workspace, all indexed by peer id.
pub struct Cluster<'brand> {
    peers: Vec<SymmetricState<'brand>>,
    barrier: GhostBarrier<'brand>,
    reduce: ReduceWorkspace<'brand>,
}

impl<'brand> Cluster<'brand> {
    /// Builds a cluster of `peer_count` peers, each owning `partition_size`
    /// vertices.
    pub fn new(token: &GhostToken<'brand>, peer_count: usize, partition_size: usize) -> Self {
        let peers = (0..peer_count)
            .map(|_| SymmetricState::new(token, partition_size))
            .collect();
        Self {
            peers,
            barrier: GhostBarrier::new(peer_count),
            reduce: ReduceWorkspace::new(peer_count),
        }
    }

    /// Number of peers in the cluster.
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Read-only access to one peer's symmetric state, e.g. for resetting
    /// at the top of an iteration or gathering the final distances.
    pub fn peer_state(&self, pe: usize) -> &SymmetricState<'brand> {
        &self.peers[pe]
    }

    /// A [`Transport`] handle scoped to peer `pe`.
    pub fn handle(&self, pe: usize) -> PeerHandle<'_, 'brand> {
        PeerHandle { cluster: self, my_pe: pe }
    }
}

/// A [`Transport`] implementation scoped to a single peer's point of view.
pub struct PeerHandle<'a, 'brand> {
    cluster: &'a Cluster<'brand>,
    my_pe: usize,
}

impl<'a, 'brand> Transport<'brand> for PeerHandle<'a, 'brand> {
    fn get64(&self, pe: usize, addr: Addr) -> i64 {
        let state = self.cluster.peer_state(pe);
        match addr {
            Addr::Distance(local) => state.load_distance(local),
            Addr::Predecessor(local) => state.load_predecessor(local),
        }
    }

    fn cas64(&self, pe: usize, addr: Addr, expected: i64, desired: i64) -> i64 {
        let state = self.cluster.peer_state(pe);
        match addr {
            Addr::Distance(local) => state.cas_distance(local, expected, desired),
            Addr::Predecessor(local) => state.cas_predecessor(local, expected, desired),
        }
    }

    fn put64(&self, pe: usize, addr: Addr, value: i64) {
        let state = self.cluster.peer_state(pe);
        match addr {
            Addr::Distance(local) => state.store_distance(local, value),
            Addr::Predecessor(local) => state.store_predecessor(local, value),
        }
    }

    fn activate(&self, pe: usize, local: usize) {
        self.cluster.peer_state(pe).activate(local);
    }

    fn quiet(&self) {
        // Every write above already uses `Release`/`AcqRel`; this fence is
        // the explicit completion point a relaxation must issue before the
        // destination's active flag is observed.
        fence(Ordering::SeqCst);
    }

    fn barrier_all(&self, token: &GhostToken<'brand>) {
        self.cluster.barrier.wait(token);
    }

    fn int_sum_to_all(&self, value: i64, token: &GhostToken<'brand>) -> i64 {
        self.cluster.reduce.contributions[self.my_pe].store(value, Ordering::Release);
        self.cluster.barrier.wait(token);
        let total: i64 = self
            .cluster
            .reduce
            .contributions
            .iter()
            .map(|c| c.load(Ordering::Acquire))
            .sum();
        // A second rendezvous so no peer overwrites its contribution for
        // the next call before every peer has finished reading this one.
        self.cluster.barrier.wait(token);
        total
    }

    fn my_pe(&self) -> usize {
        self.my_pe
    }
}
