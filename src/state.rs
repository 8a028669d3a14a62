//! Symmetric state.
//!
//! The per-peer arrays exposed to every other peer through the PGAS
//! transport: tentative distances, predecessors, per-vertex active flags,
//! and a scalar "any active" hint. These are the only things a remote peer
//! ever touches, so every field is one of the branded atomics in
//! [`crate::concurrency::atomic`] rather than plain data.

use std::sync::atomic::Ordering;

use crate::concurrency::atomic::{GhostAtomicBitset, GhostAtomicBool, GhostAtomicI64};
use crate::concurrency::CachePadded;

/// Sentinel for "unreached" in the distance array.
pub const INFINITE_DISTANCE: i64 = i64::MAX;

/// Sentinel for "no predecessor" in the predecessor array.
pub const NO_PREDECESSOR: i64 = -1;

/// One peer's slice of the symmetric heap: `distance`, `predecessor`,
/// `active`, and `any_active`, sized to the partition size `S`.
///
/// `any_active` is cache-padded: it is read every round by this peer and
/// written by every remote peer that relaxes an edge into this peer's
/// slice, so it is the one field in the symmetric heap that would
/// otherwise false-share with a neighboring hot field.
pub struct SymmetricState<'brand> {
    distance: Vec<GhostAtomicI64<'brand>>,
    predecessor: Vec<GhostAtomicI64<'brand>>,
    active: GhostAtomicBitset<'brand>,
    any_active: CachePadded<GhostAtomicBool<'brand>>,
}

impl<'brand> SymmetricState<'brand> {
    /// Allocates a peer's symmetric slice for `partition_size` owned
    /// vertices, with all fields in the "start of an iteration" state:
    /// distances at `+∞`, predecessors at `-1`, every vertex active.
    ///
    /// The `_token` parameter ties this allocation to the run's brand; it is
    /// not otherwise used since all mutation here goes through atomics.
    pub fn new(_token: &crate::GhostToken<'brand>, partition_size: usize) -> Self {
        let distance = (0..partition_size)
            .map(|_| GhostAtomicI64::new(INFINITE_DISTANCE))
            .collect();
        let predecessor = (0..partition_size)
            .map(|_| GhostAtomicI64::new(NO_PREDECESSOR))
            .collect();
        let state = Self {
            distance,
            predecessor,
            active: GhostAtomicBitset::new(partition_size),
            any_active: CachePadded::new(GhostAtomicBool::new(false)),
        };
        state.reset();
        state
    }

    /// Number of owned vertices (`S`).
    pub fn partition_size(&self) -> usize {
        self.distance.len()
    }

    /// Resets this peer's slice to the start-of-iteration state: all
    /// distances `+∞`, all predecessors `-1`, every vertex marked active so
    /// the first round performs a full scan.
    ///
    /// Called by exactly one thread (this peer's own) before any other peer
    /// can observe this slice in the new iteration (the orchestrator
    /// barriers immediately afterward), so plain `Relaxed` stores suffice.
    pub fn reset(&self) {
        for d in &self.distance {
            d.store(INFINITE_DISTANCE, Ordering::Relaxed);
        }
        for p in &self.predecessor {
            p.store(NO_PREDECESSOR, Ordering::Relaxed);
        }
        for i in 0..self.active.len_bits() {
            self.active.set(i, Ordering::Relaxed);
        }
        self.any_active.store(true, Ordering::Relaxed);
    }

    /// Sets the owned vertex at `local` as the run's source: distance 0,
    /// no predecessor. Called only by the peer that owns the source vertex.
    pub fn set_source(&self, local: usize) {
        self.distance[local].store(0, Ordering::Relaxed);
    }

    /// Loads the distance at local index `local`.
    pub fn load_distance(&self, local: usize) -> i64 {
        self.distance[local].load(Ordering::Acquire)
    }

    /// Loads the predecessor at local index `local`.
    pub fn load_predecessor(&self, local: usize) -> i64 {
        self.predecessor[local].load(Ordering::Acquire)
    }

    /// Compare-and-swap on the distance at local index `local`. Returns the
    /// observed value whether or not the swap succeeded, matching the
    /// `cas64` contract.
    pub fn cas_distance(&self, local: usize, expected: i64, desired: i64) -> i64 {
        self.distance[local].compare_and_swap(expected, desired, Ordering::AcqRel)
    }

    /// Compare-and-swap on the predecessor at local index `local`.
    pub fn cas_predecessor(&self, local: usize, expected: i64, desired: i64) -> i64 {
        self.predecessor[local].compare_and_swap(expected, desired, Ordering::AcqRel)
    }

    /// Plain write to the distance at `local`, used only by `relax`'s local
    /// fast path (no remote peer can ever contend for this destination).
    pub fn store_distance(&self, local: usize, value: i64) {
        self.distance[local].store(value, Ordering::Release);
    }

    /// Plain write to the predecessor at `local`, used only by `relax`'s
    /// local fast path.
    pub fn store_predecessor(&self, local: usize, value: i64) {
        self.predecessor[local].store(value, Ordering::Release);
    }

    /// Raises `active[local]` and `any_active`, local store form.
    pub fn activate(&self, local: usize) {
        self.active.set(local, Ordering::Release);
        self.any_active.store(true, Ordering::Release);
    }

    /// Whether `active[local]` is currently set.
    pub fn is_active(&self, local: usize) -> bool {
        self.active.is_set(local)
    }

    /// Clears `active[local]`. Called only by this peer's own driver thread
    /// at the top of a scan: safe because a racing remote writer that
    /// finishes after the clear re-raises the flag.
    pub fn clear_active(&self, local: usize) {
        self.active.clear(local, Ordering::Release);
    }

    /// Loads `any_active`.
    pub fn any_active(&self) -> bool {
        self.any_active.load(Ordering::Acquire)
    }

    /// Clears `any_active`. Called only by this peer's own driver thread at
    /// the top of a round, before rescanning.
    pub fn clear_any_active(&self) {
        self.any_active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GhostToken;

    #[test]
    fn reset_restores_start_of_iteration_state() {
        GhostToken::new(|token| {
            let state = SymmetricState::new(&token, 4);
            state.set_source(0);
            assert_eq!(state.load_distance(0), 0);
            state.store_distance(1, 42);
            state.clear_active(2);
            state.clear_any_active();

            state.reset();
            for i in 0..4 {
                assert_eq!(state.load_distance(i), INFINITE_DISTANCE);
                assert_eq!(state.load_predecessor(i), NO_PREDECESSOR);
                assert!(state.is_active(i));
            }
            assert!(state.any_active());
        });
    }

    #[test]
    fn cas_distance_reports_observed_value_on_failure() {
        GhostToken::new(|token| {
            let state = SymmetricState::new(&token, 1);
            state.store_distance(0, 10);
            let observed = state.cas_distance(0, 99, 5);
            assert_eq!(observed, 10);
            assert_eq!(state.load_distance(0), 10);
        });
    }
}
