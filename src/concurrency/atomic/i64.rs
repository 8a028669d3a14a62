use core::marker::PhantomData;

#[cfg(not(loom))]
use core::sync::atomic::{AtomicI64, Ordering};
#[cfg(loom)]
use loom::sync::atomic::{AtomicI64, Ordering};

/// A branded `AtomicI64`.
///
/// The brand is a compile-time marker used to tie an atomic to a Ghost “domain”.
/// It does **not** affect the atomic’s concurrency behavior.
///
/// Distances and predecessors in the symmetric heap are signed: distances
/// can go negative (negative edge weights are permitted), and the
/// predecessor sentinel is `-1`.
#[repr(transparent)]
pub struct GhostAtomicI64<'brand> {
    inner: AtomicI64,
    _brand: PhantomData<&'brand mut ()>,
}

impl<'brand> GhostAtomicI64<'brand> {
    /// Creates a new atomic value.
    #[cfg(not(loom))]
    #[inline(always)]
    pub const fn new(value: i64) -> Self {
        Self {
            inner: AtomicI64::new(value),
            _brand: PhantomData,
        }
    }

    /// Creates a new atomic value.
    ///
    /// Loom's atomics carry runtime bookkeeping for its model checker and
    /// cannot be constructed in a `const fn`, unlike `core`'s.
    #[cfg(loom)]
    #[inline(always)]
    pub fn new(value: i64) -> Self {
        Self {
            inner: AtomicI64::new(value),
            _brand: PhantomData,
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: Ordering) -> i64 {
        self.inner.load(order)
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: i64, order: Ordering) {
        self.inner.store(value, order);
    }

    /// Stores `new` if the current value equals `current`, returning the
    /// observed value either way: always hand back the pre-CAS state, not
    /// just a success bit.
    #[inline(always)]
    pub fn compare_and_swap(&self, expected: i64, desired: i64, order: Ordering) -> i64 {
        match self.inner.compare_exchange(expected, desired, order, Ordering::Acquire) {
            Ok(observed) | Err(observed) => observed,
        }
    }

    /// Stores `new` if the current value equals `current`.
    #[inline(always)]
    pub fn compare_exchange(
        &self,
        current: i64,
        new: i64,
        success: Ordering,
        failure: Ordering,
    ) -> Result<i64, i64> {
        self.inner.compare_exchange(current, new, success, failure)
    }
}

// SAFETY: `AtomicI64` is Send + Sync; brand is a ZST marker.
unsafe impl<'brand> Send for GhostAtomicI64<'brand> {}
unsafe impl<'brand> Sync for GhostAtomicI64<'brand> {}
