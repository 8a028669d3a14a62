//! Traits for abstracting over different kinds of ghost tokens.

use crate::token::GhostToken;

/// A trait for tokens that can authorize shared access (borrowing).
///
/// This is implemented by `GhostToken`. [`crate::concurrency::sync::GhostBarrier`]
/// takes `&impl GhostBorrow<'brand>` so only threads holding the run's token can
/// participate in the barrier.
pub trait GhostBorrow<'brand> {}

/// A trait for tokens that can authorize exclusive access (mutable borrowing).
///
/// This is implemented by `GhostToken`.
pub trait GhostBorrowMut<'brand>: GhostBorrow<'brand> {}

// Implement for standard GhostToken
impl<'brand> GhostBorrow<'brand> for GhostToken<'brand> {}
impl<'brand> GhostBorrowMut<'brand> for GhostToken<'brand> {}
