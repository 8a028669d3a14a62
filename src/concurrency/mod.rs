//! Concurrency helpers shared by the symmetric heap and the iteration driver.
//!
//! Important: these helpers enforce aliasing/branding discipline, not
//! synchronization by themselves. Interior mutation of shared state goes
//! through the atomics in [`atomic`]; [`scoped`] and [`sync`] provide the
//! thread-lifetime and barrier scaffolding the driver uses to run one peer
//! per OS thread.

pub mod atomic;
pub mod cache_padded;
pub mod scoped;
/// Synchronization primitives.
pub mod sync;

pub use cache_padded::CachePadded;
