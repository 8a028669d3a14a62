//! # `bellman_pgas`: distributed single-source shortest paths
//!
//! A distributed Bellman-Ford SSSP engine, partitioned across a fixed set
//! of peers communicating through a partitioned global address space
//! (PGAS): each peer owns a contiguous slice of vertices and exposes it to
//! remote peers through one-sided reads, writes, and atomic compare-and-
//! swap over a symmetric heap.
//!
//! The hard engineering lives in two places: [`relax`], the one-sided
//! relaxation primitive that safely updates a remote vertex's distance and
//! predecessor under concurrent writers, and [`driver`], the synchronous
//! iteration loop with active-vertex tracking and collective early
//! termination. Everything else ([`graph`], [`state`], [`transport`],
//! [`loader`], [`orchestrator`]) is the scaffolding that makes those two
//! pieces runnable.
//!
//! ## Example
//!
//! ```rust
//! use bellman_pgas::GhostToken;
//!
//! GhostToken::new(|token| {
//!     assert!(token.is_valid());
//! });
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod driver;
pub mod error;
pub mod graph;
pub mod loader;
pub mod logging;
pub mod orchestrator;
pub mod relax;
pub mod state;
pub mod token;
pub mod transport;

pub use token::GhostToken;

// Compile-time assertions for memory layout optimizations. Skipped under
// `--cfg loom`: loom's atomics carry extra model-checking state and are
// intentionally larger than `core`'s.
#[cfg(not(loom))]
const _: () = {
    use core::mem;

    // Tokens are ZSTs: the brand is purely a compile-time marker.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // Branded atomics must stay exactly as large as the atomic they wrap.
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicI64<'static>>()
            == mem::size_of::<core::sync::atomic::AtomicI64>()
    );
    assert!(
        mem::size_of::<concurrency::atomic::GhostAtomicBool<'static>>()
            == mem::size_of::<core::sync::atomic::AtomicBool>()
    );
};
