//! GhostToken - the per-run branding capability for the symmetric heap.
//!
//! The GhostToken is a zero-sized type that brands a single cluster run.
//! Every peer's [`crate::state::SymmetricState`] and
//! [`crate::graph::LocalGraph`] carry the same `'brand` lifetime parameter as
//! the token that created them, so two runs (or two different peer counts)
//! can never be mixed at the type level even though the actual mutation goes
//! through plain atomics rather than through the token itself.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is intentionally **not** `Copy`/`Clone`.
//! This makes it a *linear* capability: any safe API that can produce `&mut T`
//! requires `&mut GhostToken<'brand>`, and Rust guarantees you cannot have two
//! live mutable borrows of the same token simultaneously. This crate's peers
//! never need `&mut GhostToken`; they share `&GhostToken<'brand>` across
//! threads (see [`crate::concurrency::scoped`]) and mutate shared state only
//! through atomics.

/// Invariant lifetime definitions for branding.
pub mod invariant;
/// Traits defining token capabilities (GhostBorrow/GhostBorrowMut).
pub mod traits;

pub use invariant::InvariantLifetime;
pub use traits::{GhostBorrow, GhostBorrowMut};

/// A zero-sized token that brands one cluster run.
///
/// The token uses a phantom type parameter to create branded types,
/// ensuring type-level separation between different token scopes.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and executes a closure with it
    ///
    /// This is the primary way to create and use GhostTokens. The
    /// orchestrator creates exactly one token per run and shares `&token`
    /// with every peer thread it spawns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bellman_pgas::GhostToken;
    ///
    /// let brand_is_valid = GhostToken::new(|token| token.is_valid());
    /// assert!(brand_is_valid);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::default()))
    }

    // NOTE: we intentionally keep the public surface small. If you need a
    // `&mut GhostToken<'brand>` for iterator pipelines, just take a mutable
    // borrow of the token inside the `new` closure.
}

impl<'brand> GhostToken<'brand> {
    /// Returns a reference to the token (useful for capturing in closures).
    #[inline(always)]
    pub const fn as_ref(&self) -> &Self {
        self
    }

    /// Returns whether the token represents a valid branding scope.
    ///
    /// This is always true for valid tokens, but allows for const evaluation.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        true
    }

    /// Creates a new branded scope nested within the current one.
    ///
    /// This is functionally equivalent to `GhostToken::new`, but allows
    /// method-chaining style and clarifies intent when creating sub-scopes
    /// for temporary views or nested data structures.
    ///
    /// # Example
    ///
    /// ```
    /// use bellman_pgas::GhostToken;
    ///
    /// GhostToken::new(|token| {
    ///     // Do some work with `token`
    ///
    ///     // Create a temporary sub-scope
    ///     token.with_scoped(|sub_token| {
    ///         // Work with `sub_token` is isolated
    ///     });
    /// });
    /// ```
    #[inline(always)]
    pub fn with_scoped<F, R>(&self, f: F) -> R
    where
        F: for<'sub> FnOnce(GhostToken<'sub>) -> R,
    {
        Self::new(f)
    }
}

// NOTE:
// `GhostToken` is intentionally NOT `Copy`/`Clone`. Duplicating it would let two
// peers believe they own distinct brands when they're really sharing one run.

// Concurrency notes:
// - `GhostToken<'brand>` contains no data and exists only as a compile-time capability.
// - Making it `Sync` is sound: every peer thread only ever holds `&GhostToken<'brand>`,
//   and all mutation of symmetric state goes through `Sync` atomics, not the token.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
