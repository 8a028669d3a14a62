//! Branded scoped-thread helpers (std-only, minimal overhead).
//!
//! Peers in the cluster never need exclusive (`&mut GhostToken`) access: all
//! mutation of symmetric state goes through atomics, so every peer thread
//! only ever needs a shared `&GhostToken<'brand>` proving it belongs to the
//! same run. This wraps `std::thread::scope` to share that reference, and is
//! how the orchestrator spawns one thread per peer.
// People's expectation from GhostCell (per RustBelt paper) is "no runtime borrow state";
// this helper keeps that property while still respecting Rust's thread/lifetime rules.

use crate::GhostToken;

/// A scoped environment that can spawn tasks using a shared `&GhostToken<'brand>`.
pub struct GhostReadScope<'scope, 'env, 'brand> {
    scope: &'scope std::thread::Scope<'scope, 'env>,
    token: &'env GhostToken<'brand>,
}

impl<'scope, 'env, 'brand> GhostReadScope<'scope, 'env, 'brand> {
    /// Spawns a scoped thread that receives `&GhostToken<'brand>`.
    ///
    /// This is suitable for read-only work (e.g. `cell.borrow(token)`).
    #[inline]
    pub fn spawn<T, F>(&self, f: F) -> std::thread::ScopedJoinHandle<'scope, T>
    where
        T: Send + 'scope,
        F: FnOnce(&'env GhostToken<'brand>) -> T + Send + 'scope,
    {
        let t = self.token;
        self.scope.spawn(move || f(t))
    }
}

/// Runs a scoped region where `&GhostToken<'brand>` is shared with spawned threads.
#[inline]
pub fn with_read_scope<'env, 'brand, R, F>(token: &'env GhostToken<'brand>, f: F) -> R
where
    F: for<'scope> FnOnce(GhostReadScope<'scope, 'env, 'brand>) -> R,
{
    std::thread::scope(|scope| f(GhostReadScope { scope, token }))
}

