//! Structured logging via `tracing`, configured from `RUST_LOG` through
//! `tracing_subscriber::EnvFilter`, defaulting to `info` when unset.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. Call once, at process start.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
