//! Structured logging setup: `tracing-subscriber`'s `fmt` layer, filtered by
//! `RUST_LOG`, defaulting to `info` when unset.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Must be called once, before any other
/// `tracing` call, typically as the first line of `main`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
