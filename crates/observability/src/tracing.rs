//! Tracing/logging initialization.
//!
//! The auth service emits `debug`-level events for rejected credentials and
//! token rejections (never credential material); embedders opt in with
//! `RUST_LOG=gatehouse_auth=debug`.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Respects `RUST_LOG`, defaulting to `info`. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    init_with_filter(filter);
}

/// Initialize with an explicit filter (test harnesses, embedders with their
/// own configuration surface).
pub fn init_with_filter(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
