//! `gatehouse-observability` — tracing/logging initialization for processes
//! embedding the auth core.

pub mod tracing;

pub use tracing::{init, init_with_filter};
