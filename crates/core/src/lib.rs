//! `gatehouse-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod time;

pub use error::{DomainError, DomainResult};
pub use time::now_millis;
