//! `gatehouse-auth` — in-process authentication/authorization core.
//!
//! This crate is intentionally decoupled from transport and persistence: it
//! manages user credentials, declared roles, role assignments, and
//! short-lived session tokens, entirely in process memory.
//!
//! The center of gravity is the token lifecycle: [`AuthService::authenticate`]
//! mints a token from a credential check; every later call re-validates it
//! (active-set membership, structural shape, credential freshness, expiry)
//! before answering role questions; [`AuthService::invalidate`] revokes it.
//!
//! # Security
//!
//! The default token format and credential digest are compatibility
//! surfaces, not security features — see the [`codec`] module warning and
//! the [`session`] module for the opaque alternative.

pub mod assignments;
pub mod codec;
pub mod roles;
pub mod service;
pub mod session;
pub mod token;
pub mod users;
pub mod wire;

pub use assignments::AssignmentTable;
pub use roles::RoleDirectory;
pub use service::{AuthConfig, AuthService, DEFAULT_EXPIRY_WINDOW_MILLIS};
pub use session::SessionId;
pub use users::{Credentials, UserDirectory};
pub use wire::RoleCheck;
