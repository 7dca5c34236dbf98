//! `AuthService` — the context object owning the four stores and exposing
//! the whole public contract.
//!
//! The stores are owned by the service instance rather than process-wide
//! statics, so tests get isolation for free and the locking discipline is
//! scoped per instance.
//!
//! # Failure semantics
//!
//! Nothing here returns `Err` for "not found", "unauthorized", or "expired":
//! outcomes are booleans, the reserved sentinel string, or the three-valued
//! [`RoleCheck`]. The single fatal condition is malformed configuration at
//! construction.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gatehouse_core::{DomainError, DomainResult, now_millis};

use crate::assignments::AssignmentTable;
use crate::codec;
use crate::roles::RoleDirectory;
use crate::session::{SessionId, SessionRecord};
use crate::token::{self, TokenParts, TokenRejection};
use crate::users::{Credentials, UserDirectory};
use crate::wire::{self, RoleCheck};

/// Default token expiry window: 30 minutes.
pub const DEFAULT_EXPIRY_WINDOW_MILLIS: i64 = 30 * 60 * 1000;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long after issuance a token remains usable, in milliseconds.
    ///
    /// Zero is legal (every token is born expired, which tests exploit);
    /// a negative window is rejected at construction.
    pub expiry_window_millis: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            expiry_window_millis: DEFAULT_EXPIRY_WINDOW_MILLIS,
        }
    }
}

impl AuthConfig {
    fn validate(&self) -> DomainResult<()> {
        if self.expiry_window_millis < 0 {
            return Err(DomainError::validation(format!(
                "expiry_window_millis must be non-negative, got {}",
                self.expiry_window_millis
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stores
// ─────────────────────────────────────────────────────────────────────────────

/// The shared mutable state, guarded as one unit.
///
/// Operations are O(1)–O(assignment count) and hold the lock briefly; a
/// single mutual-exclusion scope over all stores keeps cross-store cascades
/// (user deletion, role deletion) atomic without per-entity locking.
#[derive(Debug, Default)]
pub(crate) struct Stores {
    pub users: UserDirectory,
    pub roles: RoleDirectory,
    pub assignments: AssignmentTable,
    /// The active-token set. Membership is necessary but not sufficient for
    /// validity; expired tokens stay here as inert entries until revoked.
    pub tokens: HashSet<String>,
    /// Server-side records for the opaque session mode.
    pub sessions: HashMap<SessionId, SessionRecord>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service
// ─────────────────────────────────────────────────────────────────────────────

/// In-process authentication/authorization service.
///
/// # Invariants
/// - Every role name in any assignment set is currently declared (grants
///   check the role directory; role deletion sweeps the assignment sets).
/// - Every token in the active set was minted from a then-valid credential
///   check; freshness and expiry are re-checked on every use.
/// - Tokens are never proactively swept: an expired token simply fails
///   validation until it is revoked or the service is dropped.
pub struct AuthService {
    pub(crate) stores: RwLock<Stores>,
    pub(crate) expiry_window_millis: i64,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthService {
    /// Create a service with the default 30-minute expiry window.
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(Stores::default()),
            expiry_window_millis: DEFAULT_EXPIRY_WINDOW_MILLIS,
        }
    }

    /// Create a service from explicit configuration.
    pub fn with_config(config: AuthConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            stores: RwLock::new(Stores::default()),
            expiry_window_millis: config.expiry_window_millis,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // User directory
    // ─────────────────────────────────────────────────────────────────────

    /// Register a user. `false` if the name is taken or unusable.
    pub fn create_user(&self, name: &str, password: &str) -> bool {
        self.stores.write().users.create(name, password)
    }

    /// Delete a user, gated on the current credential. On success the user's
    /// entire assignment entry is removed as well.
    ///
    /// Tokens already minted for the user are left in the active set; they
    /// fail the credential-freshness check from now on.
    pub fn delete_user(&self, name: &str, password: &str) -> bool {
        let mut stores = self.stores.write();
        if !stores.users.remove(name, password) {
            return false;
        }
        stores.assignments.remove_user(name);
        true
    }

    /// Existence + credential-match check. No mutation.
    pub fn verify_user(&self, name: &str, password: &str) -> bool {
        self.stores.read().users.verify(name, password)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Role directory
    // ─────────────────────────────────────────────────────────────────────

    /// Declare a role. `false` if already declared or unusable.
    pub fn create_role(&self, name: &str) -> bool {
        self.stores.write().roles.create(name)
    }

    /// Delete a role. On success the role is purged from every user's
    /// assignment set before being removed from the declared set.
    pub fn delete_role(&self, name: &str) -> bool {
        let mut stores = self.stores.write();
        if !stores.roles.exists(name) {
            return false;
        }
        stores.assignments.purge_role(name);
        stores.roles.remove(name)
    }

    pub fn role_exists(&self, name: &str) -> bool {
        self.stores.read().roles.exists(name)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Assignments
    // ─────────────────────────────────────────────────────────────────────

    /// Grant a role to a user.
    ///
    /// Preconditions: the supplied credentials must verify and the role must
    /// be declared; otherwise `false` with no mutation. Granting an
    /// already-held role is a no-op that still returns `true`.
    pub fn grant_role(&self, credentials: &Credentials, role: &str) -> bool {
        let mut stores = self.stores.write();
        if !stores.users.verify(&credentials.name, &credentials.password) {
            debug!(user = %credentials.name, "role grant rejected: credentials");
            return false;
        }
        if !stores.roles.exists(role) {
            debug!(user = %credentials.name, role, "role grant rejected: undeclared role");
            return false;
        }
        stores.assignments.grant(&credentials.name, role);
        true
    }

    /// The user's current role set, by name. Empty for unknown users.
    pub fn user_roles(&self, name: &str) -> HashSet<String> {
        self.stores.read().assignments.roles_of(name)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token manager
    // ─────────────────────────────────────────────────────────────────────

    /// Authenticate and mint a session token.
    ///
    /// Returns the token string, or the reserved sentinel [`wire::ERROR`] if
    /// the credentials do not verify. Each successful call mints a fresh
    /// token; earlier tokens for the same user stay valid alongside it.
    pub fn authenticate(&self, name: &str, password: &str) -> String {
        let mut stores = self.stores.write();
        if !stores.users.verify(name, password) {
            debug!(user = name, "authentication rejected");
            return wire::ERROR.to_string();
        }

        let encoded = codec::encode(password);
        let mut issued_at = now_millis();
        let mut token = token::mint(name, &encoded, issued_at);
        // Two authentications inside the same millisecond would otherwise
        // collide; nudge the issue time until the token is distinct.
        while stores.tokens.contains(&token) {
            issued_at += 1;
            token = token::mint(name, &encoded, issued_at);
        }

        stores.tokens.insert(token.clone());
        debug!(user = name, "token issued");
        token
    }

    /// Whether a token currently passes every validity check.
    pub fn is_active(&self, token: &str) -> bool {
        let stores = self.stores.read();
        Self::validate(&stores, token, now_millis(), self.expiry_window_millis).is_ok()
    }

    /// Revoke a token.
    ///
    /// `true` exactly once per live token. Anything not currently active —
    /// never issued, already revoked, expired, stale — yields `false` with
    /// no mutation; revocation of a dead token is a no-op failure, not an
    /// idempotent success.
    pub fn invalidate(&self, token: &str) -> bool {
        let mut stores = self.stores.write();
        match Self::validate(&stores, token, now_millis(), self.expiry_window_millis) {
            Ok(_) => {
                stores.tokens.remove(token);
                debug!("token revoked");
                true
            }
            Err(rejection) => {
                debug!(%rejection, "token revocation rejected");
                false
            }
        }
    }

    /// All roles held by the token's user.
    ///
    /// An invalid token yields the singleton `{` [`wire::ERROR`] `}` — the
    /// documented way to tell "invalid token" apart from "valid token, zero
    /// roles" (which is the empty set).
    pub fn roles_for(&self, token: &str) -> HashSet<String> {
        let stores = self.stores.read();
        match Self::validate(&stores, token, now_millis(), self.expiry_window_millis) {
            Ok(parts) => stores.assignments.roles_of(parts.user),
            Err(rejection) => {
                debug!(%rejection, "role query rejected");
                HashSet::from([wire::ERROR.to_string()])
            }
        }
    }

    /// Three-valued role-membership check bound to a token.
    pub fn check_role(&self, token: &str, role: &str) -> RoleCheck {
        let stores = self.stores.read();
        match Self::validate(&stores, token, now_millis(), self.expiry_window_millis) {
            Ok(parts) if stores.assignments.holds(parts.user, role) => RoleCheck::Granted,
            Ok(_) => RoleCheck::Denied,
            Err(rejection) => {
                debug!(%rejection, "role check rejected");
                RoleCheck::Invalid
            }
        }
    }

    /// Full validity check against a sampled clock value.
    ///
    /// Order matters for the internal taxonomy (set membership, then shape,
    /// then credential freshness, then expiry) but externally every `Err`
    /// collapses to the same "invalid" outcome.
    pub(crate) fn validate<'a>(
        stores: &Stores,
        token: &'a str,
        now_millis: i64,
        expiry_window_millis: i64,
    ) -> Result<TokenParts<'a>, TokenRejection> {
        if !stores.tokens.contains(token) {
            return Err(TokenRejection::NotIssued);
        }
        let parts = TokenParts::parse(token).ok_or(TokenRejection::Malformed)?;
        if !stores.users.matches_encoded(parts.user, parts.encoded_credential) {
            return Err(TokenRejection::StaleCredential);
        }
        if parts.expired(now_millis, expiry_window_millis) {
            return Err(TokenRejection::Expired);
        }
        Ok(parts)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
