//! Opaque session handles — the hardened alternative to the string token.
//!
//! The compatibility token embeds the user name and encoded credential in
//! its own text. A [`SessionId`] carries nothing: it is a random, time-ordered
//! identifier mapped server-side to the session record, so a leaked handle
//! reveals no account material and cannot be forged from stored state.
//!
//! Semantics deliberately mirror the token mode — same credential-freshness
//! cross-check, same expiry window, same lazy (never swept) expiry — but the
//! returns are idiomatic `Option`s since no legacy wire contract binds them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use gatehouse_core::now_millis;

use crate::codec;
use crate::service::{AuthService, Stores};

/// Opaque handle for a server-side session record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Server-side state for one opaque session.
#[derive(Debug, Clone)]
pub(crate) struct SessionRecord {
    pub user: String,
    /// Snapshot of the encoded credential at issuance, re-checked against
    /// the user directory on every use (parity with the token mode).
    pub encoded_credential: String,
    pub issued_at_millis: i64,
}

impl AuthService {
    /// Authenticate and open an opaque session. `None` if the credentials do
    /// not verify.
    pub fn issue_session(&self, name: &str, password: &str) -> Option<SessionId> {
        let mut stores = self.stores.write();
        if !stores.users.verify(name, password) {
            debug!(user = name, "session rejected");
            return None;
        }
        let id = SessionId::new();
        stores.sessions.insert(
            id,
            SessionRecord {
                user: name.to_string(),
                encoded_credential: codec::encode(password),
                issued_at_millis: now_millis(),
            },
        );
        debug!(user = name, session = %id, "session opened");
        Some(id)
    }

    /// Revoke a session. Same shape as token revocation: `true` exactly once
    /// per live session, `false` for anything not currently valid.
    pub fn revoke_session(&self, id: SessionId) -> bool {
        let mut stores = self.stores.write();
        if Self::live_session(&stores, id, now_millis(), self.expiry_window_millis).is_none() {
            return false;
        }
        stores.sessions.remove(&id);
        debug!(session = %id, "session revoked");
        true
    }

    /// The roles held by the session's user, or `None` if the session is not
    /// currently valid.
    pub fn session_roles(&self, id: SessionId) -> Option<HashSet<String>> {
        let stores = self.stores.read();
        let record = Self::live_session(&stores, id, now_millis(), self.expiry_window_millis)?;
        Some(stores.assignments.roles_of(&record.user))
    }

    /// Whether the session's user holds `role`. `None` for an invalid
    /// session, so "no such session" never masquerades as "role denied".
    pub fn session_holds_role(&self, id: SessionId, role: &str) -> Option<bool> {
        let stores = self.stores.read();
        let record = Self::live_session(&stores, id, now_millis(), self.expiry_window_millis)?;
        Some(stores.assignments.holds(&record.user, role))
    }

    /// Look up a session and apply the freshness and expiry checks.
    fn live_session(
        stores: &Stores,
        id: SessionId,
        now_millis: i64,
        expiry_window_millis: i64,
    ) -> Option<&SessionRecord> {
        let record = stores.sessions.get(&id)?;
        if !stores
            .users
            .matches_encoded(&record.user, &record.encoded_credential)
        {
            return None;
        }
        if now_millis - record.issued_at_millis >= expiry_window_millis {
            return None;
        }
        Some(record)
    }
}
