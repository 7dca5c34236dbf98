//! User directory: user name → encoded credential.
//!
//! Outcomes are booleans by contract. An unknown user and a wrong credential
//! produce the same `false` so the return value leaks nothing about which
//! check failed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::wire;

/// A credential-bearing identity as supplied by a caller.
///
/// Operations that must prove the caller controls the account (role grants,
/// account deletion) take this pair rather than a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// In-memory user directory.
///
/// Stores only the encoded form of each credential; the plaintext is never
/// retained past the call that supplied it.
#[derive(Debug, Default)]
pub struct UserDirectory {
    records: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. Returns `false` if the name is already taken or the
    /// name contains the token field separator (such a name could never be
    /// embedded in a well-formed token).
    pub fn create(&mut self, name: &str, plaintext: &str) -> bool {
        if name.contains(wire::SEPARATOR) || self.records.contains_key(name) {
            return false;
        }
        self.records.insert(name.to_string(), codec::encode(plaintext));
        true
    }

    /// Remove a user record. Succeeds only when the name exists and the
    /// supplied plaintext encodes to the stored credential.
    ///
    /// Assignment cleanup is the owner's job; see `AuthService::delete_user`.
    pub fn remove(&mut self, name: &str, plaintext: &str) -> bool {
        if !self.verify(name, plaintext) {
            return false;
        }
        self.records.remove(name);
        true
    }

    /// Existence + credential-match check. No mutation.
    pub fn verify(&self, name: &str, plaintext: &str) -> bool {
        self.matches_encoded(name, &codec::encode(plaintext))
    }

    /// Check a name against an already-encoded credential (used when
    /// validating the credential field embedded in a token).
    pub fn matches_encoded(&self, name: &str, encoded: &str) -> bool {
        self.records.get(name).is_some_and(|stored| stored == encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_duplicate_fails() {
        let mut users = UserDirectory::new();
        assert!(users.create("alice", "s3cret"));
        assert!(!users.create("alice", "s3cret"));
        // A different password does not make the duplicate acceptable.
        assert!(!users.create("alice", "other"));
    }

    #[test]
    fn names_containing_the_separator_are_rejected() {
        let mut users = UserDirectory::new();
        assert!(!users.create("al#ice", "s3cret"));
        assert!(!users.verify("al#ice", "s3cret"));
    }

    #[test]
    fn remove_requires_the_current_credential() {
        let mut users = UserDirectory::new();
        assert!(users.create("alice", "s3cret"));

        assert!(!users.remove("alice", "wrong"));
        assert!(!users.remove("alice", ""));
        assert!(users.verify("alice", "s3cret"), "failed removal must not mutate");

        assert!(users.remove("alice", "s3cret"));
        assert!(!users.verify("alice", "s3cret"));
    }

    #[test]
    fn unknown_user_and_wrong_credential_are_indistinguishable() {
        let mut users = UserDirectory::new();
        users.create("alice", "s3cret");
        assert_eq!(users.verify("bob", "s3cret"), users.verify("alice", "wrong"));
    }

    #[test]
    fn matches_encoded_compares_stored_form() {
        let mut users = UserDirectory::new();
        users.create("alice", "s3cret");
        assert!(users.matches_encoded("alice", &codec::encode("s3cret")));
        assert!(!users.matches_encoded("alice", "s3cret"));
    }
}
