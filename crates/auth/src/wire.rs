//! Reserved wire constants.
//!
//! These values are part of the contract between the service and its callers:
//! the token field separator, the error sentinel, and the two comparison
//! constants for the three-valued role check. Callers that treat tokens as
//! opaque strings still branch on the sentinel, so none of these may change
//! without breaking every embedder.

use serde::{Deserialize, Serialize};

/// Field separator inside a token string.
///
/// Must never appear inside a user name or role name; the directories reject
/// such names at creation time so every minted token splits into exactly
/// three fields.
pub const SEPARATOR: &str = "#";

/// Error sentinel returned where the legacy contract demands a string.
///
/// Deliberately separator-free, so it can never collide with a well-formed
/// token (those always contain two separators).
pub const ERROR: &str = "error";

/// Wire form of a granted role check.
pub const GRANTED: &str = "true";

/// Wire form of a denied role check.
pub const DENIED: &str = "false";

/// Three-valued outcome of a role-membership check bound to a token.
///
/// `Invalid` covers every flavor of token rejection (unknown, malformed,
/// stale credential, expired) — callers are intentionally not told which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCheck {
    Granted,
    Denied,
    Invalid,
}

impl RoleCheck {
    /// The fixed comparison constant for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCheck::Granted => GRANTED,
            RoleCheck::Denied => DENIED,
            RoleCheck::Invalid => ERROR,
        }
    }
}

impl core::fmt::Display for RoleCheck {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_separator_free() {
        assert!(!ERROR.contains(SEPARATOR));
    }

    #[test]
    fn role_check_wire_forms_are_distinct() {
        assert_ne!(RoleCheck::Granted.as_str(), RoleCheck::Denied.as_str());
        assert_ne!(RoleCheck::Denied.as_str(), RoleCheck::Invalid.as_str());
        assert_eq!(RoleCheck::Invalid.as_str(), ERROR);
    }
}
