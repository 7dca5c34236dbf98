//! Token string format and validation taxonomy.
//!
//! A token is three fields joined by [`wire::SEPARATOR`]:
//! `{user}{SEP}{encoded credential}{SEP}{issue time, epoch millis}`.
//!
//! The shape is a compatibility surface: callers treat the string as opaque,
//! but existing embedders parse it, so the field order and separator are
//! frozen. Note that the token embeds credential material (in encoded form);
//! the [`crate::session`] module offers a structureless alternative.

use thiserror::Error;

use crate::wire;

/// Why a token failed validation.
///
/// Internal only: every variant collapses to the same externally observable
/// "invalid" outcome so callers cannot probe which check rejected a token.
/// The distinction exists for tests and trace output.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenRejection {
    /// Not present in the active-token set (never issued or revoked).
    #[error("token not issued")]
    NotIssued,

    /// Does not split into exactly three fields, or the issue-time field is
    /// not an integer.
    #[error("token malformed")]
    Malformed,

    /// Embedded user no longer exists, or the embedded credential no longer
    /// matches the stored one.
    #[error("token credential stale")]
    StaleCredential,

    /// Issued longer ago than the expiry window.
    #[error("token expired")]
    Expired,
}

/// The decoded fields of a structurally valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenParts<'a> {
    pub user: &'a str,
    pub encoded_credential: &'a str,
    pub issued_at_millis: i64,
}

impl<'a> TokenParts<'a> {
    /// Split a raw token into its three fields. `None` for anything that is
    /// not exactly three separator-joined fields with an integer timestamp.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let fields: Vec<&str> = raw.split(wire::SEPARATOR).collect();
        let &[user, encoded_credential, issued] = fields.as_slice() else {
            return None;
        };
        let issued_at_millis = issued.parse::<i64>().ok()?;
        Some(Self {
            user,
            encoded_credential,
            issued_at_millis,
        })
    }

    /// Whether this token has outlived the expiry window at `now_millis`.
    pub fn expired(&self, now_millis: i64, expiry_window_millis: i64) -> bool {
        now_millis - self.issued_at_millis >= expiry_window_millis
    }
}

/// Assemble the token string for a freshly authenticated user.
pub(crate) fn mint(user: &str, encoded_credential: &str, issued_at_millis: i64) -> String {
    format!(
        "{user}{sep}{encoded_credential}{sep}{issued_at_millis}",
        sep = wire::SEPARATOR
    )
}
