//! The persisted session record.

use core::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use ledger_core::UserProfile;

/// Credential strings returned by the backend on login.
///
/// The wire and storage field names are `access`, `refresh`, and `token`;
/// `token` is the backend's raw session token and is optional. Exactly one
/// of these is used as the bearer credential for API calls, see
/// [`SessionRecord::credential`].
///
/// `Debug` is implemented manually to redact all three values.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    /// JWT access token.
    pub access: String,
    /// JWT refresh token.
    pub refresh: String,
    /// Raw session token; takes precedence over `access` when present.
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .field("raw", &self.raw.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// The full persisted credential bundle.
///
/// Serialized shape matches what the original dashboard keeps under its
/// single storage key: `{access, refresh, token, user, expiresAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Credential strings.
    #[serde(flatten)]
    pub tokens: SessionTokens,
    /// Profile of the logged-in user.
    pub user: UserProfile,
    /// Absolute expiry timestamp in epoch milliseconds. Immutable after
    /// creation; only a fresh login replaces it (with the whole record).
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

impl SessionRecord {
    /// Whether the record has expired as of `now_ms` (epoch milliseconds).
    #[must_use]
    pub const fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }

    /// Whether the record has expired as of the current wall clock.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    /// The bearer credential for outbound API calls.
    ///
    /// Precedence: the raw `token` when present, otherwise `access`. The
    /// original client was inconsistent about this across revisions; this
    /// rule is the documented choice.
    #[must_use]
    pub fn credential(&self) -> &str {
        self.tokens.raw.as_deref().unwrap_or(&self.tokens.access)
    }
}
