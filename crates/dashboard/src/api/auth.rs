//! Sign-in and sign-out against the backend accounts service.

use serde::{Deserialize, Serialize};
use tracing::info;

use ledger_core::{Email, UserProfile};

use super::{ApiClient, ApiError};
use crate::notify::Notice;
use crate::session::{SessionRecord, SessionTokens};

/// Endpoint for credential sign-in.
const LOGIN_PATH: &str = "/accounts/login/";

/// Credentials submitted at sign-in.
///
/// `Debug` is implemented manually to redact the password.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: Email,
    /// Account password, sent as-is over TLS.
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Backend response to a successful sign-in: the token set plus the
/// authenticated user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Issued tokens.
    #[serde(flatten)]
    pub tokens: SessionTokens,
    /// The signed-in user.
    pub user: UserProfile,
}

impl ApiClient {
    /// Sign in with email and password.
    ///
    /// On success the returned token set and profile are persisted as the
    /// new session (stamped with `validity_days`) and a success notice is
    /// emitted. The auth-changed signal fires via the store's save.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend rejects the credentials, the
    /// request fails, or the session cannot be persisted.
    pub async fn login(
        &self,
        request: &LoginRequest,
        validity_days: i64,
    ) -> Result<SessionRecord, ApiError> {
        let response: LoginResponse = self.post(LOGIN_PATH, request).await?;

        let record = self
            .store()
            .save(response.tokens, response.user, validity_days)?;

        info!(user = %record.user.email, role = %record.user.role, "signed in");
        self.notices()
            .notify(Notice::success("Signed in successfully"));
        Ok(record)
    }

    /// Sign out: purge the session and notify.
    ///
    /// Purely local - the backend holds no server-side session to revoke.
    /// The auth-changed signal fires via the store's clear, which is what
    /// sends an open protected page back to login.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the persisted session cannot be removed.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.store().clear()?;
        info!("signed out");
        self.notices()
            .notify(Notice::success("Signed out successfully"));
        Ok(())
    }
}
