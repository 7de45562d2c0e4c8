//! The session store service.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use ledger_core::UserProfile;

use super::record::{SessionRecord, SessionTokens};
use super::storage::{SessionStorage, StorageError};

/// Default session validity window in days.
pub const DEFAULT_VALIDITY_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Errors surfaced by session write operations.
///
/// Reads never error: an unreadable or malformed record is reported as
/// absent and purged (fail-closed).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Single source of truth for "is there a usable session, and who is it".
///
/// Owns the one storage slot and the auth-changed signal. Login and logout
/// are the only writer paths; the guard and the API client only read.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    changed: watch::Sender<()>,
}

impl SessionStore {
    /// Create a store over the given storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (changed, _) = watch::channel(());
        Self { storage, changed }
    }

    /// Subscribe to the auth-changed signal.
    ///
    /// The signal fires on every [`save`](Self::save) and
    /// [`clear`](Self::clear), so a subscriber sitting on a protected page
    /// can re-run the guard immediately when a logout happens elsewhere in
    /// the process.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.changed.subscribe()
    }

    /// Load the persisted session record.
    ///
    /// Returns `None` when the record is absent, unreadable, or malformed.
    /// Malformed content is purged before returning so unparseable data is
    /// never left behind; storage errors are logged and swallowed. An
    /// expired record is still returned - expiry is the caller's check, and
    /// the guard is the one that purges on expiry.
    #[must_use]
    pub fn load(&self) -> Option<SessionRecord> {
        let raw = match self.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "session storage unreadable, treating as logged out");
                return None;
            }
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "malformed session record, purging");
                self.purge_quietly();
                None
            }
        }
    }

    /// Persist a fresh session after login.
    ///
    /// Computes `expires_at = now + validity_days` and atomically replaces
    /// whatever was stored. Fires the auth-changed signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or persisted.
    pub fn save(
        &self,
        tokens: SessionTokens,
        user: UserProfile,
        validity_days: i64,
    ) -> Result<SessionRecord, SessionError> {
        let expires_at = Utc::now().timestamp_millis() + validity_days * MILLIS_PER_DAY;
        let record = SessionRecord {
            tokens,
            user,
            expires_at,
        };

        let json = serde_json::to_string(&record)?;
        self.storage.write(&json)?;
        self.changed.send_replace(());

        info!(user = %record.user.email, role = %record.user.role, "session saved");
        Ok(record)
    }

    /// Remove the persisted session unconditionally.
    ///
    /// Idempotent: clearing an already-empty store is a no-op. Fires the
    /// auth-changed signal either way.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails for a reason
    /// other than the record being absent.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove()?;
        self.changed.send_replace(());
        info!("session cleared");
        Ok(())
    }

    /// Whether a valid, unexpired session is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.load().is_some_and(|record| !record.is_expired())
    }

    fn purge_quietly(&self) {
        if let Err(e) = self.storage.remove() {
            warn!(error = %e, "failed to purge malformed session record");
        } else {
            debug!("purged malformed session record");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;

    fn sample_user() -> UserProfile {
        serde_json::from_str(r#"{"id": 1, "email": "owner@example.com", "role": "admin"}"#)
            .unwrap()
    }

    fn sample_tokens() -> SessionTokens {
        SessionTokens {
            access: "access-jwt".to_owned(),
            refresh: "refresh-jwt".to_owned(),
            raw: Some("raw-token".to_owned()),
        }
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));

        let before = Utc::now().timestamp_millis();
        let saved = store
            .save(sample_tokens(), sample_user(), DEFAULT_VALIDITY_DAYS)
            .unwrap();
        let after = Utc::now().timestamp_millis();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.tokens, sample_tokens());
        assert_eq!(loaded.user, sample_user());

        // expiresAt lands within the save call's window of now + 30 days.
        let window = DEFAULT_VALIDITY_DAYS * MILLIS_PER_DAY;
        assert!(loaded.expires_at >= before + window);
        assert!(loaded.expires_at <= after + window);
    }

    #[test]
    fn test_load_absent_is_none() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_malformed_record_is_purged() {
        let storage = Arc::new(MemoryStorage::with_contents("{not valid json"));
        let store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        assert!(store.load().is_none());
        // Storage must be left empty, never with unparseable data.
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_partial_record_is_purged() {
        // Parseable JSON but missing mandatory fields is still malformed.
        let storage = Arc::new(MemoryStorage::with_contents(r#"{"access": "a"}"#));
        let store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        assert!(store.load().is_none());
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_expired_record_still_loads() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.save(sample_tokens(), sample_user(), -1).unwrap();

        let record = store.load().unwrap();
        assert!(record.is_expired());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store
            .save(sample_tokens(), sample_user(), DEFAULT_VALIDITY_DAYS)
            .unwrap();

        store.clear().unwrap();
        assert!(store.load().is_none());

        // Clearing again is a no-op, not an error.
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_overwrites_whole_record() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store
            .save(sample_tokens(), sample_user(), DEFAULT_VALIDITY_DAYS)
            .unwrap();

        let other_user: UserProfile =
            serde_json::from_str(r#"{"id": 2, "email": "staff@example.com", "role": "staff"}"#)
                .unwrap();
        let other_tokens = SessionTokens {
            access: "other-access".to_owned(),
            refresh: "other-refresh".to_owned(),
            raw: None,
        };

        store
            .save(other_tokens.clone(), other_user.clone(), DEFAULT_VALIDITY_DAYS)
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.user, other_user);
        assert_eq!(loaded.tokens, other_tokens);
        assert_eq!(loaded.credential(), "other-access");
    }

    #[test]
    fn test_auth_changed_signal_fires_on_save_and_clear() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();

        assert!(!rx.has_changed().unwrap());

        store
            .save(sample_tokens(), sample_user(), DEFAULT_VALIDITY_DAYS)
            .unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.clear().unwrap();
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_is_logged_in() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(!store.is_logged_in());

        store
            .save(sample_tokens(), sample_user(), DEFAULT_VALIDITY_DAYS)
            .unwrap();
        assert!(store.is_logged_in());

        store.clear().unwrap();
        assert!(!store.is_logged_in());
    }
}
