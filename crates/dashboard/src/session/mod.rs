//! Persisted session state.
//!
//! A session is a single JSON record: tokens, user profile, and an absolute
//! expiry timestamp. It is either entirely absent (logged out) or fully
//! populated; partial or corrupt content is purged and treated as absent.

mod record;
mod storage;
mod store;

pub use record::{SessionRecord, SessionTokens};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{DEFAULT_VALIDITY_DAYS, SessionError, SessionStore};
