//! Storage backends for the session record.
//!
//! One key, one value: the serialized session record. Backends are
//! synchronous because the guard evaluates synchronously on the UI thread.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors that can occur when reading or writing session storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A place to keep the one serialized session record.
///
/// Implementations must treat `write` as a full replace of whatever was
/// stored before, and `remove` as idempotent.
pub trait SessionStorage: Send + Sync {
    /// Read the stored value, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend exists but cannot be read. An absent
    /// record is `Ok(None)`, not an error.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn write(&self, contents: &str) -> Result<(), StorageError>;

    /// Remove the stored value. Removing an already-empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures other than the record being absent.
    fn remove(&self) -> Result<(), StorageError>;
}

/// File-backed storage: a single JSON file standing in for the browser's
/// `localStorage` key.
///
/// Writes go through a sibling temp file followed by a rename, so a crash
/// mid-write never leaves a truncated record behind.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and headless embedding.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with raw content, parseable or not.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Some(contents.into())),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(contents.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}
