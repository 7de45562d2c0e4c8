//! User-facing notices.
//!
//! The guard and the API client emit transient notices ("session expired",
//! "access denied") but do not own a rendering surface. The shell injects a
//! [`NoticeSink`] - its toast layer - and this module provides a
//! tracing-backed default plus a buffering sink for tests.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// A completed action ("signed out successfully").
    Success,
    /// Something the user must react to ("please sign in").
    Error,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity, typically mapped to toast styling.
    pub level: NoticeLevel,
    /// The message text.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Where notices go. Implemented by the shell's toast layer.
pub trait NoticeSink: Send + Sync {
    /// Deliver one notice to the user.
    fn notify(&self, notice: Notice);
}

/// Default sink: notices become structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(target: "ledger_dashboard::notices", "{}", notice.message);
            }
            NoticeLevel::Error => {
                error!(target: "ledger_dashboard::notices", "{}", notice.message);
            }
        }
    }
}

/// Buffering sink for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all captured notices, leaving the sink empty.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        let mut guard = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }

    /// Messages captured so far, in delivery order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let guard = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        guard.iter().map(|n| n.message.clone()).collect()
    }
}

impl NoticeSink for MemorySink {
    fn notify(&self, notice: Notice) {
        let mut guard = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push(notice);
    }
}
