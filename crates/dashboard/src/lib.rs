//! Management Ledger dashboard - session and authorization subsystem.
//!
//! This crate is the gatekeeper for the dashboard shell of a retail
//! carpet-trading business. It owns the single persisted credential bundle,
//! decides render-vs-redirect for every navigation, and attaches the session
//! credential to every outbound backend request.
//!
//! # Architecture
//!
//! - [`session`] - Persisted session record, storage backends, and the
//!   [`session::SessionStore`] service (single source of truth for "is there
//!   a usable session, and who is it")
//! - [`guard`] - The [`guard::AccessGuard`], evaluated fresh on every route
//!   change: public allow-list, expiry check, role-based forbidden prefixes
//! - [`api`] - Backend REST client; bearer credential attachment and
//!   401-triggered session purge
//! - [`notify`] - Injected user-notice surface (the shell's toast layer)
//! - [`config`] - Environment-based configuration
//!
//! The guard performs no network calls and never panics on bad storage
//! content: an unreadable session record is purged and treated as logged
//! out (fail-closed).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod notify;
pub mod session;
pub mod state;
pub mod telemetry;

pub use api::ApiClient;
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use guard::{Access, AccessGuard};
pub use session::{SessionRecord, SessionStore, SessionTokens};
pub use state::AppState;
