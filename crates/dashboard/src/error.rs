//! Top-level error type for dashboard startup and embedding.
//!
//! Individual subsystems keep their own error enums ([`ConfigError`],
//! [`SessionError`], [`ApiError`]); this wrapper exists for code that wires
//! them together, like [`AppState::from_env`](crate::state::AppState::from_env).

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::SessionError;

/// Any dashboard subsystem failure.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session persistence failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Backend API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}
