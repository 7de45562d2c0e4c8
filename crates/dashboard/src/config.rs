//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LEDGER_API_BASE_URL` - Base URL of the backend REST API
//!
//! ## Optional
//! - `LEDGER_SESSION_FILE` - Path of the persisted session record
//!   (default: `management-ledger.json`)
//! - `LEDGER_SESSION_DAYS` - Session validity window in days (default: 30)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::session::DEFAULT_VALIDITY_DAYS;

/// Default file name for the persisted session record. Matches the storage
/// key the original dashboard used in the browser.
pub const DEFAULT_SESSION_FILE: &str = "management-ledger.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// A variable is set but cannot be parsed.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the backend REST API.
    pub api_base_url: Url,
    /// Path of the persisted session record.
    pub session_file: PathBuf,
    /// Session validity window in days.
    pub session_validity_days: i64,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Extracted from [`from_env`](Self::from_env) so tests can supply
    /// variables without mutating process environment.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_env`](Self::from_env).
    pub fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = get("LEDGER_API_BASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("LEDGER_API_BASE_URL".to_owned()))?;
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("LEDGER_API_BASE_URL".to_owned(), e.to_string())
        })?;

        let session_file = get("LEDGER_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let session_validity_days = match get("LEDGER_SESSION_DAYS") {
            None => DEFAULT_VALIDITY_DAYS,
            Some(raw) => {
                let days = raw.parse::<i64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("LEDGER_SESSION_DAYS".to_owned(), e.to_string())
                })?;
                if days <= 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "LEDGER_SESSION_DAYS".to_owned(),
                        format!("must be positive (got {days})"),
                    ));
                }
                days
            }
        };

        Ok(Self {
            api_base_url,
            session_file,
            session_validity_days,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup_of<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = DashboardConfig::from_lookup(lookup_of(&[(
            "LEDGER_API_BASE_URL",
            "https://api.example.com/v1/",
        )]))
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        assert_eq!(config.session_validity_days, DEFAULT_VALIDITY_DAYS);
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        let result = DashboardConfig::from_lookup(lookup_of(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let result = DashboardConfig::from_lookup(lookup_of(&[(
            "LEDGER_API_BASE_URL",
            "not a url",
        )]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup_of(&[
            ("LEDGER_API_BASE_URL", "http://localhost:8000/"),
            ("LEDGER_SESSION_FILE", "/tmp/ledger/session.json"),
            ("LEDGER_SESSION_DAYS", "7"),
        ]))
        .unwrap();

        assert_eq!(config.session_file, PathBuf::from("/tmp/ledger/session.json"));
        assert_eq!(config.session_validity_days, 7);
    }

    #[test]
    fn test_non_positive_validity_is_an_error() {
        for bad in ["0", "-3", "ten"] {
            let result = DashboardConfig::from_lookup(lookup_of(&[
                ("LEDGER_API_BASE_URL", "http://localhost:8000/"),
                ("LEDGER_SESSION_DAYS", bad),
            ]));
            assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
        }
    }
}
