//! Application state shared across the dashboard shell.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::guard::AccessGuard;
use crate::notify::{NoticeSink, TracingSink};
use crate::session::{FileStorage, SessionStore};

/// Application state shared across the dashboard.
///
/// This struct is cheaply cloneable via `Arc` and wires the session store,
/// the access guard, and the API client over one configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    store: Arc<SessionStore>,
    guard: AccessGuard,
    api: ApiClient,
}

impl AppState {
    /// Create application state from environment configuration, delivering
    /// notices to structured logs.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn from_env() -> Result<Self, DashboardError> {
        let config = DashboardConfig::from_env()?;
        Ok(Self::new(config, Arc::new(TracingSink)))
    }

    /// Create application state over the given configuration and notice
    /// sink.
    #[must_use]
    pub fn new(config: DashboardConfig, notices: Arc<dyn NoticeSink>) -> Self {
        let storage = Arc::new(FileStorage::new(config.session_file.clone()));
        let store = Arc::new(SessionStore::new(storage));
        let guard = AccessGuard::new(Arc::clone(&store), Arc::clone(&notices));
        let api = ApiClient::new(
            config.api_base_url.clone(),
            Arc::clone(&store),
            notices,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                guard,
                api,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.inner.store
    }

    /// Get a reference to the access guard.
    #[must_use]
    pub fn guard(&self) -> &AccessGuard {
        &self.inner.guard
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}
