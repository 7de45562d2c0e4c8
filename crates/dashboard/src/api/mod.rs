//! Backend REST API client.
//!
//! Thin wrapper over `reqwest` that joins request paths onto the configured
//! base URL, attaches the session credential as a bearer header, stamps an
//! `x-request-id` header for correlation, and turns backend rejections into
//! [`ApiError`] values.
//!
//! A `401` from the backend purges the session immediately - a stale
//! credential must never stay in storage. The client does not navigate; the
//! next guard evaluation lands on the login redirect on its own.

mod auth;

pub use auth::{LoginRequest, LoginResponse};

use std::sync::Arc;

use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;
use uuid::Uuid;

use crate::notify::{Notice, NoticeSink};
use crate::session::{SessionError, SessionStore};

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Session write failed (login saves the returned session).
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Request path does not form a valid URL.
    #[error("invalid request path: {0}")]
    InvalidPath(#[from] url::ParseError),

    /// Backend rejected the credential. The session has been purged.
    #[error("unauthorized")]
    Unauthorized,

    /// Backend reported a server-side failure.
    #[error("server error: {status}")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// Any other non-success response.
    #[error("request failed ({status}): {message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        message: String,
    },
}

/// Client for the backend REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<SessionStore>,
    notices: Arc<dyn NoticeSink>,
}

impl ApiClient {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: Url, store: Arc<SessionStore>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            notices,
        }
    }

    /// GET `path` and parse the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// unparseable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Ok(response.json().await?)
    }

    /// POST `body` to `path` and parse the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// unparseable body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// PATCH `body` to `path` and parse the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// unparseable body.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// DELETE `path`, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-success status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// The session store this client reads credentials from.
    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub(crate) fn notices(&self) -> &Arc<dyn NoticeSink> {
        &self.notices
    }

    /// Join a request path onto the base URL, keeping the base URL's own
    /// path segments (axios-style concatenation, not RFC 3986 resolution).
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path)?;
        let request_id = Uuid::new_v4().to_string();

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(header::ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, &request_id);

        if let Some(record) = self.store.load() {
            builder = builder.bearer_auth(record.credential());
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, %url, %request_id, "api request");
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(%url, %request_id, "backend rejected credentials, purging session");
            if let Err(e) = self.store.clear() {
                error!(error = %e, "failed to purge session after 401");
            }
            self.notices
                .notify(Notice::error("Your session is no longer valid"));
            return Err(ApiError::Unauthorized);
        }

        if status.is_server_error() {
            error!(%url, %request_id, %status, "backend server error");
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Request {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::TracingSink;
    use crate::session::MemoryStorage;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(
            Url::parse(base).unwrap(),
            Arc::new(SessionStore::new(Arc::new(MemoryStorage::new()))),
            Arc::new(TracingSink),
        )
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client("https://api.example.com/v1");
        let url = api.endpoint("/accounts/login/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/accounts/login/");
    }

    #[test]
    fn test_endpoint_with_trailing_and_leading_slashes() {
        let api = client("https://api.example.com/v1/");
        assert_eq!(
            api.endpoint("accounts/login/").unwrap().as_str(),
            "https://api.example.com/v1/accounts/login/"
        );
        assert_eq!(
            api.endpoint("/products/list").unwrap().as_str(),
            "https://api.example.com/v1/products/list"
        );
    }
}
