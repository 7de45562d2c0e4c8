//! Integration test support for Management Ledger.
//!
//! Provides an in-process mock of the backend accounts API (an `axum`
//! server bound to an ephemeral port) plus a [`Harness`] that wires a
//! memory-backed session store, a buffering notice sink, an access guard,
//! and an API client the way the dashboard shell does.
//!
//! The mock backend accepts exactly one credential pair
//! ([`TEST_EMAIL`] / [`TEST_PASSWORD`]) and exposes:
//!
//! - `POST /accounts/login/` - issues tokens and an admin profile
//! - `GET /whoami` - echoes back the `Authorization` header it received
//! - `GET /revoked` - always responds `401`
//! - `GET /boom` - always responds `500`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

use ledger_dashboard::api::ApiClient;
use ledger_dashboard::guard::AccessGuard;
use ledger_dashboard::notify::{MemorySink, NoticeSink};
use ledger_dashboard::session::{MemoryStorage, SessionStore};

/// The one email the mock backend accepts.
pub const TEST_EMAIL: &str = "owner@example.com";

/// The one password the mock backend accepts.
pub const TEST_PASSWORD: &str = "correct-horse";

/// Access token issued by the mock backend.
pub const TEST_ACCESS: &str = "access-jwt";

/// Refresh token issued by the mock backend.
pub const TEST_REFRESH: &str = "refresh-jwt";

/// Raw legacy token issued by the mock backend.
pub const TEST_RAW: &str = "raw-token";

/// An in-process mock of the backend accounts API.
pub struct MockBackend {
    /// Base URL of the running mock, e.g. `http://127.0.0.1:54321/`.
    pub base_url: Url,
}

impl MockBackend {
    /// Bind an ephemeral port and serve the mock routes in the background.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound. Test-only code.
    pub async fn spawn() -> Self {
        let app = Router::new()
            .route("/accounts/login/", post(login))
            .route("/whoami", get(whoami))
            .route("/revoked", get(revoked))
            .route("/boom", get(boom));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        let base_url = Url::parse(&format!("http://{addr}/")).expect("mock backend url");
        Self { base_url }
    }
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);

    if email == Some(TEST_EMAIL) && password == Some(TEST_PASSWORD) {
        (
            StatusCode::OK,
            Json(json!({
                "access": TEST_ACCESS,
                "refresh": TEST_REFRESH,
                "token": TEST_RAW,
                "user": {
                    "id": 1,
                    "email": TEST_EMAIL,
                    "role": "admin",
                    "first_name": "Olta",
                    "last_name": "Berisha"
                }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "invalid credentials"})),
        )
    }
}

async fn whoami(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let request_id = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok());

    Json(json!({"authorization": authorization, "request_id": request_id}))
}

async fn revoked() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "token revoked"})),
    )
}

async fn boom() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "backend exploded"})),
    )
}

/// The dashboard's auth wiring over a memory store, pointed at a mock
/// backend.
pub struct Harness {
    /// The shared session store.
    pub store: Arc<SessionStore>,
    /// Captures every notice the guard and client emit.
    pub sink: Arc<MemorySink>,
    /// Guard over the store, already past its loading state.
    pub guard: AccessGuard,
    /// Client against the mock backend.
    pub api: ApiClient,
}

impl Harness {
    /// Wire a fresh harness against `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let sink = Arc::new(MemorySink::new());

        let guard = AccessGuard::new(
            Arc::clone(&store),
            Arc::clone(&sink) as Arc<dyn NoticeSink>,
        );
        guard.mark_ready();

        let api = ApiClient::new(
            base_url,
            Arc::clone(&store),
            Arc::clone(&sink) as Arc<dyn NoticeSink>,
        );

        Self {
            store,
            sink,
            guard,
            api,
        }
    }
}
