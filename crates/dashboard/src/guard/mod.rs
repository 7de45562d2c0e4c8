//! The access guard.
//!
//! Evaluated fresh on every route change and on every auth-changed signal.
//! The guard holds no authorization state of its own beyond the remembered
//! post-login route; everything else is read from the session store at
//! evaluation time.

pub mod routes;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::notify::{Notice, NoticeSink};
use crate::session::SessionStore;

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The shell has not finished its first session load; render nothing
    /// and do not redirect.
    Wait,
    /// Show the requested content.
    Render,
    /// Navigate to the login page.
    RedirectLogin,
    /// Navigate to the unauthorized page.
    RedirectUnauthorized,
}

/// Route-authorization gatekeeper wrapping the protected view tree.
///
/// Decision priority, highest first: still loading, public route, expired
/// session (purges), no session, role-forbidden prefix, authorized. All
/// failures resolve locally into a notice plus a redirect outcome; nothing
/// here ever panics or bubbles an error into the rendering layer.
pub struct AccessGuard {
    store: Arc<SessionStore>,
    notices: Arc<dyn NoticeSink>,
    ready: AtomicBool,
    requested_route: Mutex<Option<String>>,
}

impl AccessGuard {
    /// Create a guard over the session store, delivering notices to `sink`.
    ///
    /// The guard starts in the loading state; call
    /// [`mark_ready`](Self::mark_ready) once the shell's first session load
    /// has completed.
    #[must_use]
    pub fn new(store: Arc<SessionStore>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            store,
            notices,
            ready: AtomicBool::new(false),
            requested_route: Mutex::new(None),
        }
    }

    /// End the loading state. Idempotent.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Whether initialization has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Decide render-vs-redirect for the given route.
    ///
    /// Side effects follow the decision: an expired session is cleared, a
    /// missing session remembers the attempted route for post-login
    /// redirect, and every redirect emits a user notice.
    pub fn evaluate(&self, route: &str) -> Access {
        if !self.is_ready() {
            return Access::Wait;
        }

        if routes::is_public(route) {
            return Access::Render;
        }

        match self.store.load() {
            Some(record) if record.is_expired() => {
                if let Err(e) = self.store.clear() {
                    // The record stays unusable either way; expiry is
                    // re-checked on every evaluation.
                    tracing::warn!(error = %e, "failed to purge expired session");
                }
                self.notices
                    .notify(Notice::error("Your session has expired"));
                debug!(route, "session expired, redirecting to login");
                Access::RedirectLogin
            }
            None => {
                self.remember_route(route);
                self.notices
                    .notify(Notice::error("Please sign in to continue"));
                debug!(route, "no session, redirecting to login");
                Access::RedirectLogin
            }
            Some(record) => {
                let role = record.user.role;
                if routes::is_forbidden(role, route) {
                    self.notices
                        .notify(Notice::error("You do not have access to this page"));
                    debug!(route, %role, "role forbidden, redirecting to unauthorized");
                    Access::RedirectUnauthorized
                } else {
                    Access::Render
                }
            }
        }
    }

    /// Take the route remembered from the last unauthenticated attempt,
    /// for post-login redirect. Yields it at most once.
    #[must_use]
    pub fn take_requested_route(&self) -> Option<String> {
        let mut guard = self
            .requested_route
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }

    fn remember_route(&self, route: &str) {
        let mut guard = self
            .requested_route
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(route.to_owned());
    }
}
