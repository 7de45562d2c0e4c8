//! Full guard lifecycle: sign-in, navigation, revocation, post-login
//! redirect.

use ledger_dashboard::api::{ApiError, LoginRequest};
use ledger_dashboard::guard::Access;
use ledger_dashboard::session::DEFAULT_VALIDITY_DAYS;
use ledger_integration_tests::{Harness, MockBackend, TEST_EMAIL, TEST_PASSWORD};
use serde_json::Value;

fn good_credentials() -> LoginRequest {
    LoginRequest {
        email: TEST_EMAIL.parse().expect("test email"),
        password: TEST_PASSWORD.to_owned(),
    }
}

#[tokio::test]
async fn test_revoked_credential_purges_session_and_redirects() {
    let backend = MockBackend::spawn().await;
    let harness = Harness::new(backend.base_url.clone());

    harness
        .api
        .login(&good_credentials(), DEFAULT_VALIDITY_DAYS)
        .await
        .expect("login should succeed");
    assert_eq!(harness.guard.evaluate("/dashboard"), Access::Render);

    let mut auth_changed = harness.store.subscribe();
    auth_changed.borrow_and_update();
    harness.sink.drain();

    // The backend no longer recognizes the token.
    let result: Result<Value, ApiError> = harness.api.get("/revoked").await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));

    // The stale credential is gone and the shell was told to re-evaluate.
    assert!(!harness.store.is_logged_in());
    assert!(auth_changed.has_changed().expect("signal channel open"));
    assert_eq!(
        harness.sink.messages(),
        vec!["Your session is no longer valid"]
    );

    harness.sink.drain();
    assert_eq!(harness.guard.evaluate("/dashboard"), Access::RedirectLogin);
}

#[tokio::test]
async fn test_attempted_route_survives_the_login_round_trip() {
    let backend = MockBackend::spawn().await;
    let harness = Harness::new(backend.base_url.clone());

    // Unauthenticated navigation to a deep link.
    assert_eq!(
        harness.guard.evaluate("/sales/42/edit"),
        Access::RedirectLogin
    );

    harness
        .api
        .login(&good_credentials(), DEFAULT_VALIDITY_DAYS)
        .await
        .expect("login should succeed");

    // The shell sends the user back where they were headed.
    assert_eq!(
        harness.guard.take_requested_route().as_deref(),
        Some("/sales/42/edit")
    );
    assert_eq!(harness.guard.evaluate("/sales/42/edit"), Access::Render);
}

#[tokio::test]
async fn test_admin_still_forbidden_from_company_after_login() {
    let backend = MockBackend::spawn().await;
    let harness = Harness::new(backend.base_url.clone());

    harness
        .api
        .login(&good_credentials(), DEFAULT_VALIDITY_DAYS)
        .await
        .expect("login should succeed");
    harness.sink.drain();

    assert_eq!(
        harness.guard.evaluate("/company/1/details"),
        Access::RedirectUnauthorized
    );
    assert_eq!(
        harness.sink.messages(),
        vec!["You do not have access to this page"]
    );
    // A forbidden page does not end the session.
    assert!(harness.store.is_logged_in());
}
