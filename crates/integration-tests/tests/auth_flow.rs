//! Sign-in and sign-out against the mock accounts backend.

use ledger_dashboard::api::{ApiError, LoginRequest};
use ledger_dashboard::guard::Access;
use ledger_dashboard::session::DEFAULT_VALIDITY_DAYS;
use ledger_integration_tests::{
    Harness, MockBackend, TEST_ACCESS, TEST_EMAIL, TEST_PASSWORD, TEST_RAW, TEST_REFRESH,
};

fn good_credentials() -> LoginRequest {
    LoginRequest {
        email: TEST_EMAIL.parse().expect("test email"),
        password: TEST_PASSWORD.to_owned(),
    }
}

#[tokio::test]
async fn test_login_persists_session_and_renders() {
    let backend = MockBackend::spawn().await;
    let harness = Harness::new(backend.base_url.clone());

    assert_eq!(harness.guard.evaluate("/dashboard"), Access::RedirectLogin);
    harness.sink.drain();

    let record = harness
        .api
        .login(&good_credentials(), DEFAULT_VALIDITY_DAYS)
        .await
        .expect("login should succeed");

    assert_eq!(record.tokens.access, TEST_ACCESS);
    assert_eq!(record.tokens.refresh, TEST_REFRESH);
    assert_eq!(record.credential(), TEST_RAW);
    assert_eq!(record.user.email.as_str(), TEST_EMAIL);

    assert!(harness.store.is_logged_in());
    assert_eq!(harness.sink.messages(), vec!["Signed in successfully"]);
    assert_eq!(harness.guard.evaluate("/dashboard"), Access::Render);
}

#[tokio::test]
async fn test_rejected_login_leaves_no_session() {
    let backend = MockBackend::spawn().await;
    let harness = Harness::new(backend.base_url.clone());

    let request = LoginRequest {
        email: TEST_EMAIL.parse().expect("test email"),
        password: "wrong".to_owned(),
    };
    let result = harness.api.login(&request, DEFAULT_VALIDITY_DAYS).await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert!(!harness.store.is_logged_in());
    assert_eq!(harness.guard.evaluate("/dashboard"), Access::RedirectLogin);
}

#[tokio::test]
async fn test_logout_clears_session_and_signals() {
    let backend = MockBackend::spawn().await;
    let harness = Harness::new(backend.base_url.clone());

    harness
        .api
        .login(&good_credentials(), DEFAULT_VALIDITY_DAYS)
        .await
        .expect("login should succeed");
    assert_eq!(harness.guard.evaluate("/sales/list"), Access::Render);

    let mut auth_changed = harness.store.subscribe();
    auth_changed.borrow_and_update();
    harness.sink.drain();

    harness.api.logout().expect("logout should succeed");

    assert!(auth_changed.has_changed().expect("signal channel open"));
    assert!(!harness.store.is_logged_in());
    assert_eq!(harness.sink.messages(), vec!["Signed out successfully"]);

    harness.sink.drain();
    assert_eq!(harness.guard.evaluate("/sales/list"), Access::RedirectLogin);
}
