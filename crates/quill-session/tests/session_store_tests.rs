//! Session store against the in-memory auth fake

mod common;

use common::{FakeAuth, identity, session_for, user, wait_until};

use quill_backend::{BackendError, SignUpResponse};
use quill_core::{ALREADY_IN_USE_MESSAGE, AuthEvent, SignupOutcome};
use quill_session::SessionStore;

use std::sync::Arc;

use googletest::assert_that;
use googletest::prelude::{eq, none, some};

fn store(auth: &Arc<FakeAuth>) -> SessionStore {
    SessionStore::new(auth.clone(), Some("http://localhost:8080".into()))
}

// =========================================================================
// restore_session
// =========================================================================

#[tokio::test]
async fn given_persisted_session_when_restored_then_identity_populated() {
    // Given
    let auth = FakeAuth::new();
    auth.store_session("u-1");
    let store = store(&auth);

    // When
    store.restore_session().await;

    // Then
    assert_that!(store.identity(), some(eq(&identity("u-1"))));
}

#[tokio::test]
async fn given_no_persisted_session_when_restored_then_identity_absent() {
    let auth = FakeAuth::new();
    let store = store(&auth);

    store.restore_session().await;

    assert_that!(store.identity(), none());
}

#[tokio::test]
async fn given_backend_unreachable_when_restored_then_identity_absent() {
    let auth = FakeAuth::new();
    auth.go_offline();
    let store = store(&auth);

    store.restore_session().await;

    assert_that!(store.identity(), none());
}

#[tokio::test]
async fn given_restore_called_twice_when_listening_then_subscribed_once() {
    let auth = FakeAuth::new();
    let store = store(&auth);

    store.restore_session().await;
    store.restore_session().await;

    assert_eq!(auth.subscriber_count(), 1);
}

#[tokio::test]
async fn given_disposed_store_when_checked_then_subscription_released() {
    let auth = FakeAuth::new();
    let store = store(&auth);
    store.restore_session().await;

    store.dispose().await;

    assert_eq!(auth.subscriber_count(), 0);
}

// =========================================================================
// Pushed session changes
// =========================================================================

#[tokio::test]
async fn given_listening_store_when_sign_in_pushed_then_identity_follows() {
    // Given
    let auth = FakeAuth::new();
    let store = store(&auth);
    store.restore_session().await;
    let mut identity_rx = store.subscribe_identity();

    // When
    auth.emit(AuthEvent::SignedIn(session_for("u-7")));

    // Then
    identity_rx.changed().await.unwrap();
    assert_that!(store.identity(), some(eq(&identity("u-7"))));
}

#[tokio::test]
async fn given_signed_in_store_when_sign_out_pushed_then_identity_cleared() {
    let auth = FakeAuth::new();
    auth.store_session("u-1");
    let store = store(&auth);
    store.restore_session().await;

    auth.emit(AuthEvent::SignedOut);

    let store = &store;
    assert!(wait_until(|| async move { store.identity().is_none() }).await);
}

#[tokio::test]
async fn given_listening_store_when_password_recovery_pushed_then_identity_follows() {
    let auth = FakeAuth::new();
    let store = store(&auth);
    store.restore_session().await;
    let mut identity_rx = store.subscribe_identity();

    auth.emit(AuthEvent::PasswordRecovery(session_for("u-3")));

    identity_rx.changed().await.unwrap();
    assert_that!(store.identity(), some(eq(&identity("u-3"))));
}

#[tokio::test]
async fn given_token_refresh_pushed_when_same_user_then_no_identity_change() {
    let auth = FakeAuth::new();
    auth.store_session("u-1");
    let store = store(&auth);
    store.restore_session().await;
    let mut identity_rx = store.subscribe_identity();
    identity_rx.borrow_and_update();

    auth.emit(AuthEvent::TokenRefreshed(session_for("u-1")));
    auth.emit(AuthEvent::SignedIn(session_for("u-2")));

    identity_rx.changed().await.unwrap();
    assert_that!(
        identity_rx.borrow().as_ref().map(|i| i.id.clone()),
        some(eq("u-2"))
    );
}

// =========================================================================
// login / logout
// =========================================================================

#[tokio::test]
async fn given_valid_credentials_when_login_then_true_and_identity_set() {
    // Given
    let auth = FakeAuth::new();
    auth.add_account("ana@example.com", "secret1", "u-1");
    let store = store(&auth);

    // When
    let ok = store.login("ana@example.com", "secret1").await;

    // Then
    assert!(ok);
    let current = store.identity().unwrap();
    assert_that!(current.email, eq("u-1@example.com"));
    assert_that!(current.display_name, some(eq("Name of u-1")));
}

#[tokio::test]
async fn given_wrong_password_when_login_then_false() {
    let auth = FakeAuth::new();
    auth.add_account("ana@example.com", "secret1", "u-1");
    let store = store(&auth);

    assert!(!store.login("ana@example.com", "nope").await);
    assert_that!(store.identity(), none());
}

#[tokio::test]
async fn given_backend_unreachable_when_login_then_false() {
    let auth = FakeAuth::new();
    auth.add_account("ana@example.com", "secret1", "u-1");
    auth.go_offline();
    let store = store(&auth);

    assert!(!store.login("ana@example.com", "secret1").await);
}

#[tokio::test]
async fn given_signed_in_when_logout_then_identity_cleared() {
    let auth = FakeAuth::new();
    auth.add_account("ana@example.com", "secret1", "u-1");
    let store = store(&auth);
    store.login("ana@example.com", "secret1").await;

    store.logout().await;

    assert_that!(store.identity(), none());
}

#[tokio::test]
async fn given_remote_sign_out_fails_when_logout_then_identity_still_cleared() {
    let auth = FakeAuth::new();
    auth.add_account("ana@example.com", "secret1", "u-1");
    auth.fail_sign_out();
    let store = store(&auth);
    store.login("ana@example.com", "secret1").await;

    store.logout().await;

    assert_that!(store.identity(), none());
}

// =========================================================================
// signup
// =========================================================================

#[tokio::test]
async fn given_new_email_when_signup_then_name_and_redirect_submitted() {
    // Given
    let auth = FakeAuth::new();
    let store = store(&auth);

    // When
    let outcome = store.signup("ana@example.com", "secret1", "Ana").await;

    // Then
    assert_eq!(outcome, SignupOutcome::ConfirmationRequired);
    let requests = auth.sign_up_requests();
    assert_that!(requests[0].name, eq("Ana"));
    assert_that!(
        requests[0].redirect_to.as_deref(),
        some(eq("http://localhost:8080"))
    );
    assert_that!(store.identity(), none());
}

#[tokio::test]
async fn given_autoconfirm_when_signup_then_session_active_and_identity_set() {
    let auth = FakeAuth::new();
    auth.reply_to_sign_up(Ok(SignUpResponse {
        user: Some(user("u-3")),
        session: Some(session_for("u-3")),
    }));
    let store = store(&auth);

    let outcome = store.signup("u-3@example.com", "secret1", "Ana").await;

    assert_eq!(outcome, SignupOutcome::SessionActive);
    assert_that!(store.identity(), some(eq(&identity("u-3"))));
}

#[tokio::test]
async fn given_unconfirmed_existing_email_when_signup_then_already_in_use() {
    let auth = FakeAuth::new();
    let mut existing = user("u-1");
    existing.identities = Some(vec![]);
    auth.reply_to_sign_up(Ok(SignUpResponse {
        user: Some(existing),
        session: None,
    }));
    let store = store(&auth);

    let outcome = store.signup("u-1@example.com", "secret1", "Ana").await;

    assert_that!(outcome.error(), some(eq(ALREADY_IN_USE_MESSAGE)));
}

#[tokio::test]
async fn given_already_registered_error_when_signup_then_already_in_use() {
    let auth = FakeAuth::new();
    auth.reply_to_sign_up(Err(BackendError::api(422, "Already Registered User")));
    let store = store(&auth);

    let outcome = store.signup("u-1@example.com", "secret1", "Ana").await;

    assert_that!(outcome.error(), some(eq(ALREADY_IN_USE_MESSAGE)));
    assert!(!outcome.is_ok());
    assert!(!outcome.needs_email_confirm());
}
