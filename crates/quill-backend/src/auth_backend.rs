use crate::{AuthSubscription, BackendResult, SignUpRequest, SignUpResponse};

use quill_core::{AuthUser, Session, TokenPair};

use async_trait::async_trait;

/// Hosted authentication service.
///
/// Every call is a single round-trip; none of them retry.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Current session, restored from persistent storage if needed.
    async fn get_session(&self) -> BackendResult<Option<Session>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session>;

    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<SignUpResponse>;

    /// Ends the session. Local session state is dropped even when the remote
    /// call fails.
    async fn sign_out(&self) -> BackendResult<()>;

    /// Send a password-reset email whose link points at `redirect_to`.
    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> BackendResult<()>;

    /// Establish a session from the token pair carried by a password-reset
    /// link. Announced as [`AuthEvent::PasswordRecovery`].
    ///
    /// [`AuthEvent::PasswordRecovery`]: quill_core::AuthEvent::PasswordRecovery
    async fn set_session(&self, tokens: &TokenPair) -> BackendResult<Session>;

    /// Change the signed-in user's password.
    async fn update_password(&self, password: &str) -> BackendResult<AuthUser>;

    /// Feed of session-change notifications.
    fn subscribe(&self) -> AuthSubscription;
}
