use crate::SessionResult;

use quill_backend::{AuthBackend, parse_reset_tokens, strip_reset_tokens};
use quill_core::{CoreError, validate_email, validate_new_password};

use std::sync::Arc;

use log::{info, warn};

const INVALID_LINK_MESSAGE: &str =
    "Invalid or expired link. Please request a new password reset link.";

/// What opening a reset link amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetLink {
    /// Tokens accepted; a session is active. Holds the link with the tokens
    /// stripped.
    Verified { clean_url: String },
    /// No tokens in the link; nothing changed.
    DirectVisit,
}

/// Forgot-password and reset-password flow.
pub struct PasswordReset {
    auth: Arc<dyn AuthBackend>,
    redirect_to: Option<String>,
}

impl PasswordReset {
    pub fn new(auth: Arc<dyn AuthBackend>, redirect_to: Option<String>) -> Self {
        Self { auth, redirect_to }
    }

    /// Email a reset link to `email`.
    pub async fn request(&self, email: &str) -> SessionResult<()> {
        validate_email(email)?;
        self.auth
            .reset_password_for_email(email.trim(), self.redirect_to.as_deref())
            .await?;
        info!("Password reset email requested");
        Ok(())
    }

    /// Establish a session from the tokens carried by `link`.
    pub async fn begin(&self, link: &str) -> SessionResult<ResetLink> {
        let Some(tokens) = parse_reset_tokens(link) else {
            return Ok(ResetLink::DirectVisit);
        };

        if let Err(e) = self.auth.set_session(&tokens).await {
            warn!("Reset link rejected: {e}");
            return Err(CoreError::invalid_reset_link(INVALID_LINK_MESSAGE).into());
        }

        Ok(ResetLink::Verified {
            clean_url: strip_reset_tokens(link),
        })
    }

    /// Set the new password for the session opened by [`Self::begin`].
    pub async fn complete(&self, password: &str, confirm: &str) -> SessionResult<()> {
        validate_new_password(password, confirm)?;
        self.auth.update_password(password).await?;
        info!("Password updated");
        Ok(())
    }
}
