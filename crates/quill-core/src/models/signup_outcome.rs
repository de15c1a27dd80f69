use serde::Serialize;

pub const ALREADY_IN_USE_MESSAGE: &str =
    "This email is already in use. Please use a different email or sign in.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Failed to create account. Please try again.";
pub const GENERIC_SIGNUP_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Result of a signup attempt. Exactly one variant applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignupOutcome {
    /// Account created and a session is already active.
    SessionActive,
    /// Account created; the user must confirm their email before signing in.
    ConfirmationRequired,
    Failed { reason: String },
}

impl SignupOutcome {
    pub fn failed<S: Into<String>>(reason: S) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn already_in_use() -> Self {
        Self::failed(ALREADY_IN_USE_MESSAGE)
    }

    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn needs_email_confirm(&self) -> bool {
        matches!(self, Self::ConfirmationRequired)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}
