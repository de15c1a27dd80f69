use crate::Session;

/// Session-change notification pushed by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
    UserUpdated(Session),
    PasswordRecovery(Session),
}

impl AuthEvent {
    /// Session carried by the event, `None` for sign-out.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(s)
            | Self::TokenRefreshed(s)
            | Self::UserUpdated(s)
            | Self::PasswordRecovery(s) => Some(s),
            Self::SignedOut => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignedIn(_) => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed(_) => "TOKEN_REFRESHED",
            Self::UserUpdated(_) => "USER_UPDATED",
            Self::PasswordRecovery(_) => "PASSWORD_RECOVERY",
        }
    }
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
