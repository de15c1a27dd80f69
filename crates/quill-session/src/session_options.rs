use quill_config::AuthConfig;

/// Redirect targets handed to the auth backend in outgoing emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Link target in the signup confirmation email
    pub confirm_redirect: Option<String>,
    /// Link target in the password-reset email
    pub reset_redirect: Option<String>,
}

impl From<&AuthConfig> for SessionOptions {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            confirm_redirect: Some(auth.confirm_redirect()),
            reset_redirect: Some(auth.reset_redirect()),
        }
    }
}
