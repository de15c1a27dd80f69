use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_APP_URL, DEFAULT_SESSION_FILE, RESET_PASSWORD_ROUTE,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Public URL of the app; target of confirmation and reset emails
    pub app_url: String,
    /// Persisted session file, relative to the config directory
    pub session_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_url: String::from(DEFAULT_APP_URL),
            session_file: String::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.app_url.trim().is_empty() {
            return Err(ConfigError::auth("auth.app_url cannot be empty"));
        }

        let path = std::path::Path::new(&self.session_file);
        if self.session_file.is_empty() || path.is_absolute() || self.session_file.contains("..")
        {
            return Err(ConfigError::auth(
                "auth.session_file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Where the email-confirmation link lands.
    pub fn confirm_redirect(&self) -> String {
        self.app_url.trim_end_matches('/').to_string()
    }

    /// Where the password-reset link lands.
    pub fn reset_redirect(&self) -> String {
        format!("{}{}", self.app_url.trim_end_matches('/'), RESET_PASSWORD_ROUTE)
    }
}
