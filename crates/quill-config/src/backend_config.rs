use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BACKEND_URL, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECS,
    MAX_TIMEOUT_SECS,
};

use serde::Deserialize;

/// Connection settings for the hosted auth + table service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub url: String,
    /// Public (anon) API key sent with every request
    pub anon_key: String,
    /// Table holding journal entries
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_BACKEND_URL),
            anon_key: String::new(),
            table: String::from(DEFAULT_TABLE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::backend(format!(
                "backend.url must start with http:// or https://, got '{}'",
                self.url
            )));
        }

        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::backend(
                "backend.anon_key is required (set QUILL_BACKEND_ANON_KEY)",
            ));
        }

        if self.table.trim().is_empty() {
            return Err(ConfigError::backend("backend.table cannot be empty"));
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::backend(format!(
                "backend.timeout_secs must be 1-{}, got {}",
                MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }
}
