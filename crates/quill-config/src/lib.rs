mod auth_config;
mod backend_config;
mod config;
mod error;
mod log_level;
mod logging_config;

pub use auth_config::AuthConfig;
pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;

pub const CONFIG_DIR_ENV: &str = "QUILL_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".quill";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_TABLE: &str = "journal_entries";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;
const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_SESSION_FILE: &str = "session.json";
const RESET_PASSWORD_ROUTE: &str = "/#/reset-password";
const DEFAULT_LOG_LEVEL_STRING: &str = "warn";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
