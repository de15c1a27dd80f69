
use std::env;

use tempfile::TempDir;

const OVERRIDE_VARS: [&str; 9] = [
    "QUILL_BACKEND_URL",
    "QUILL_BACKEND_ANON_KEY",
    "QUILL_BACKEND_TABLE",
    "QUILL_BACKEND_TIMEOUT_SECS",
    "QUILL_APP_URL",
    "QUILL_SESSION_FILE",
    "QUILL_LOG_LEVEL",
    "QUILL_LOG_COLORED",
    "QUILL_LOG_FILE",
];

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Isolated config directory with QUILL_CONFIG_DIR pointing at it and every
/// override variable cleared.
pub(crate) struct TestConfigDir {
    pub(crate) temp: TempDir,
    _guards: Vec<EnvGuard>,
}

pub(crate) fn setup_config_dir() -> TestConfigDir {
    let temp = TempDir::new().unwrap();
    let mut guards: Vec<EnvGuard> = OVERRIDE_VARS
        .into_iter()
        .map(EnvGuard::remove)
        .collect();
    guards.push(EnvGuard::set(
        crate::CONFIG_DIR_ENV,
        temp.path().to_str().unwrap(),
    ));
    TestConfigDir {
        temp,
        _guards: guards,
    }
}

impl TestConfigDir {
    pub(crate) fn write_config(&self, contents: &str) {
        std::fs::write(self.temp.path().join(crate::CONFIG_FILE_NAME), contents).unwrap();
    }
}
