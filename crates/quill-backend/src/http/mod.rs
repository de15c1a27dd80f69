pub mod backend_client;
pub mod http_auth_backend;
pub mod http_entry_table;

use crate::{BackendClient, BackendResult, HttpAuthBackend, HttpEntryTable, SessionFile};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use quill_config::Config;

/// Auth service and entry table sharing one HTTP client and session slot.
pub struct HttpBackend {
    pub auth: Arc<HttpAuthBackend>,
    pub entries: Arc<HttpEntryTable>,
}

impl HttpBackend {
    pub fn from_config(config: &Config, config_dir: &Path) -> BackendResult<Self> {
        let client = BackendClient::new(
            &config.backend.url,
            &config.backend.anon_key,
            Duration::from_secs(config.backend.timeout_secs),
        )?;
        let store = SessionFile::new(config.session_path(config_dir));

        Ok(Self {
            auth: Arc::new(HttpAuthBackend::new(client.clone(), store)),
            entries: Arc::new(HttpEntryTable::new(client, &config.backend.table)),
        })
    }
}
