#![allow(dead_code)]

use quill_backend::{BackendClient, HttpAuthBackend, HttpEntryTable, SessionFile};

use std::path::PathBuf;
use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

pub const ANON_KEY: &str = "anon-key";
pub const TABLE: &str = "journal_entries";

pub struct Harness {
    pub auth: HttpAuthBackend,
    pub entries: HttpEntryTable,
    pub session_path: PathBuf,
    _temp: TempDir,
}

pub fn harness(server: &MockServer) -> Harness {
    let temp = TempDir::new().unwrap();
    let session_path = temp.path().join("session.json");
    let client = BackendClient::new(&server.uri(), ANON_KEY, Duration::from_secs(5)).unwrap();

    Harness {
        auth: HttpAuthBackend::new(client.clone(), SessionFile::new(session_path.clone())),
        entries: HttpEntryTable::new(client, TABLE),
        session_path,
        _temp: temp,
    }
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "user_metadata": {"name": "Ana"},
        "identities": [{"id": format!("ident-{id}"), "provider": "email"}]
    })
}

pub fn session_json(id: &str, access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": format!("refresh-{id}"),
        "token_type": "bearer",
        "expires_in": 3600,
        "user": user_json(id)
    })
}

pub fn row_json(id: &str, title: &str, date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "body",
        "date": date,
        "created_at": "2024-03-01T10:00:00+00:00",
        "updated_at": "2024-03-01T10:00:00+00:00",
        "user_id": "u-1"
    })
}
