use crate::JournalEntry;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Row shape of the remote `journal_entries` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(with = "crate::models::entry_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: String,
}

impl From<JournalEntryRow> for JournalEntry {
    fn from(row: JournalEntryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content.unwrap_or_default(),
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at.unwrap_or(row.created_at),
            owner_id: row.user_id,
        }
    }
}

/// Insert payload. The server assigns `id` and the audit timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NewEntryRow {
    pub title: String,
    pub content: String,
    #[serde(with = "crate::models::entry_date")]
    pub date: NaiveDate,
    pub user_id: String,
}

/// Update payload for an existing row.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPatchRow {
    pub title: String,
    pub content: String,
    #[serde(with = "crate::models::entry_date")]
    pub date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}
