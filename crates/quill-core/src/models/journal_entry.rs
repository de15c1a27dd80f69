use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single journal record owned by one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    /// User-assigned calendar date, independent of the audit timestamps.
    pub date: NaiveDate,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
}

impl JournalEntry {
    /// Apply an edit in place and stamp the local update time.
    pub fn apply_edit(&mut self, title: &str, content: &str, date: NaiveDate, now: DateTime<Utc>) {
        self.title = title.to_string();
        self.content = content.to_string();
        self.date = date;
        self.updated_at = now;
    }
}
