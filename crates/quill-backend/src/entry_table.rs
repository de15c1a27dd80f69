use crate::BackendResult;

use quill_core::{EntryPatchRow, JournalEntryRow, NewEntryRow};

use async_trait::async_trait;

/// Remote row store for journal entries.
#[async_trait]
pub trait EntryTable: Send + Sync {
    /// All rows owned by `owner_id`, most recent entry date first.
    async fn select_owned(&self, owner_id: &str) -> BackendResult<Vec<JournalEntryRow>>;

    /// Insert one row and return it as stored.
    async fn insert(&self, row: &NewEntryRow) -> BackendResult<JournalEntryRow>;

    /// Update the row with `id`. Matching no row is not an error.
    async fn update(&self, id: &str, patch: &EntryPatchRow) -> BackendResult<()>;

    /// Delete the row with `id`. Matching no row is not an error.
    async fn delete(&self, id: &str) -> BackendResult<()>;
}
