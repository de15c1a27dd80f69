use crate::{SessionError, SessionResult};

use quill_backend::EntryTable;
use quill_core::{EntryPatchRow, Identity, JournalEntry, NewEntryRow};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, Utc};
use log::debug;
use tokio::sync::{RwLock, watch};

#[derive(Default)]
struct EntryCache {
    /// Identity the entries were fetched for
    owner: Option<String>,
    entries: Vec<JournalEntry>,
    /// A fetch for `owner` has succeeded
    loaded: bool,
}

impl EntryCache {
    fn owned_by(&self, owner: Option<&str>) -> bool {
        self.owner.as_deref() == owner
    }

    /// Empty the cache if it was filled for someone else.
    fn reconcile(&mut self, owner: Option<&str>) {
        if self.owned_by(owner) {
            return;
        }
        if !self.entries.is_empty() {
            debug!("Identity changed, dropping {} cached entries", self.entries.len());
        }
        self.entries.clear();
        self.owner = owner.map(String::from);
        self.loaded = false;
    }
}

/// Entry CRUD against the remote table with a local cache scoped to the
/// current identity.
///
/// Remote calls go first; the cache is patched only after they succeed.
pub struct EntryRepository {
    table: Arc<dyn EntryTable>,
    identity: watch::Receiver<Option<Identity>>,
    cache: RwLock<EntryCache>,
    in_flight: AtomicUsize,
}

impl EntryRepository {
    pub fn new(table: Arc<dyn EntryTable>, identity: watch::Receiver<Option<Identity>>) -> Self {
        Self {
            table,
            identity,
            cache: RwLock::new(EntryCache::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn current_owner(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|i| i.id.clone())
    }

    async fn reconciled_owner(&self) -> Option<String> {
        let owner = self.current_owner();
        self.cache.write().await.reconcile(owner.as_deref());
        owner
    }

    fn busy(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight(&self.in_flight)
    }

    /// Replace the cache with every row owned by the current identity, most
    /// recent entry date first. Without an identity the cache is emptied.
    pub async fn load(&self) -> SessionResult<()> {
        let Some(owner) = self.reconciled_owner().await else {
            return Ok(());
        };

        let rows = {
            let _busy = self.busy();
            self.table.select_owned(&owner).await?
        };

        let mut entries: Vec<JournalEntry> = rows.into_iter().map(JournalEntry::from).collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        let mut cache = self.cache.write().await;
        cache.reconcile(self.current_owner().as_deref());
        if !cache.owned_by(Some(&owner)) {
            debug!("Identity changed during load, discarding {} rows", entries.len());
            return Ok(());
        }

        debug!("Loaded {} entries", entries.len());
        cache.entries = entries;
        cache.loaded = true;
        Ok(())
    }

    /// Load unless the cache already holds a successful fetch for the current
    /// identity.
    pub async fn ensure_loaded(&self) -> SessionResult<()> {
        if self.is_loaded().await {
            return Ok(());
        }
        self.load().await
    }

    /// True once a fetch for the current identity has succeeded.
    pub async fn is_loaded(&self) -> bool {
        let owner = self.current_owner();
        let cache = self.cache.read().await;
        owner.is_some() && cache.loaded && cache.owned_by(owner.as_deref())
    }

    /// Insert a new entry for the current identity and return its id.
    pub async fn create(&self, title: &str, content: &str, date: NaiveDate) -> SessionResult<String> {
        let owner = self
            .reconciled_owner()
            .await
            .ok_or_else(SessionError::not_signed_in)?;

        let row = {
            let _busy = self.busy();
            self.table
                .insert(&NewEntryRow {
                    title: title.to_string(),
                    content: content.to_string(),
                    date,
                    user_id: owner.clone(),
                })
                .await?
        };

        let entry = JournalEntry::from(row);
        let id = entry.id.clone();

        let mut cache = self.cache.write().await;
        cache.reconcile(self.current_owner().as_deref());
        if cache.owned_by(Some(&owner)) {
            cache.entries.insert(0, entry);
        }

        Ok(id)
    }

    /// Overwrite title, content and date of `id`. An id the backend does not
    /// match is not an error.
    pub async fn update(
        &self,
        id: &str,
        title: &str,
        content: &str,
        date: NaiveDate,
    ) -> SessionResult<()> {
        let owner = self
            .reconciled_owner()
            .await
            .ok_or_else(SessionError::not_signed_in)?;
        let now = Utc::now();

        {
            let _busy = self.busy();
            self.table
                .update(
                    id,
                    &EntryPatchRow {
                        title: title.to_string(),
                        content: content.to_string(),
                        date,
                        updated_at: now,
                    },
                )
                .await?;
        }

        let mut cache = self.cache.write().await;
        cache.reconcile(self.current_owner().as_deref());
        if cache.owned_by(Some(&owner))
            && let Some(entry) = cache.entries.iter_mut().find(|e| e.id == id)
        {
            entry.apply_edit(title, content, date, now);
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> SessionResult<()> {
        let owner = self
            .reconciled_owner()
            .await
            .ok_or_else(SessionError::not_signed_in)?;

        {
            let _busy = self.busy();
            self.table.delete(id).await?;
        }

        let mut cache = self.cache.write().await;
        cache.reconcile(self.current_owner().as_deref());
        if cache.owned_by(Some(&owner)) {
            cache.entries.retain(|e| e.id != id);
        }

        Ok(())
    }

    /// Cached entry with `id`. Never fetches.
    pub async fn get(&self, id: &str) -> Option<JournalEntry> {
        let owner = self.current_owner();
        let cache = self.cache.read().await;
        if !cache.owned_by(owner.as_deref()) {
            return None;
        }
        cache.entries.iter().find(|e| e.id == id).cloned()
    }

    /// Snapshot of the cache in display order.
    pub async fn entries(&self) -> Vec<JournalEntry> {
        let owner = self.current_owner();
        let cache = self.cache.read().await;
        if !cache.owned_by(owner.as_deref()) {
            return Vec::new();
        }
        cache.entries.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.entries.clear();
        cache.owner = None;
        cache.loaded = false;
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
