use crate::{EntryRepository, PasswordReset, SessionOptions, SessionStore};

use quill_backend::{AuthBackend, EntryTable};
use quill_core::Identity;

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;

/// One signed-in (or signed-out) application context: the session store, the
/// entry repository wired to its identity, and the reset flow.
pub struct AppSession {
    store: Arc<SessionStore>,
    entries: Arc<EntryRepository>,
    reset: PasswordReset,
    shutdown_tx: broadcast::Sender<()>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl AppSession {
    pub async fn start(auth: Arc<dyn AuthBackend>, table: Arc<dyn EntryTable>) -> Self {
        Self::start_with(auth, table, SessionOptions::default()).await
    }

    /// Restore the persisted session, load its entries and start following
    /// identity changes.
    pub async fn start_with(
        auth: Arc<dyn AuthBackend>,
        table: Arc<dyn EntryTable>,
        options: SessionOptions,
    ) -> Self {
        let store = Arc::new(SessionStore::new(
            Arc::clone(&auth),
            options.confirm_redirect,
        ));
        let entries = Arc::new(EntryRepository::new(table, store.subscribe_identity()));
        let reset = PasswordReset::new(auth, options.reset_redirect);

        store.restore_session().await;
        if store.identity().is_some()
            && let Err(e) = entries.load().await
        {
            warn!("Initial entry load failed: {e}");
        }

        let (shutdown_tx, _) = broadcast::channel(1);
        let watcher = tokio::spawn(follow_identity(
            store.subscribe_identity(),
            Arc::clone(&entries),
            shutdown_tx.subscribe(),
        ));

        Self {
            store,
            entries,
            reset,
            shutdown_tx,
            watcher: Mutex::new(Some(watcher)),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn entries(&self) -> &EntryRepository {
        &self.entries
    }

    pub fn password_reset(&self) -> &PasswordReset {
        &self.reset
    }

    pub fn identity(&self) -> Option<Identity> {
        self.store.identity()
    }

    pub async fn dispose(&self) {
        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.watcher.lock().await.take()
            && let Err(e) = handle.await
        {
            warn!("Identity watcher ended abnormally: {e}");
        }

        self.store.dispose().await;
    }
}

impl Drop for AppSession {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Load entries when a new identity appears, clear them when it goes away.
async fn follow_identity(
    mut identity_rx: watch::Receiver<Option<Identity>>,
    entries: Arc<EntryRepository>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut owner = identity_rx.borrow_and_update().as_ref().map(|i| i.id.clone());

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            changed = identity_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = identity_rx.borrow_and_update().as_ref().map(|i| i.id.clone());
                if next == owner {
                    continue;
                }
                owner = next;

                match &owner {
                    Some(id) => {
                        debug!("Identity {id} present, loading entries");
                        if let Err(e) = entries.load().await {
                            warn!("Entry load failed: {e}");
                        }
                    }
                    None => entries.clear().await,
                }
            }
        }
    }

    debug!("Identity watcher stopped");
}
