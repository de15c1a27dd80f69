use crate::signup_outcome;

use quill_backend::{AuthBackend, AuthSubscription, SignUpRequest};
use quill_core::{AuthEvent, Identity, SignupOutcome};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;

/// Owner of "who is signed in".
///
/// The identity lives in a watch channel written by the direct calls
/// (`login`, `signup`, `logout`) and by a single task consuming the auth
/// backend's session-change feed. Whoever writes last wins.
pub struct SessionStore {
    auth: Arc<dyn AuthBackend>,
    confirm_redirect: Option<String>,
    identity_tx: watch::Sender<Option<Identity>>,
    shutdown_tx: broadcast::Sender<()>,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl SessionStore {
    pub fn new(auth: Arc<dyn AuthBackend>, confirm_redirect: Option<String>) -> Self {
        let (identity_tx, _) = watch::channel(None);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            auth,
            confirm_redirect,
            identity_tx,
            shutdown_tx,
            handler: Mutex::new(None),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity_tx.borrow().clone()
    }

    pub fn subscribe_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.identity_tx.subscribe()
    }

    /// Pick up a session persisted by an earlier run and start listening for
    /// session changes. Safe to call more than once.
    pub async fn restore_session(&self) {
        self.ensure_listening().await;

        match self.auth.get_session().await {
            Ok(Some(session)) => {
                info!("Restored session for user {}", session.user.id);
                publish(&self.identity_tx, Some(session.identity()));
            }
            Ok(None) => debug!("No stored session"),
            Err(e) => warn!("Session restore failed: {e}"),
        }
    }

    /// Returns `false` for bad credentials and transport failures alike.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.auth.sign_in_with_password(email, password).await {
            Ok(session) => {
                publish(&self.identity_tx, Some(session.identity()));
                true
            }
            Err(e) => {
                warn!("Login failed: {e}");
                false
            }
        }
    }

    pub async fn signup(&self, email: &str, password: &str, name: &str) -> SignupOutcome {
        let request = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            redirect_to: self.confirm_redirect.clone(),
        };

        let result = self.auth.sign_up(&request).await;
        if let Err(e) = &result {
            warn!("Signup error: {e}");
        }

        let outcome = signup_outcome(&result);
        if let (SignupOutcome::SessionActive, Ok(response)) = (&outcome, &result)
            && let Some(session) = &response.session
        {
            publish(&self.identity_tx, Some(session.identity()));
        }

        outcome
    }

    /// Ends the session. The identity is cleared even when the backend call
    /// fails.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.sign_out().await {
            warn!("Sign-out failed: {e}");
        }
        publish(&self.identity_tx, None);
    }

    /// Stop the notification handler and release its subscription.
    pub async fn dispose(&self) {
        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.handler.lock().await.take()
            && let Err(e) = handle.await
        {
            warn!("Session handler ended abnormally: {e}");
        }
    }

    async fn ensure_listening(&self) {
        let mut handler = self.handler.lock().await;
        if handler.is_some() {
            return;
        }

        let subscription = self.auth.subscribe();
        let identity_tx = self.identity_tx.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();

        *handler = Some(tokio::spawn(handle_events(
            subscription,
            identity_tx,
            shutdown_rx,
        )));
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn handle_events(
    mut subscription: AuthSubscription,
    identity_tx: watch::Sender<Option<Identity>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            event = subscription.next() => {
                let Some(event) = event else { break };
                debug!("Session change: {event}");
                publish(&identity_tx, identity_for(&event));
            }
        }
    }

    subscription.unsubscribe();
    debug!("Session handler stopped");
}

fn identity_for(event: &AuthEvent) -> Option<Identity> {
    event.session().map(|session| session.identity())
}

/// Store the identity, waking watchers only when it actually changed.
fn publish(tx: &watch::Sender<Option<Identity>>, identity: Option<Identity>) {
    tx.send_if_modified(|current| {
        if *current == identity {
            return false;
        }
        *current = identity;
        true
    });
}
