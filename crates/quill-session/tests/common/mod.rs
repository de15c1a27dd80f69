#![allow(dead_code)]

use quill_backend::{
    AuthBackend, AuthEventFeed, AuthSubscription, BackendError, BackendResult, EntryTable,
    SignUpRequest, SignUpResponse,
};
use quill_core::{
    AuthEvent, AuthIdentity, AuthUser, EntryPatchRow, Identity, JournalEntryRow, NewEntryRow,
    Session, TokenPair, UserMetadata,
};

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn user(id: &str) -> AuthUser {
    AuthUser {
        id: id.into(),
        email: Some(format!("{id}@example.com")),
        user_metadata: Some(UserMetadata {
            name: Some(format!("Name of {id}")),
        }),
        identities: Some(vec![AuthIdentity {
            id: Some(format!("ident-{id}")),
            provider: Some("email".into()),
        }]),
    }
}

pub fn session_for(id: &str) -> Session {
    Session {
        access_token: format!("access-{id}"),
        refresh_token: format!("refresh-{id}"),
        token_type: "bearer".into(),
        expires_in: 3600,
        expires_at: None,
        user: user(id),
    }
}

pub fn identity(id: &str) -> Identity {
    Identity::from(&user(id))
}

/// Poll `check` until it holds or a second has passed.
pub async fn wait_until<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

// =========================================================================
// Auth backend fake
// =========================================================================

#[derive(Default)]
struct AuthState {
    accounts: Vec<(String, String, String)>,
    stored: Option<Session>,
    current: Option<Session>,
    sign_up_reply: Option<BackendResult<SignUpResponse>>,
    sign_up_requests: Vec<SignUpRequest>,
    sign_out_fails: bool,
    offline: bool,
    accepted_tokens: Option<(TokenPair, String)>,
    reset_emails: Vec<(String, Option<String>)>,
    passwords: Vec<String>,
}

/// In-memory auth service that behaves like the hosted one.
pub struct FakeAuth {
    feed: AuthEventFeed,
    state: Mutex<AuthState>,
}

impl FakeAuth {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            feed: AuthEventFeed::new(),
            state: Mutex::new(AuthState::default()),
        })
    }

    pub fn add_account(&self, email: &str, password: &str, user_id: &str) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .push((email.into(), password.into(), user_id.into()));
    }

    /// Pretend an earlier run left a session behind.
    pub fn store_session(&self, user_id: &str) {
        self.state.lock().unwrap().stored = Some(session_for(user_id));
    }

    pub fn reply_to_sign_up(&self, reply: BackendResult<SignUpResponse>) {
        self.state.lock().unwrap().sign_up_reply = Some(reply);
    }

    pub fn fail_sign_out(&self) {
        self.state.lock().unwrap().sign_out_fails = true;
    }

    pub fn go_offline(&self) {
        self.state.lock().unwrap().offline = true;
    }

    pub fn accept_reset_tokens(&self, tokens: TokenPair, user_id: &str) {
        self.state.lock().unwrap().accepted_tokens = Some((tokens, user_id.into()));
    }

    /// Push a session change as the backend would.
    pub fn emit(&self, event: AuthEvent) {
        self.feed.emit(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.feed.subscriber_count()
    }

    pub fn sign_up_requests(&self) -> Vec<SignUpRequest> {
        self.state.lock().unwrap().sign_up_requests.clone()
    }

    pub fn reset_emails(&self) -> Vec<(String, Option<String>)> {
        self.state.lock().unwrap().reset_emails.clone()
    }

    pub fn passwords(&self) -> Vec<String> {
        self.state.lock().unwrap().passwords.clone()
    }

    fn check_online(&self) -> BackendResult<()> {
        if self.state.lock().unwrap().offline {
            return Err(BackendError::protocol("connection refused"));
        }
        Ok(())
    }

    fn adopt(&self, session: Session, event: fn(Session) -> AuthEvent) -> Session {
        {
            let mut state = self.state.lock().unwrap();
            state.current = Some(session.clone());
            state.stored = Some(session.clone());
        }
        self.feed.emit(event(session.clone()));
        session
    }
}

#[async_trait]
impl AuthBackend for FakeAuth {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        self.check_online()?;
        let state = self.state.lock().unwrap();
        Ok(state.current.clone().or_else(|| state.stored.clone()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.check_online()?;
        let user_id = self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, id)| id.clone());

        match user_id {
            Some(id) => Ok(self.adopt(session_for(&id), AuthEvent::SignedIn)),
            None => Err(BackendError::api(400, "Invalid login credentials")),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<SignUpResponse> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.sign_up_requests.push(request.clone());
            state.sign_up_reply.take()
        };

        let response = reply.unwrap_or_else(|| {
            Ok(SignUpResponse {
                user: Some(user("new-user")),
                session: None,
            })
        })?;

        if let Some(session) = &response.session {
            self.adopt(session.clone(), AuthEvent::SignedIn);
        }
        Ok(response)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let fails = {
            let mut state = self.state.lock().unwrap();
            state.current = None;
            state.stored = None;
            state.sign_out_fails
        };
        self.feed.emit(AuthEvent::SignedOut);

        if fails {
            return Err(BackendError::api(500, "Internal Server Error"));
        }
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> BackendResult<()> {
        self.check_online()?;
        self.state
            .lock()
            .unwrap()
            .reset_emails
            .push((email.into(), redirect_to.map(String::from)));
        Ok(())
    }

    async fn set_session(&self, tokens: &TokenPair) -> BackendResult<Session> {
        let accepted = self
            .state
            .lock()
            .unwrap()
            .accepted_tokens
            .clone()
            .filter(|(pair, _)| pair == tokens);

        match accepted {
            Some((_, user_id)) => Ok(self.adopt(
                session_for(&user_id),
                AuthEvent::PasswordRecovery,
            )),
            None => Err(BackendError::api(401, "invalid JWT")),
        }
    }

    async fn update_password(&self, password: &str) -> BackendResult<AuthUser> {
        let mut state = self.state.lock().unwrap();
        let session = state.current.clone().ok_or_else(BackendError::no_session)?;
        state.passwords.push(password.into());
        Ok(session.user)
    }

    fn subscribe(&self) -> AuthSubscription {
        self.feed.subscribe()
    }
}

// =========================================================================
// Entry table fake
// =========================================================================

#[derive(Default)]
struct TableState {
    rows: Vec<JournalEntryRow>,
    next_id: u32,
    failing: bool,
    selects: usize,
}

/// In-memory journal table. Rows come back in insertion order so callers
/// have to sort for themselves.
#[derive(Default)]
pub struct FakeTable {
    state: Mutex<TableState>,
}

impl FakeTable {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, owner: &str, id: &str, title: &str, date: NaiveDate) {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        self.state.lock().unwrap().rows.push(JournalEntryRow {
            id: id.into(),
            title: title.into(),
            content: Some(format!("{title} body")),
            date,
            created_at: created,
            updated_at: None,
            user_id: owner.into(),
        });
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn rows(&self) -> Vec<JournalEntryRow> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn select_count(&self) -> usize {
        self.state.lock().unwrap().selects
    }

    fn check(&self) -> BackendResult<()> {
        if self.state.lock().unwrap().failing {
            return Err(BackendError::api(503, "Service Unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryTable for FakeTable {
    async fn select_owned(&self, owner_id: &str) -> BackendResult<Vec<JournalEntryRow>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.selects += 1;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, row: &NewEntryRow) -> BackendResult<JournalEntryRow> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let stored = JournalEntryRow {
            id: format!("srv-{}", state.next_id),
            title: row.title.clone(),
            content: Some(row.content.clone()),
            date: row.date,
            created_at: Utc::now(),
            updated_at: None,
            user_id: row.user_id.clone(),
        };
        state.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: &EntryPatchRow) -> BackendResult<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if let Some(row) = state.rows.iter_mut().find(|row| row.id == id) {
            row.title = patch.title.clone();
            row.content = Some(patch.content.clone());
            row.date = patch.date;
            row.updated_at = Some(patch.updated_at);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> BackendResult<()> {
        self.check()?;
        self.state.lock().unwrap().rows.retain(|row| row.id != id);
        Ok(())
    }
}
