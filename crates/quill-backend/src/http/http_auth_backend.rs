use crate::sign_up::SignUpBody;
use crate::{
    AuthBackend, AuthEventFeed, AuthSubscription, BackendClient, BackendError, BackendResult,
    SessionFile, SignUpRequest, SignUpResponse,
};

use quill_core::{AuthEvent, AuthUser, Session, TokenPair};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const TOKEN_PATH: &str = "/auth/v1/token";
const SIGNUP_PATH: &str = "/auth/v1/signup";
const LOGOUT_PATH: &str = "/auth/v1/logout";
const RECOVER_PATH: &str = "/auth/v1/recover";
const USER_PATH: &str = "/auth/v1/user";

/// Refresh the access token when it expires within this many seconds.
const EXPIRY_MARGIN_SECS: i64 = 10;

fn redirect_query(redirect_to: Option<&str>) -> Vec<(&'static str, &str)> {
    redirect_to
        .filter(|to| !to.is_empty())
        .map(|to| vec![("redirect_to", to)])
        .unwrap_or_default()
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PasswordBody<'a> {
    password: &'a str,
}

/// Auth service client that keeps the session in memory and on disk and
/// announces every change on its event feed.
pub struct HttpAuthBackend {
    client: BackendClient,
    store: SessionFile,
    feed: AuthEventFeed,
}

impl HttpAuthBackend {
    pub fn new(client: BackendClient, store: SessionFile) -> Self {
        Self {
            client,
            store,
            feed: AuthEventFeed::new(),
        }
    }

    pub fn feed(&self) -> &AuthEventFeed {
        &self.feed
    }

    /// Make `session` current, persist it and announce it.
    async fn adopt(
        &self,
        session: Session,
        event: fn(Session) -> AuthEvent,
    ) -> BackendResult<Session> {
        let session = session.stamped(Utc::now());

        if let Err(e) = self.store.save(&session) {
            warn!("Session could not be persisted: {e}");
        }
        self.client.set_current_session(Some(session.clone())).await;
        self.feed.emit(event(session.clone()));

        Ok(session)
    }

    async fn forget(&self) {
        self.client.set_current_session(None).await;
        if let Err(e) = self.store.clear() {
            warn!("Session file could not be removed: {e}");
        }
    }

    async fn refresh(&self, refresh_token: &str) -> BackendResult<Session> {
        debug!("Refreshing access token");
        let req = self
            .client
            .request(
                Method::POST,
                TOKEN_PATH,
                &[("grant_type", "refresh_token")],
                None,
            )?
            .json(&RefreshGrant { refresh_token });
        self.client.execute(req).await
    }

    async fn fetch_user(&self, access_token: &str) -> BackendResult<AuthUser> {
        let req = self
            .client
            .request(Method::GET, USER_PATH, &[], Some(access_token))?;
        self.client.execute(req).await
    }

    /// Signup answers with a full session when confirmation is off, and with
    /// the bare user (sometimes wrapped in `user`) when it is on.
    pub(crate) fn parse_sign_up(body: Value) -> BackendResult<SignUpResponse> {
        if body.get("access_token").is_some() {
            let session: Session = serde_json::from_value(body)?;
            return Ok(SignUpResponse {
                user: Some(session.user.clone()),
                session: Some(session),
            });
        }

        let user = match body.get("user") {
            Some(user) if user.is_object() => serde_json::from_value(user.clone())?,
            _ => serde_json::from_value(body)?,
        };

        Ok(SignUpResponse {
            user: Some(user),
            session: None,
        })
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        let current = match self.client.current_session().await {
            Some(session) => Some(session),
            None => self.store.load()?,
        };
        let Some(session) = current else {
            return Ok(None);
        };

        if !session.expires_within(Utc::now(), EXPIRY_MARGIN_SECS) {
            self.client.set_current_session(Some(session.clone())).await;
            return Ok(Some(session));
        }

        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => self
                .adopt(fresh, AuthEvent::TokenRefreshed)
                .await
                .map(Some),
            Err(e) if e.is_api() => {
                warn!("Stored session rejected on refresh: {e}");
                self.forget().await;
                self.feed.emit(AuthEvent::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        let req = self
            .client
            .request(Method::POST, TOKEN_PATH, &[("grant_type", "password")], None)?
            .json(&PasswordGrant { email, password });
        let session: Session = self.client.execute(req).await?;

        info!("Signed in as {}", session.user.id);
        self.adopt(session, AuthEvent::SignedIn).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<SignUpResponse> {
        let query = redirect_query(request.redirect_to.as_deref());
        let req = self
            .client
            .request(Method::POST, SIGNUP_PATH, &query, None)?
            .json(&SignUpBody::from(request));
        let body: Value = self.client.execute(req).await?;

        let mut response = Self::parse_sign_up(body)?;
        if let Some(session) = response.session.take() {
            response.session = Some(self.adopt(session, AuthEvent::SignedIn).await?);
        }

        Ok(response)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let remote = match self.client.access_token().await {
            Some(token) => {
                let req = self
                    .client
                    .request(Method::POST, LOGOUT_PATH, &[], Some(token.as_str()))?;
                self.client.send(req).await.map(|_| ())
            }
            None => Ok(()),
        };

        self.forget().await;
        self.feed.emit(AuthEvent::SignedOut);

        if let Err(e) = &remote {
            warn!("Remote sign-out failed: {e}");
        }
        remote
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> BackendResult<()> {
        let query = redirect_query(redirect_to);
        let req = self
            .client
            .request(Method::POST, RECOVER_PATH, &query, None)?
            .json(&EmailBody { email });
        self.client.send(req).await?;
        Ok(())
    }

    async fn set_session(&self, tokens: &TokenPair) -> BackendResult<Session> {
        let session = match self.fetch_user(&tokens.access_token).await {
            // Link tokens carry no expiry; mark it due so the next restore
            // refreshes.
            Ok(user) => Session {
                access_token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
                token_type: String::from("bearer"),
                expires_in: 0,
                expires_at: Some(Utc::now().timestamp()),
                user,
            },
            Err(e) if e.is_api() => {
                debug!("Access token rejected ({e}), trying refresh token");
                self.refresh(&tokens.refresh_token).await?
            }
            Err(e) => return Err(e),
        };

        self.adopt(session, AuthEvent::PasswordRecovery).await
    }

    async fn update_password(&self, password: &str) -> BackendResult<AuthUser> {
        let mut session = self
            .client
            .current_session()
            .await
            .ok_or_else(|| BackendError::no_session())?;

        let req = self
            .client
            .request(Method::PUT, USER_PATH, &[], Some(session.access_token.as_str()))?
            .json(&PasswordBody { password });
        let user: AuthUser = self.client.execute(req).await?;

        session.user = user.clone();
        self.adopt(session, AuthEvent::UserUpdated).await?;

        Ok(user)
    }

    fn subscribe(&self) -> AuthSubscription {
        self.feed.subscribe()
    }
}
