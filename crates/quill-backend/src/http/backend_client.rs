use crate::{BackendError, BackendResult};

use quill_core::Session;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

/// Fields the auth and table services use for error text, in priority order.
const ERROR_MESSAGE_KEYS: [&str; 4] = ["msg", "error_description", "message", "error"];

/// HTTP client for the hosted backend's REST API
#[derive(Clone)]
pub struct BackendClient {
    pub base_url: String,
    anon_key: String,
    client: ReqwestClient,
    session: Arc<RwLock<Option<Session>>>,
}

impl BackendClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://abc.supabase.co")
    /// * `anon_key` - Public API key sent as `apikey` on every request
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> BackendResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            client,
            session: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn set_current_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> BackendResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| BackendError::protocol(format!("invalid URL for {path}: {e}")))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Build a request carrying the API key. Without a bearer token the anon
    /// key doubles as the bearer.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> BackendResult<RequestBuilder> {
        let url = self.url(path, query)?;

        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(self.anon_key.as_str())))
    }

    /// Send a request and turn non-success statuses into `BackendError::Api`.
    pub(crate) async fn send(&self, req: RequestBuilder) -> BackendResult<Response> {
        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::api(
            status.as_u16(),
            Self::error_message(status, &body),
        ))
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> BackendResult<T> {
        let response = self.send(req).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn error_message(status: StatusCode, body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                ERROR_MESSAGE_KEYS.iter().find_map(|key| {
                    value
                        .get(*key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                })
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            })
    }
}

#[cfg(test)]
pub(crate) fn error_message_for_tests(status: u16, body: &str) -> String {
    BackendClient::error_message(
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}
