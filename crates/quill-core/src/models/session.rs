use crate::{AuthUser, Identity};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_token_type() -> String {
    String::from("bearer")
}

/// Token bundle for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    /// Unix seconds. Filled from `expires_in` when the backend omits it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Fill in `expires_at` relative to `now` if the backend did not send it.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now.timestamp() + self.expires_in);
        }
        self
    }

    /// True when the access token expires within `margin_secs` of `now`.
    /// Sessions without an expiry never expire.
    pub fn expires_within(&self, now: DateTime<Utc>, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(at) => at - now.timestamp() <= margin_secs,
            None => false,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::from(&self.user)
    }
}
