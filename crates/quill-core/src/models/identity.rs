use crate::AuthUser;

use serde::{Deserialize, Serialize};

/// Minimal profile of the signed-in user, held in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<&AuthUser> for Identity {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            display_name: user.display_name().map(String::from),
        }
    }
}
