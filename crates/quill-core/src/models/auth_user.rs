use serde::{Deserialize, Serialize};

/// User object as reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
    /// Linked identity providers. `None` when the backend omits the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<AuthIdentity>>,
}

/// Free-form profile metadata attached at signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

/// One identity-provider link on a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl AuthUser {
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
    }

    /// The backend answers a signup for an email that is registered but not yet
    /// confirmed with a user whose identity list is present and empty, instead
    /// of an error.
    pub fn has_empty_identities(&self) -> bool {
        matches!(&self.identities, Some(list) if list.is_empty())
    }
}
