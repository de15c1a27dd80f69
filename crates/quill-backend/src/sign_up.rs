use quill_core::{AuthUser, Session};

use serde::Serialize;

/// New-account request.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Stored as profile metadata under `name`
    pub name: String,
    /// Where the confirmation email sends the user
    pub redirect_to: Option<String>,
}

/// What the backend returned for a signup.
///
/// With email confirmation enabled there is a user but no session. An email
/// that is already registered but unconfirmed comes back as a user with an
/// empty identity list and no error.
#[derive(Debug, Clone, Default)]
pub struct SignUpResponse {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
}

#[derive(Serialize)]
pub(crate) struct SignUpBody<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
    pub(crate) data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
pub(crate) struct SignUpMetadata<'a> {
    pub(crate) name: &'a str,
}

impl<'a> From<&'a SignUpRequest> for SignUpBody<'a> {
    fn from(request: &'a SignUpRequest) -> Self {
        Self {
            email: &request.email,
            password: &request.password,
            data: SignUpMetadata {
                name: &request.name,
            },
        }
    }
}
