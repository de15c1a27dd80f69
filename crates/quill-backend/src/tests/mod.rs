
use quill_core::{AuthUser, Session};

pub(crate) fn sample_session(user_id: &str) -> Session {
    Session {
        access_token: format!("access-{user_id}"),
        refresh_token: format!("refresh-{user_id}"),
        token_type: "bearer".into(),
        expires_in: 3600,
        expires_at: Some(4_000_000_000),
        user: AuthUser {
            id: user_id.into(),
            email: Some(format!("{user_id}@example.com")),
            user_metadata: None,
            identities: None,
        },
    }
}
