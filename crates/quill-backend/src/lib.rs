//! Adapters for the hosted backend: the auth service and the journal table.
//!
//! The traits are the seams the session layer is written against; the `http`
//! module talks to the real REST endpoints.

pub mod auth_backend;
pub mod auth_event_feed;
pub mod entry_table;
pub mod error;
pub mod http;
pub mod reset_link;
pub mod session_file;
pub mod sign_up;

pub use auth_backend::AuthBackend;
pub use auth_event_feed::{AuthEventFeed, AuthSubscription};
pub use entry_table::EntryTable;
pub use error::{BackendError, Result as BackendResult};
pub use http::backend_client::BackendClient;
pub use http::http_auth_backend::HttpAuthBackend;
pub use http::http_entry_table::HttpEntryTable;
pub use http::HttpBackend;
pub use reset_link::{parse_reset_tokens, strip_reset_tokens};
pub use session_file::SessionFile;
pub use sign_up::{SignUpRequest, SignUpResponse};

#[cfg(test)]
mod tests;
