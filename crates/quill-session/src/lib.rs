//! Session lifecycle and the identity-scoped entry cache.

pub mod app_session;
pub mod entry_repository;
pub mod error;
pub mod password_reset;
pub mod session_options;
pub mod session_store;
pub mod signup_mapping;

pub use app_session::AppSession;
pub use entry_repository::EntryRepository;
pub use error::{Result as SessionResult, SessionError};
pub use password_reset::{PasswordReset, ResetLink};
pub use session_options::SessionOptions;
pub use session_store::SessionStore;
pub use signup_mapping::signup_outcome;
