pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::auth_event::AuthEvent;
pub use models::auth_user::{AuthIdentity, AuthUser, UserMetadata};
pub use models::entry_date::{format_entry_date, parse_entry_date};
pub use models::identity::Identity;
pub use models::journal_entry::JournalEntry;
pub use models::journal_entry_row::{EntryPatchRow, JournalEntryRow, NewEntryRow};
pub use models::session::Session;
pub use models::signup_outcome::{
    ALREADY_IN_USE_MESSAGE, GENERIC_SIGNUP_FAILURE, SIGNUP_FAILED_MESSAGE, SignupOutcome,
};
pub use models::token_pair::TokenPair;
pub use validation::{
    MIN_PASSWORD_LENGTH, validate_email, validate_name, validate_new_password, validate_title,
};
