pub mod auth_event;
pub mod auth_user;
pub mod entry_date;
pub mod identity;
pub mod journal_entry;
pub mod journal_entry_row;
pub mod session;
pub mod signup_outcome;
pub mod token_pair;
