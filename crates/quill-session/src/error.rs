use quill_backend::BackendError;
use quill_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Backend error: {source} {location}")]
    Backend {
        #[source]
        source: BackendError,
        location: ErrorLocation,
    },

    #[error("Not signed in {location}")]
    NotSignedIn { location: ErrorLocation },

    #[error("{source} {location}")]
    Core {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn not_signed_in() -> Self {
        SessionError::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { source, .. } => source
                .api_message()
                .map(String::from)
                .unwrap_or_else(|| source.to_string()),
            Self::NotSignedIn { .. } => String::from("Not signed in"),
            Self::Core { source, .. } => source.user_message(),
        }
    }
}

impl From<BackendError> for SessionError {
    #[track_caller]
    fn from(source: BackendError) -> Self {
        SessionError::Backend {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for SessionError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        SessionError::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
