use quill_backend::BackendError;
use quill_config::ConfigError;
use quill_core::CoreError;
use quill_session::SessionError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_NOT_SIGNED_IN: u8 = 3;
const EXIT_NOT_FOUND: u8 = 4;
const EXIT_CONFIG: u8 = 78;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("Backend error: {source} {location}")]
    Backend {
        #[source]
        source: BackendError,
        location: ErrorLocation,
    },

    #[error("{source} {location}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },

    #[error("{source} {location}")]
    Input {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Not signed in {location}")]
    NotSignedIn { location: ErrorLocation },

    #[error("Entry not found: {id} {location}")]
    NotFound { id: String, location: ErrorLocation },

    #[error("{message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn not_signed_in() -> Self {
        CliError::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        CliError::NotFound {
            id: id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The backend or the account state turned the request down.
    #[track_caller]
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        CliError::Rejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        CliError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Line printed on stderr.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { source, .. } => format!("Configuration problem: {source}"),
            Self::Backend { source, .. } => source
                .api_message()
                .map(String::from)
                .unwrap_or_else(|| source.to_string()),
            Self::Session { source, .. } => source.user_message(),
            Self::Input { source, .. } => source.user_message(),
            Self::NotSignedIn { .. } => String::from("Not signed in"),
            Self::NotFound { .. } => String::from("Entry not found"),
            Self::Rejected { message, .. } => message.clone(),
            Self::Logger { message, .. } => message.clone(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config { .. } => EXIT_CONFIG,
            Self::Input { .. } | Self::Rejected { .. } => EXIT_INVALID_INPUT,
            Self::NotSignedIn { .. } => EXIT_NOT_SIGNED_IN,
            Self::NotFound { .. } => EXIT_NOT_FOUND,
            Self::Session { source, .. } => match source {
                SessionError::NotSignedIn { .. } => EXIT_NOT_SIGNED_IN,
                SessionError::Core { .. } => EXIT_INVALID_INPUT,
                SessionError::Backend { .. } => EXIT_FAILURE,
            },
            Self::Backend { .. } | Self::Logger { .. } => EXIT_FAILURE,
        }
    }
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        CliError::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<BackendError> for CliError {
    #[track_caller]
    fn from(source: BackendError) -> Self {
        CliError::Backend {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for CliError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        CliError::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for CliError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        CliError::Input {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
