use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur talking to the backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error: {message} (status: {status}) {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unexpected response: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    #[error("No active session {location}")]
    NoSession { location: ErrorLocation },

    #[error("Session file error at {path}: {source} {location}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl BackendError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        BackendError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        BackendError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an API error with location
    #[track_caller]
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        BackendError::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        BackendError::Protocol {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_session() -> Self {
        BackendError::NoSession {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn persistence(path: PathBuf, source: std::io::Error) -> Self {
        BackendError::Persistence {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True when the backend itself answered with an error, as opposed to
    /// the request never completing or the answer being unreadable.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Message reported by the backend, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        BackendError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for BackendError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        BackendError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
