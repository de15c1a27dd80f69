use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid entry date: {value} {location}")]
    InvalidDate {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid reset link: {message} {location}")]
    InvalidResetLink {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        CoreError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_date<S: Into<String>>(value: S) -> Self {
        CoreError::InvalidDate {
            value: value.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_reset_link<S: Into<String>>(message: S) -> Self {
        CoreError::InvalidResetLink {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message without the source location, suitable for end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidDate { value, .. } => {
                format!("Invalid date '{value}', expected YYYY-MM-DD")
            }
            Self::InvalidResetLink { message, .. } => message.clone(),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
