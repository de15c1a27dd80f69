//! Input checks applied by front ends before calling into the session layer.

use crate::{CoreError, Result as CoreErrorResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_new_password(password: &str, confirm: &str) -> CoreErrorResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long."
        )));
    }

    if password != confirm {
        return Err(CoreError::validation(
            "Passwords do not match. Please make sure both passwords are identical.",
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if email.trim().is_empty() {
        return Err(CoreError::validation("Please enter your email address."));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> CoreErrorResult<()> {
    if title.trim().is_empty() {
        return Err(CoreError::validation("Please enter a title for your entry."));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> CoreErrorResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::validation(
            "Please enter your name to create an account.",
        ));
    }
    Ok(())
}
