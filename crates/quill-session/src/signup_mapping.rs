//! Translation of a raw signup response into a [`SignupOutcome`].
//!
//! The hosted auth service does not reject a signup for an email that is
//! registered but still unconfirmed. It answers with a user whose identity
//! list is empty instead, so that case is checked before anything else.

use quill_backend::{BackendError, SignUpResponse};
use quill_core::{SIGNUP_FAILED_MESSAGE, GENERIC_SIGNUP_FAILURE, SignupOutcome};

const ALREADY_REGISTERED: &str = "already registered";

pub fn signup_outcome(result: &Result<SignUpResponse, BackendError>) -> SignupOutcome {
    match result {
        Ok(response) => {
            if response
                .user
                .as_ref()
                .is_some_and(|user| user.has_empty_identities())
            {
                return SignupOutcome::already_in_use();
            }

            if response.session.is_some() {
                SignupOutcome::SessionActive
            } else {
                SignupOutcome::ConfirmationRequired
            }
        }
        Err(err) => match err.api_message() {
            Some(message) if message.to_lowercase().contains(ALREADY_REGISTERED) => {
                SignupOutcome::already_in_use()
            }
            Some("") => SignupOutcome::failed(SIGNUP_FAILED_MESSAGE),
            Some(message) => SignupOutcome::failed(message),
            None => SignupOutcome::failed(GENERIC_SIGNUP_FAILURE),
        },
    }
}
