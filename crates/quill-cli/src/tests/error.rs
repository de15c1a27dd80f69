use crate::CliError;

use quill_backend::BackendError;
use quill_config::ConfigError;
use quill_core::CoreError;
use quill_session::SessionError;

use googletest::assert_that;
use googletest::prelude::{contains_substring, eq};

#[test]
fn given_not_signed_in_when_reported_then_plain_message_and_code() {
    let err = CliError::not_signed_in();

    assert_that!(err.user_message(), eq("Not signed in"));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn given_not_found_when_reported_then_entry_not_found() {
    let err = CliError::not_found("e-404");

    assert_that!(err.user_message(), eq("Entry not found"));
    assert_that!(err.to_string(), contains_substring("e-404"));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn given_validation_error_when_converted_then_invalid_input_code() {
    let err: CliError = CoreError::validation("Please enter a title for your entry.").into();

    assert_that!(err.user_message(), eq("Please enter a title for your entry."));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn given_config_error_when_converted_then_config_code() {
    let err: CliError = ConfigError::backend("backend.anon_key cannot be empty").into();

    assert_that!(err.user_message(), contains_substring("anon_key"));
    assert_eq!(err.exit_code(), 78);
}

#[test]
fn given_backend_api_error_when_converted_then_backend_message_shown() {
    let err: CliError = BackendError::api(503, "Service Unavailable").into();

    assert_that!(err.user_message(), eq("Service Unavailable"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn given_session_not_signed_in_when_converted_then_not_signed_in_code() {
    let err: CliError = SessionError::not_signed_in().into();

    assert_eq!(err.exit_code(), 3);
}
