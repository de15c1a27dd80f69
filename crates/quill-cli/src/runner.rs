use crate::{Cli, CliError, CliResult, Commands};

use quill_backend::HttpBackend;
use quill_config::Config;
use quill_core::{
    CoreError, JournalEntry, parse_entry_date, validate_email, validate_name, validate_title,
};
use quill_session::{AppSession, ResetLink, SessionOptions};

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde_json::{Value, json};

const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials and try again.";
const UNKNOWN_EMAIL_MESSAGE: &str = "No email like that found in our app.";
const CONFIRM_EMAIL_MESSAGE: &str =
    "Account created. Check your email to confirm your account before signing in.";
const RESET_SENT_MESSAGE: &str = "Check your inbox for a password reset link.";
const PASSWORD_UPDATED_MESSAGE: &str = "Password updated. You can now log in with your new password.";

/// Resolve the config directory, then load and validate the config.
pub fn load_config(cli: &Cli) -> CliResult<(Config, PathBuf)> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => Config::config_dir()?,
    };

    let config = Config::load_from(&config_dir)?;
    config.validate()?;

    Ok((config, config_dir))
}

/// Execute one command and return its JSON output.
pub async fn run(cli: Cli, config: &Config, config_dir: &Path) -> CliResult<Value> {
    let backend = HttpBackend::from_config(config, config_dir)?;
    let app = AppSession::start_with(
        backend.auth.clone(),
        backend.entries.clone(),
        SessionOptions::from(&config.auth),
    )
    .await;

    let result = dispatch(&app, cli.command).await;
    app.dispose().await;
    result
}

async fn dispatch(app: &AppSession, command: Commands) -> CliResult<Value> {
    if command.needs_identity() && app.identity().is_none() {
        return Err(CliError::not_signed_in());
    }

    match command {
        Commands::Login { email, password } => {
            validate_email(&email)?;
            if !app.store().login(email.trim(), &password).await {
                return Err(CliError::rejected(LOGIN_FAILED_MESSAGE));
            }
            Ok(json!({ "signed_in": true, "identity": app.identity() }))
        }

        Commands::Signup {
            email,
            password,
            name,
        } => {
            validate_email(&email)?;
            validate_name(&name)?;
            let outcome = app.store().signup(email.trim(), &password, name.trim()).await;
            if let Some(reason) = outcome.error() {
                return Err(CliError::rejected(reason));
            }

            let mut output = json!({
                "ok": outcome.is_ok(),
                "needs_email_confirm": outcome.needs_email_confirm(),
                "identity": app.identity(),
            });
            if outcome.needs_email_confirm() {
                output["message"] = json!(CONFIRM_EMAIL_MESSAGE);
            }
            Ok(output)
        }

        Commands::Logout => {
            app.store().logout().await;
            Ok(json!({ "signed_in": false }))
        }

        Commands::Whoami => Ok(json!({
            "signed_in": app.identity().is_some(),
            "identity": app.identity(),
        })),

        Commands::ForgotPassword { email } => {
            validate_email(&email)?;
            if let Err(e) = app.password_reset().request(&email).await {
                warn!("Reset request failed: {e}");
                return Err(CliError::rejected(UNKNOWN_EMAIL_MESSAGE));
            }
            Ok(json!({ "sent": true, "message": RESET_SENT_MESSAGE }))
        }

        Commands::ResetPassword {
            link,
            password,
            confirm,
        } => {
            let url = match app.password_reset().begin(&link).await? {
                ResetLink::Verified { clean_url } => clean_url,
                ResetLink::DirectVisit => {
                    debug!("Reset link carries no tokens, using the current session");
                    link
                }
            };
            app.password_reset().complete(&password, &confirm).await?;
            Ok(json!({
                "url": url,
                "password_updated": true,
                "message": PASSWORD_UPDATED_MESSAGE,
            }))
        }

        Commands::List => {
            app.entries().ensure_loaded().await?;
            Ok(json!(app.entries().entries().await))
        }

        Commands::Show { id } => {
            app.entries().ensure_loaded().await?;
            Ok(json!(cached_entry(app, &id).await?))
        }

        Commands::New {
            title,
            content,
            date,
        } => {
            validate_title(&title)?;
            let date = match date {
                Some(raw) => entry_date(&raw)?,
                None => Local::now().date_naive(),
            };
            let id = app.entries().create(&title, &content, date).await?;
            Ok(json!(cached_entry(app, &id).await?))
        }

        Commands::Edit {
            id,
            title,
            content,
            date,
        } => {
            app.entries().ensure_loaded().await?;
            let current = cached_entry(app, &id).await?;
            let title = title.unwrap_or(current.title);
            let content = content.unwrap_or(current.content);
            let date = match date {
                Some(raw) => entry_date(&raw)?,
                None => current.date,
            };
            validate_title(&title)?;

            app.entries().update(&id, &title, &content, date).await?;
            Ok(json!(cached_entry(app, &id).await?))
        }

        Commands::Delete { id } => {
            app.entries().ensure_loaded().await?;
            cached_entry(app, &id).await?;
            app.entries().delete(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn cached_entry(app: &AppSession, id: &str) -> CliResult<JournalEntry> {
    app.entries()
        .get(id)
        .await
        .ok_or_else(|| CliError::not_found(id))
}

fn entry_date(raw: &str) -> CliResult<NaiveDate> {
    parse_entry_date(raw).ok_or_else(|| CoreError::invalid_date(raw).into())
}
