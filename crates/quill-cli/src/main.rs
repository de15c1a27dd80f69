//! quill - journaling client CLI
//!
//! # Examples
//!
//! ```bash
//! quill login --email ana@example.com --password secret1
//! quill new --title "Trip" --content "Day one" --date 2024-03-01
//! quill list --pretty
//! quill edit <id> --title "Trip Day 1"
//! ```

use quill_cli::{Cli, CliResult, load_config, logger, run};

use std::process::ExitCode;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let pretty = cli.pretty;

    match execute(cli).await {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> CliResult<serde_json::Value> {
    let (config, config_dir) = load_config(&cli)?;

    logger::initialize(
        config.logging.level,
        config.log_file_path(&config_dir),
        config.logging.colored,
    )?;
    config.log_summary();

    run(cli, &config, &config_dir).await
}
