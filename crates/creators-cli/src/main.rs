//! Creators CLI - deterministic insights for creators and agencies
//!
//! Usage:
//!   creators insights --file snapshot.json   Ranked insights for one creator
//!   creators agency --file agency.json       Ranked insights across an agency
//!   creators validate --file snapshot.json   Check a snapshot payload
//!   creators serve --port 3000               Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Insights {
            file,
            scope,
            now,
            locale,
            utc_offset,
            dismissed,
            json,
        } => {
            let request = commands::request_context(now.as_deref(), &locale, utc_offset)?;
            commands::cmd_insights(
                config_path,
                &file,
                scope.as_deref(),
                &request,
                &dismissed,
                json,
            )
        }
        Commands::Agency {
            file,
            now,
            locale,
            utc_offset,
            dismissed,
            json,
        } => {
            let request = commands::request_context(now.as_deref(), &locale, utc_offset)?;
            commands::cmd_agency(config_path, &file, &request, &dismissed, json)
        }
        Commands::Validate { file, agency } => commands::cmd_validate(&file, agency),
        Commands::Keys => commands::cmd_keys(),
        Commands::Config => commands::cmd_config(config_path),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(config_path, &host, port, no_auth).await,
    }
}
