//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Creators OS - deterministic insights for creators and agencies
#[derive(Parser)]
#[command(name = "creators")]
#[command(about = "Compute ranked insights from creator snapshots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Insight thresholds file (defaults to the data dir override, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute insights for a creator (or combined agency) snapshot
    Insights {
        /// Snapshot JSON file ({tasks, events, companies, scope})
        #[arg(short, long)]
        file: PathBuf,

        /// Override the snapshot scope: creator, agency
        #[arg(long)]
        scope: Option<String>,

        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// Message language: he, en
        #[arg(long, default_value = "he")]
        locale: String,

        /// UTC offset in hours used for day boundaries
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        utc_offset: i32,

        /// Insight ids to hide (repeatable)
        #[arg(long)]
        dismissed: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute insights across an agency's managed creators
    Agency {
        /// Agency JSON file ({creators: [{name, tasks, events, companies}]})
        #[arg(short, long)]
        file: PathBuf,

        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<String>,

        /// Message language: he, en
        #[arg(long, default_value = "he")]
        locale: String,

        /// UTC offset in hours used for day boundaries
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        utc_offset: i32,

        /// Insight ids to hide (repeatable)
        #[arg(long)]
        dismissed: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a snapshot file without computing insights
    Validate {
        /// Snapshot or agency JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Validate as an agency payload
        #[arg(long)]
        agency: bool,
    },

    /// List insight keys and the severities each can emit
    Keys,

    /// Show the resolved insight thresholds
    Config,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable API key authentication (local development only)
        #[arg(long)]
        no_auth: bool,
    },
}
