//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `insights` - Insight computation (creator snapshot, agency)
//! - `keys` - Insight-key vocabulary and resolved thresholds
//! - `serve` - Web server command
//! - `validate` - Snapshot payload validation

pub mod insights;
pub mod keys;
pub mod serve;
pub mod validate;

// Re-export command functions for main.rs
pub use insights::*;
pub use keys::*;
pub use serve::*;
pub use validate::*;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use creators_core::{InsightConfig, Locale, RequestContext};

/// Load insight thresholds (explicit path, data dir override, or built-ins)
pub fn load_config(path: Option<&Path>) -> Result<InsightConfig> {
    if let Some(p) = path {
        if !p.exists() {
            bail!("Config file not found: {}", p.display());
        }
    }
    InsightConfig::load(path).context("Failed to load insight config")
}

/// Build the request context from CLI flags
pub fn request_context(now: Option<&str>, locale: &str, utc_offset_hours: i32) -> Result<RequestContext> {
    let now = match now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now timestamp: {}", s))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let locale: Locale = locale.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .with_context(|| format!("Invalid UTC offset: {} hours", utc_offset_hours))?;

    Ok(RequestContext::at(now)
        .with_locale(locale)
        .with_utc_offset(offset))
}

/// Read a file as untyped JSON
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}
