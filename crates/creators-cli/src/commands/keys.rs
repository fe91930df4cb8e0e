//! Vocabulary and configuration commands (keys, config)

use std::path::Path;

use anyhow::Result;
use creators_core::config::default_config_path;
use creators_core::InsightKey;

use super::load_config;

pub fn cmd_keys() -> Result<()> {
    println!();
    println!("🔑 Insight keys");
    println!("   ─────────────────────────────────────────────────────────────");
    for key in InsightKey::all() {
        let severities: Vec<&str> = key.severities().iter().map(|s| s.as_str()).collect();
        let scope = if key.agency_only() { " (agency)" } else { "" };
        println!(
            "   {} {:<24} {}{}",
            key.icon(),
            key.as_str(),
            severities.join(", "),
            scope
        );
    }
    println!();
    Ok(())
}

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    println!();
    println!("⚙️  Insight thresholds");
    println!("   ─────────────────────────────────────────────────────────────");
    match config_path {
        Some(path) => println!("   Source: {}", path.display()),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => println!("   Source: {}", path.display()),
            None => println!("   Source: built-in defaults"),
        },
    }
    if let Some(path) = default_config_path() {
        println!("   Override path: {}", path.display());
    }
    println!();
    print!("{}", toml::to_string(&config)?);
    println!();
    Ok(())
}
