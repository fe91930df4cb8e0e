//! Server command implementation

use std::path::Path;

use anyhow::Result;
use creators_core::InsightEngine;
use creators_server::{parse_api_keys, ServerConfig, API_KEYS_ENV};

use super::load_config;

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    no_auth: bool,
) -> Result<()> {
    let engine = InsightEngine::with_config(load_config(config_path)?);

    println!("🚀 Starting Creators OS insight server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Insight rules: {}", engine.insight_keys().len());

    // Parse API keys from environment (comma-separated)
    let api_keys = parse_api_keys(&std::env::var(API_KEYS_ENV).unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!("   ❌ No API keys configured. Set {} or use --no-auth", API_KEYS_ENV);
    } else {
        println!("   🔑 API keys: {} configured ({})", api_keys.len(), API_KEYS_ENV);
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    creators_server::serve(engine, host, port, config).await
}
