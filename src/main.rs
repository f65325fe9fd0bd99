//! Chain-of-Draft server binary entry point.
//!
//! All logs go to stderr; stdout is reserved for MCP JSON-RPC messages.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use chain_of_draft::config::{log_filter, Config, DEFAULT_LOG_LEVEL};
use chain_of_draft::server::McpServer;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Load .env before the filter reads LOG_LEVEL
    let _ = dotenvy::dotenv();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("chain-of-draft starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        log_level = %config.log_level,
        render_thoughts = config.render_thoughts(),
        trigger = %config.auto_cot.trigger_phrase,
        "Configuration loaded"
    );

    let server = McpServer::new(config);
    if let Err(e) = server.run_stdio().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("chain-of-draft shutdown complete");
}
