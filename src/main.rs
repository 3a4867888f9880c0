//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration and serves MCP over STDIO.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use spotify_mcp_server::core::{Config, McpServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    config.spotify.report_credentials();
    info!(
        "Spotify API at {}, tokens at {}",
        config.spotify.api_base_url,
        config.spotify.token_path.display()
    );

    let server = McpServer::from_config(config)?;

    info!("Server {} initialized", server.name());

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
