//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes logging,
//! loads configuration, and starts the HTTP transport.

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use math_mcp_server::core::config::LoggingConfig;
use math_mcp_server::core::{Config, HttpTransport, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging before anything else can fail
    init_logging(&LoggingConfig::from_env().level);

    // Load configuration from environment; a missing secret is fatal
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e).context("failed to load configuration");
        }
    };

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = HttpTransport::new(config.transport.clone());
    info!("Starting transport: {}", config.transport.description());

    let server = McpServer::new(config);
    info!("Server initialized with tools: {:?}", server.tools().tool_names());

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
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
