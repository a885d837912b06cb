//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, registers the tools, and runs
//! the server with the configured transport. An interrupt requests a
//! graceful stop of the transport loop.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use csv_mcp_server::core::{Config, McpServer, TransportService};
use csv_mcp_server::domains::tools::ToolRegistry;
use csv_mcp_server::domains::tools::definitions::CreateCsvTool;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Register tools; the registry is read-only once the loop starts
    let mut registry = ToolRegistry::new();
    CreateCsvTool::register(&mut registry, &config.tools.output_dir);

    let server = McpServer::new(&config, registry);

    info!("Server initialized with {} tool(s)", server.registry().len());

    // Create the transport and hand its stop handle to a ctrl-c task
    let transport = TransportService::new(config.transport.clone());
    let state = transport.run_state();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping server");
            state.stop();
        }
    });

    transport.run(server).await?;

    info!("Server stopped");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr so
/// stdout stays reserved for responses.
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
