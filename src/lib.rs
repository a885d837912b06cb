//! CSV MCP Server Library
//!
//! A minimal Model Context Protocol (MCP) server that exposes a dynamically
//! registered set of tools over a line-oriented JSON-RPC transport.
//!
//! # Architecture
//!
//! - **core**: Infrastructure - configuration, errors, the JSON-RPC
//!   envelope, the request dispatcher, and the transport loop
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The tool registry, schema declaration, and the tool
//!     implementations clients can call
//!
//! # Example
//!
//! ```rust,no_run
//! use csv_mcp_server::core::{Config, McpServer, TransportService};
//! use csv_mcp_server::domains::tools::ToolRegistry;
//! use csv_mcp_server::domains::tools::definitions::CreateCsvTool;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let mut registry = ToolRegistry::new();
//!     CreateCsvTool::register(&mut registry, &config.tools.output_dir);
//!     let server = McpServer::new(&config, registry);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
