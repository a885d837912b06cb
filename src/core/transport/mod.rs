//! Transport layer for the MCP server.
//!
//! This module provides line-oriented transport implementations:
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: Raw TCP socket with line-delimited JSON-RPC - feature: `tcp`
//!
//! Each transport owns its run/stop lifecycle and delegates message
//! processing to the dispatcher via the shared line loop in [`line`].

mod config;
mod error;
mod line;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use line::{RunState, serve_lines};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
