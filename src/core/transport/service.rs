//! Transport service - orchestrates the configured transport.

use tracing::info;

use super::line::RunState;
use super::{TransportConfig, TransportResult};
use crate::core::server::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
    state: RunState,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            state: RunState::new(),
        }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// A handle the host can use to request shutdown, typically from an
    /// interrupt handler.
    pub fn run_state(&self) -> RunState {
        self.state.clone()
    }

    /// Start the transport with the given MCP server.
    ///
    /// This method blocks until the transport is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::new(self.state).run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg, self.state).run(server).await,
        }
    }
}
