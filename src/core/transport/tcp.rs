//! TCP transport implementation.
//!
//! Raw TCP socket transport with line-delimited JSON-RPC messages. Each
//! connection gets its own copy of the dispatcher and runs the same line
//! loop as stdio; within a connection requests are still answered strictly
//! in order.

use tokio::io::BufReader;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::TcpConfig;
use super::line::{RunState, serve_lines};
use super::{TransportError, TransportResult};
use crate::core::server::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
    state: RunState,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config and run state.
    pub fn new(config: TcpConfig, state: RunState) -> Self {
        Self { config, state }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport. Blocks until `stop()`.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        self.state.start();
        info!("Ready - listening on {} (line-delimited JSON-RPC)", addr);

        while self.state.is_running() {
            let accepted = tokio::select! {
                accepted = listener.accept() => accepted,
                _ = self.state.stopped() => break,
            };

            match accepted {
                Ok((stream, peer_addr)) => {
                    info!("Accepted connection from {}", peer_addr);

                    // Disable Nagle's algorithm so responses flush per line
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                    }

                    let server = server.clone();
                    let state = self.state.clone();

                    tokio::spawn(async move {
                        let (read_half, write_half) = stream.into_split();
                        let reader = BufReader::new(read_half);
                        match serve_lines(&server, reader, write_half, &state).await {
                            Ok(()) => info!("Client {} disconnected", peer_addr),
                            Err(e) => warn!("Error while serving client {}: {}", peer_addr, e),
                        }
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Small delay to avoid spinning on persistent errors
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }

        self.state.stop();
        info!("TCP transport finished");
        Ok(())
    }
}
