//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended
//! mode. Requests come in one per line on stdin; responses go out one per
//! line on stdout. All logging goes to stderr so stdout stays a pure
//! response stream.

use tokio::io::BufReader;
use tracing::info;

use super::line::{RunState, serve_lines};
use super::TransportResult;
use crate::core::server::McpServer;

/// STDIO transport handler.
pub struct StdioTransport {
    state: RunState,
}

impl StdioTransport {
    /// Create a new STDIO transport with the given run state.
    pub fn new(state: RunState) -> Self {
        Self { state }
    }

    /// Run the STDIO transport. Blocks until EOF or `stop()`.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        self.state.start();
        info!("MCP Server '{}' started", server.name());

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        let result = serve_lines(&server, stdin, stdout, &self.state).await;

        self.state.stop();
        info!("STDIO transport finished");
        result
    }
}
