//! Shared line-oriented read-eval-respond loop.
//!
//! Both transports drive the same loop: read one line, decode it, hand it to
//! the dispatcher, write the encoded response as one flushed line, repeat.
//! One request is fully answered before the next line is read; the blocking
//! read is the only point where the loop yields.

use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{TransportError, TransportResult};
use crate::core::protocol::JsonRpcResponse;
use crate::core::server::McpServer;

/// Stopped/Running state owned by the transport.
///
/// Transitioned only by `start`/`stop`; clones share the underlying flag so
/// a handle can be handed to an interrupt handler. Stopping is cooperative:
/// an in-flight dispatch completes before the flag is re-checked.
#[derive(Clone)]
pub struct RunState {
    running: Arc<watch::Sender<bool>>,
}

impl RunState {
    /// Create a new state in Stopped.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            running: Arc::new(tx),
        }
    }

    /// Transition Stopped -> Running.
    pub fn start(&self) {
        self.running.send_replace(true);
    }

    /// Request Running -> Stopped. Idempotent.
    pub fn stop(&self) {
        self.running.send_replace(false);
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    /// Resolve once the state is Stopped. Used to abandon a blocked read.
    pub async fn stopped(&self) {
        let mut rx = self.running.subscribe();
        // The sender lives in self, so wait_for cannot observe a closed
        // channel here.
        let _ = rx.wait_for(|running| !*running).await;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve line-delimited JSON-RPC until EOF or stop.
///
/// Empty lines are skipped. A line that fails to decode is answered with a
/// `-32700` response carrying no id, and the loop continues. Every response
/// is flushed immediately so the caller observes responses promptly and in
/// request order.
pub async fn serve_lines<R, W>(
    server: &McpServer,
    reader: R,
    mut writer: W,
    state: &RunState,
) -> TransportResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while state.is_running() {
        let line = tokio::select! {
            line = lines.next_line() => match line.map_err(TransportError::from)? {
                Some(line) => line,
                None => {
                    info!("Input stream closed");
                    break;
                }
            },
            _ = state.stopped() => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(line) {
            Ok(request) => server.handle_request(request),
            Err(e) => {
                debug!("Failed to decode request line: {}", e);
                JsonRpcResponse::parse_error()
            }
        };

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
