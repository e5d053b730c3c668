//! Line-delimited JSON over standard input/output.
//!
//! One JSON-RPC message per line, UTF-8, no embedded newlines. `stderr`
//! is reserved for host-process logs and must never carry protocol
//! traffic.

use crate::{Result, Transport, TransportError};
use async_trait::async_trait;
use mcp_schema::protocol::JsonRpcMessage;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::trace;

pub struct StdioTransport {
    stdin: BufReader<tokio::io::Stdin>,
    stdout: BufWriter<tokio::io::Stdout>,
    closed: bool,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
            stdout: BufWriter::new(tokio::io::stdout()),
            closed: false,
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&mut self, message: JsonRpcMessage) -> Result<()> {
        if self.closed {
            return Err(TransportError::Closed);
        }

        let mut line = serde_json::to_string(&message)
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;
        line.push('\n');

        trace!(bytes = line.len(), "writing stdio message");

        self.stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;
        self.stdout
            .flush()
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        Ok(())
    }

    async fn receive(&mut self) -> Result<JsonRpcMessage> {
        if self.closed {
            return Err(TransportError::Closed);
        }

        let mut line = String::new();
        let bytes_read = self
            .stdin
            .read_line(&mut line)
            .await
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

        if bytes_read == 0 {
            self.closed = true;
            return Err(TransportError::Closed);
        }

        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            return Err(TransportError::Malformed("received empty line".to_string()));
        }

        trace!(bytes = trimmed.len(), "read stdio message");
        serde_json::from_str(trimmed).map_err(|e| TransportError::Malformed(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let _ = self.stdout.flush().await;
        Ok(())
    }
}
