//! The abstract transport contract the session engine requires from any
//! concrete channel — stdio, an HTTP+SSE pairing, or anything else.
//!
//! The core only ever asks a transport to do three things: accept an
//! outbound message, produce inbound messages in receipt order, and
//! quiesce on `close`. Everything else (framing, retries, auth,
//! connection pooling) is the concrete transport's problem and lives
//! outside this crate.
//!
//! This crate ships two implementations: [`stdio::StdioTransport`] for
//! line-delimited JSON over standard input/output, and
//! [`duplex::DuplexTransport`], an in-memory pair used by tests and by
//! anything embedding both peers in one process.

pub mod duplex;
pub mod stdio;

pub use duplex::DuplexTransport;
pub use stdio::StdioTransport;

use async_trait::async_trait;
use mcp_schema::protocol::JsonRpcMessage;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    #[error("malformed message: {0}")]
    Malformed(String),
}

impl From<TransportError> for mcp_schema::MCPError {
    fn from(err: TransportError) -> Self {
        use mcp_schema::error::TransportError as SchemaTransportError;
        match err {
            TransportError::Closed => {
                mcp_schema::MCPError::Transport(SchemaTransportError::ConnectionClosed)
            }
            TransportError::SendFailed(msg) => {
                mcp_schema::MCPError::Transport(SchemaTransportError::SendFailed(msg))
            }
            TransportError::ReceiveFailed(msg) | TransportError::Malformed(msg) => {
                mcp_schema::MCPError::Transport(SchemaTransportError::ReceiveFailed(msg))
            }
        }
    }
}

/// The contract the session engine requires from any transport.
///
/// `send` delivers a single fully-encoded message; completion signals
/// local buffer acceptance, not remote receipt. `receive` yields the
/// next inbound message in receipt order, or [`TransportError::Closed`]
/// once the peer has disconnected — the session treats that as the end
/// of the inbound stream, not a fatal error in itself. `close` may be
/// called more than once; implementations must make the second call a
/// no-op.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, message: JsonRpcMessage) -> Result<()>;

    async fn receive(&mut self) -> Result<JsonRpcMessage>;

    async fn close(&mut self) -> Result<()>;
}
