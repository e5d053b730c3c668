//! An in-memory transport pair connected by channels, used by tests and
//! by any single process that hosts both session peers.

use crate::{Result, Transport, TransportError};
use async_trait::async_trait;
use mcp_schema::protocol::JsonRpcMessage;
use tokio::sync::mpsc;

/// One end of an in-memory duplex channel. Construct a connected pair
/// with [`DuplexTransport::pair`].
pub struct DuplexTransport {
    outbound: mpsc::UnboundedSender<JsonRpcMessage>,
    inbound: mpsc::UnboundedReceiver<JsonRpcMessage>,
    closed: bool,
}

impl DuplexTransport {
    /// Build two transports wired to each other: messages sent on one
    /// arrive on the other's `receive`.
    pub fn pair() -> (Self, Self) {
        let (a_to_b, b_from_a) = mpsc::unbounded_channel();
        let (b_to_a, a_from_b) = mpsc::unbounded_channel();

        let a = Self {
            outbound: a_to_b,
            inbound: a_from_b,
            closed: false,
        };
        let b = Self {
            outbound: b_to_a,
            inbound: b_from_a,
            closed: false,
        };
        (a, b)
    }
}

#[async_trait]
impl Transport for DuplexTransport {
    async fn send(&mut self, message: JsonRpcMessage) -> Result<()> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.outbound
            .send(message)
            .map_err(|_| TransportError::Closed)
    }

    async fn receive(&mut self) -> Result<JsonRpcMessage> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.inbound.recv().await.ok_or(TransportError::Closed)
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.inbound.close();
        Ok(())
    }
}
