//! Mock implementations for testing code built on the session engine
//! without a real transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use mcp_schema::protocol::JsonRpcMessage;
use mcp_transport::{Transport, TransportError};

/// A transport that records every outbound message and serves inbound
/// ones from a pre-loaded queue. Useful for driving a [`mcp_session::Session`]
/// or a feature-layer handler without a peer on the other end.
pub struct RecordingTransport {
    pub sent: Arc<Mutex<Vec<JsonRpcMessage>>>,
    receive_queue: Arc<Mutex<VecDeque<JsonRpcMessage>>>,
    fail_send: Arc<Mutex<bool>>,
    fail_receive: Arc<Mutex<bool>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            receive_queue: Arc::new(Mutex::new(VecDeque::new())),
            fail_send: Arc::new(Mutex::new(false)),
            fail_receive: Arc::new(Mutex::new(false)),
        }
    }

    /// Queue a message to be returned by the next `receive` call.
    pub fn push_inbound(&self, message: JsonRpcMessage) {
        self.receive_queue.lock().unwrap().push_back(message);
    }

    pub fn sent_messages(&self) -> Vec<JsonRpcMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_fail_send(&self, fail: bool) {
        *self.fail_send.lock().unwrap() = fail;
    }

    pub fn set_fail_receive(&self, fail: bool) {
        *self.fail_receive.lock().unwrap() = fail;
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&mut self, message: JsonRpcMessage) -> mcp_transport::Result<()> {
        if *self.fail_send.lock().unwrap() {
            return Err(TransportError::SendFailed("mock send failure".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn receive(&mut self) -> mcp_transport::Result<JsonRpcMessage> {
        if *self.fail_receive.lock().unwrap() {
            return Err(TransportError::ReceiveFailed("mock receive failure".to_string()));
        }
        self.receive_queue
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(TransportError::Closed)
    }

    async fn close(&mut self) -> mcp_transport::Result<()> {
        Ok(())
    }
}

/// Build a [`RecordingTransport`] whose receive queue is pre-loaded with
/// `messages`, in order.
pub fn transport_with_inbound(messages: Vec<JsonRpcMessage>) -> RecordingTransport {
    let transport = RecordingTransport::new();
    for message in messages {
        transport.push_inbound(message);
    }
    transport
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_schema::protocol::{JsonRpcRequest, RequestId};

    fn sample_request(method: &str, id: i64) -> JsonRpcMessage {
        JsonRpcMessage::Request(JsonRpcRequest::new(
            method.to_string(),
            None,
            Some(RequestId::number(id)),
        ))
    }

    #[tokio::test]
    async fn send_is_recorded() {
        let mut transport = RecordingTransport::new();
        transport.send(sample_request("test", 1)).await.unwrap();
        assert_eq!(transport.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn receive_drains_the_queue_in_order() {
        let mut transport = transport_with_inbound(vec![sample_request("a", 1), sample_request("b", 2)]);
        let JsonRpcMessage::Request(first) = transport.receive().await.unwrap() else {
            panic!("expected a request");
        };
        assert_eq!(first.method, "a");
    }

    #[tokio::test]
    async fn receive_on_an_empty_queue_reports_closed() {
        let mut transport = RecordingTransport::new();
        let err = transport.receive().await.unwrap_err();
        assert!(matches!(err, TransportError::Closed));
    }

    #[tokio::test]
    async fn send_failure_is_configurable() {
        let mut transport = RecordingTransport::new();
        transport.set_fail_send(true);
        let err = transport.send(sample_request("test", 1)).await.unwrap_err();
        assert!(matches!(err, TransportError::SendFailed(_)));
    }
}
