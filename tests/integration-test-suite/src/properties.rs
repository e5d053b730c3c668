//! Cross-cutting protocol invariants that hold regardless of which
//! scenario exercises them.

#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mcp::{
    ClientCapabilities, ClientInfo, DuplexTransport, InitializeRequest, InitializeResponse,
    MCPError, MCPResult, Server, ServerCapabilities, ServerInfo, Session, Tool, ToolCallRequest,
    ToolCallResponse, ToolHandler, CURRENT_VERSION,
};
use serde_json::Value;

async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

fn server_handshake(session: &Session) {
    session.register_request_handler(
        "initialize",
        Arc::new(|_params: Option<Value>| {
            Box::pin(async move {
                Ok(serde_json::to_value(InitializeResponse {
                    protocol_version: CURRENT_VERSION.to_string(),
                    capabilities: ServerCapabilities::default(),
                    server_info: ServerInfo::new("peer-server", "0.1.0"),
                    instructions: None,
                })?)
            }) as mcp::BoxFuture<'static, MCPResult<Value>>
        }),
    );
}

struct SlowEcho {
    delay: Duration,
}

#[async_trait::async_trait]
impl ToolHandler for SlowEcho {
    async fn call(&self, arguments: Option<Value>) -> MCPResult<ToolCallResponse> {
        tokio::time::sleep(self.delay).await;
        let tag = arguments.as_ref().and_then(|a| a.get("tag")).and_then(|v| v.as_str()).unwrap_or("");
        Ok(ToolCallResponse::text(format!("echo:{tag}")))
    }
}

/// Invariant: every request completes exactly once, matched to its own
/// id — two concurrent calls on the same client never cross wires even
/// when the handler serving the slower one finishes last.
#[tokio::test]
async fn each_request_completes_with_its_own_response() {
    let (client_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(Box::new(server_transport), ServerInfo::new("prop-server", "0.1.0"), ServerCapabilities::default());
    server
        .add_tool(Tool::new("slow", "delays then echoes a tag", serde_json::json!({"type": "object"})), Arc::new(SlowEcho { delay: Duration::from_millis(60) }))
        .unwrap();
    server
        .add_tool(Tool::new("fast", "echoes a tag immediately", serde_json::json!({"type": "object"})), Arc::new(SlowEcho { delay: Duration::from_millis(0) }))
        .unwrap();

    let client = mcp::Client::connect(Box::new(client_transport), ClientInfo::new("prop-client", "0.1.0"), ClientCapabilities::default(), None)
        .await
        .unwrap();

    let slow = client.call_tool(ToolCallRequest { name: "slow".to_string(), arguments: Some(serde_json::json!({"tag": "slow"})) });
    let fast = client.call_tool(ToolCallRequest { name: "fast".to_string(), arguments: Some(serde_json::json!({"tag": "fast"})) });
    let (slow_response, fast_response) = tokio::join!(slow, fast);

    assert_eq!(slow_response.unwrap().content[0].as_text(), Some("echo:slow"));
    assert_eq!(fast_response.unwrap().content[0].as_text(), Some("echo:fast"));
}

/// Invariant: a notification never produces a response — it resolves
/// as soon as it is handed to the transport, with no pending entry
/// left behind to match against a reply that will never arrive.
#[tokio::test]
async fn notifications_resolve_without_waiting_for_a_reply() {
    let (client_transport, peer_transport) = DuplexTransport::pair();
    let peer = Session::spawn(Box::new(peer_transport));
    server_handshake(&peer);

    let client = mcp::Client::connect(Box::new(client_transport), ClientInfo::new("notif-client", "0.1.0"), ClientCapabilities::default(), None)
        .await
        .unwrap();

    // `add_root` sends `notifications/roots/list_changed` internally;
    // it returns as soon as the notification is handed to the
    // transport, with no reply ever expected.
    client.add_root(mcp::Root::new("file:///root")).unwrap();
}

/// Invariant: notifications from one caller on one session are
/// observed by the peer in the order they were sent.
#[tokio::test]
async fn notifications_from_one_caller_are_observed_in_order() {
    let (a_transport, b_transport) = DuplexTransport::pair();
    let a = Session::spawn(Box::new(a_transport));
    let b = Session::spawn(Box::new(b_transport));

    let observed: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let observed = Arc::clone(&observed);
        b.register_notification_handler(
            "sequence",
            Arc::new(move |params: Option<Value>| {
                let observed = Arc::clone(&observed);
                Box::pin(async move {
                    let n: u32 = serde_json::from_value(params.unwrap_or(Value::Null))?;
                    observed.lock().unwrap().push(n);
                    Ok(())
                }) as mcp::BoxFuture<'static, MCPResult<()>>
            }),
        );
    }

    // `notify` guards on session state; spin both sides up to
    // `Operating` first via a minimal handshake.
    a.register_request_handler(
        "initialize",
        Arc::new(|_params: Option<Value>| {
            Box::pin(async move {
                Ok(serde_json::to_value(InitializeResponse {
                    protocol_version: CURRENT_VERSION.to_string(),
                    capabilities: ServerCapabilities::default(),
                    server_info: ServerInfo::new("a", "0.1.0"),
                    instructions: None,
                })?)
            }) as mcp::BoxFuture<'static, MCPResult<Value>>
        }),
    );
    let request = InitializeRequest {
        protocol_version: CURRENT_VERSION.to_string(),
        capabilities: ClientCapabilities::default(),
        client_info: ClientInfo::new("b", "0.1.0"),
    };
    b.request("initialize", Some(serde_json::to_value(request).unwrap()), Some(Duration::from_secs(1)))
        .await
        .unwrap();
    b.notify(mcp::INITIALIZED_NOTIFICATION, None).unwrap();
    settle().await;

    for n in 0..10u32 {
        b.notify("sequence", Some(serde_json::to_value(n).unwrap())).unwrap();
    }
    settle().await;

    assert_eq!(*observed.lock().unwrap(), (0..10u32).collect::<Vec<_>>());
}

/// Invariant: a capability-gated operation fails before any request
/// crosses the wire — the peer's handler for that method is never
/// invoked.
#[tokio::test]
async fn capability_rejection_produces_zero_wire_traffic() {
    let (peer_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(Box::new(server_transport), ServerInfo::new("prop-server", "0.1.0"), ServerCapabilities::default());
    let peer = Session::spawn(Box::new(peer_transport));

    let invocation_count = Arc::new(AtomicUsize::new(0));
    {
        let invocation_count = Arc::clone(&invocation_count);
        peer.register_request_handler(
            "sampling/createMessage",
            Arc::new(move |_params: Option<Value>| {
                let invocation_count = Arc::clone(&invocation_count);
                Box::pin(async move {
                    invocation_count.fetch_add(1, Ordering::SeqCst);
                    Err(MCPError::handler("should never be called"))
                }) as mcp::BoxFuture<'static, MCPResult<Value>>
            }),
        );
    }

    let request = InitializeRequest {
        protocol_version: CURRENT_VERSION.to_string(),
        capabilities: ClientCapabilities::default(),
        client_info: ClientInfo::new("prop-peer", "0.1.0"),
    };
    peer.request("initialize", Some(serde_json::to_value(request).unwrap()), Some(Duration::from_secs(1)))
        .await
        .unwrap();
    peer.notify(mcp::INITIALIZED_NOTIFICATION, None).unwrap();
    settle().await;

    let request = mcp::SamplingRequest::new(
        vec![mcp::SamplingMessage::new(mcp::Role::User, mcp::ContentBlock::text("hi"))],
        16,
    );
    let err = server.create_message(request).await.unwrap_err();
    assert!(matches!(err, MCPError::Capability(_)), "{err}");
    assert_eq!(invocation_count.load(Ordering::SeqCst), 0);
}

/// Invariant: the wire schema round-trips through JSON without loss.
/// One representative message is enough to pin the contract; an
/// exhaustive per-type grid would just restate each type's `Serialize`
/// derive.
#[test]
fn initialize_request_round_trips_through_json() {
    let request = InitializeRequest {
        protocol_version: CURRENT_VERSION.to_string(),
        capabilities: ClientCapabilities::default(),
        client_info: ClientInfo::new("round-trip-client", "1.2.3"),
    };
    let json = serde_json::to_value(&request).unwrap();
    let back: InitializeRequest = serde_json::from_value(json).unwrap();
    assert_eq!(back.protocol_version, request.protocol_version);
    assert_eq!(back.client_info.name, "round-trip-client");
    assert_eq!(back.client_info.version, "1.2.3");
}

/// Invariant: `close()` is idempotent from any caller, any number of
/// times, and from both peers.
#[tokio::test]
async fn close_is_idempotent_from_both_peers() {
    let (client_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(Box::new(server_transport), ServerInfo::new("close-server", "0.1.0"), ServerCapabilities::default());
    let client = mcp::Client::connect(Box::new(client_transport), ClientInfo::new("close-client", "0.1.0"), ClientCapabilities::default(), None)
        .await
        .unwrap();

    client.close().await.unwrap();
    client.close().await.unwrap();
    server.close().await.unwrap();
    server.close().await.unwrap();
}
