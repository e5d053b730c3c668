//! End-to-end scenarios exercising the client and server feature layers
//! together over an in-memory transport.
//!
//! Several scenarios need to observe a notification or request a real
//! `Client`/`Server` doesn't expose a handle for (arbitrary handler
//! registration). For those, a raw [`mcp::Session`] stands in for the
//! other peer — the same pattern `mcp-client` and `mcp-server` use in
//! their own unit tests.

#![cfg(test)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mcp::{
    Client, ClientCapabilities, ClientInfo, ContentBlock, DuplexTransport, MCPResult,
    Role, Root, RootListChangedNotification, RootsCapability, SamplingCapability,
    SamplingHandler, SamplingMessage, SamplingRequest, SamplingResponse, Server,
    ServerCapabilities, ServerInfo, Session, SessionState, Tool, ToolCallRequest,
    ToolCallResponse, ToolHandler, ToolsCapability,
};
use serde_json::Value;

async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

/// S1 — a plain client/server pair reaches `Operating` on both sides.
#[tokio::test]
async fn s1_initialize_handshake_reaches_operating() {
    let (client_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(
        Box::new(server_transport),
        ServerInfo::new("s1-server", "0.1.0"),
        ServerCapabilities::default(),
    );
    let client = Client::connect(
        Box::new(client_transport),
        ClientInfo::new("s1-client", "0.1.0"),
        ClientCapabilities::default(),
        None,
    )
    .await
    .unwrap();

    assert_eq!(client.state(), SessionState::Operating);
    assert_eq!(server.state(), SessionState::Operating);
    assert_eq!(client.server_info().unwrap().name, "s1-server");
}

struct SamplingTool {
    server: Server,
}

#[async_trait::async_trait]
impl ToolHandler for SamplingTool {
    async fn call(&self, _arguments: Option<Value>) -> MCPResult<ToolCallResponse> {
        let request = SamplingRequest::new(
            vec![SamplingMessage::new(Role::User, ContentBlock::text("summarize this"))],
            64,
        );
        let response = self.server.create_message(request).await?;
        let text = response.content.as_text().unwrap_or_default();
        Ok(ToolCallResponse::text(format!("sampled: {text}")))
    }
}

struct FixedSampler;

#[async_trait::async_trait]
impl SamplingHandler for FixedSampler {
    async fn create_message(&self, _request: SamplingRequest) -> MCPResult<SamplingResponse> {
        Ok(SamplingResponse::new(
            Role::Assistant,
            ContentBlock::text("the weather is fine"),
            "test-model",
        ))
    }
}

/// S2 — a tool handler triggers a server-initiated sampling request;
/// the client answers it and the tool call's result reflects the
/// sampled content.
#[tokio::test]
async fn s2_tool_call_round_trips_through_remote_sampling() {
    let (client_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(
        Box::new(server_transport),
        ServerInfo::new("s2-server", "0.1.0"),
        ServerCapabilities::default(),
    );
    server
        .add_tool(
            Tool::new("summarize", "summarize via sampling", serde_json::json!({"type": "object"})),
            Arc::new(SamplingTool { server: server.clone() }),
        )
        .unwrap();

    let capabilities = ClientCapabilities {
        sampling: Some(SamplingCapability::default()),
        ..Default::default()
    };
    let client = Client::connect(
        Box::new(client_transport),
        ClientInfo::new("s2-client", "0.1.0"),
        capabilities,
        Some(Arc::new(FixedSampler)),
    )
    .await
    .unwrap();

    let response = client
        .call_tool(ToolCallRequest { name: "summarize".to_string(), arguments: None })
        .await
        .unwrap();
    assert!(!response.is_error());
    assert_eq!(response.content[0].as_text(), Some("sampled: the weather is fine"));
}

/// S3 — the same tool, but the client carries no sampling capability:
/// the server rejects the outbound sampling request locally, before any
/// traffic crosses the wire, and the rejection surfaces as an in-band
/// tool error rather than a protocol failure.
#[tokio::test]
async fn s3_sampling_without_capability_becomes_an_in_band_tool_error() {
    let (client_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(
        Box::new(server_transport),
        ServerInfo::new("s3-server", "0.1.0"),
        ServerCapabilities::default(),
    );
    server
        .add_tool(
            Tool::new("summarize", "summarize via sampling", serde_json::json!({"type": "object"})),
            Arc::new(SamplingTool { server: server.clone() }),
        )
        .unwrap();

    let client = Client::connect(
        Box::new(client_transport),
        ClientInfo::new("s3-client", "0.1.0"),
        ClientCapabilities::default(),
        None,
    )
    .await
    .unwrap();

    let response = client
        .call_tool(ToolCallRequest { name: "summarize".to_string(), arguments: None })
        .await
        .unwrap();
    assert!(response.is_error());
    let text = response.content[0].as_text().unwrap();
    assert!(text.contains("Client must be configured with sampling capabilities"), "{text}");
}

fn server_handshake(session: &Session) {
    session.register_request_handler(
        "initialize",
        Arc::new(|_params: Option<Value>| {
            Box::pin(async move {
                Ok(serde_json::to_value(mcp::InitializeResponse {
                    protocol_version: mcp::CURRENT_VERSION.to_string(),
                    capabilities: ServerCapabilities::default(),
                    server_info: ServerInfo::new("peer-server", "0.1.0"),
                    instructions: None,
                })?)
            }) as mcp::BoxFuture<'static, MCPResult<Value>>
        }),
    );
}

/// S4 — a client with roots capability adds and removes roots; a raw
/// peer session standing in for the server observes each change via
/// `notifications/roots/list_changed`, whose payload already carries
/// the full updated list.
#[tokio::test]
async fn s4_roots_lifecycle_is_observed_by_the_peer() {
    let (client_transport, peer_transport) = DuplexTransport::pair();
    let peer = Session::spawn(Box::new(peer_transport));
    server_handshake(&peer);

    let observed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let observed = Arc::clone(&observed);
        peer.register_notification_handler(
            "notifications/roots/list_changed",
            Arc::new(move |params: Option<Value>| {
                let observed = Arc::clone(&observed);
                Box::pin(async move {
                    let notification: RootListChangedNotification =
                        serde_json::from_value(params.unwrap_or(Value::Null))?;
                    *observed.lock().unwrap() =
                        notification.roots.into_iter().map(|r| r.uri).collect();
                    Ok(())
                }) as mcp::BoxFuture<'static, MCPResult<()>>
            }),
        );
    }

    let capabilities = ClientCapabilities {
        roots: Some(RootsCapability { list_changed: Some(true) }),
        ..Default::default()
    };
    let client = Client::connect(
        Box::new(client_transport),
        ClientInfo::new("s4-client", "0.1.0"),
        capabilities,
        None,
    )
    .await
    .unwrap();

    client.add_root(Root::new("file:///a").with_name("a")).unwrap();
    client.add_root(Root::new("file:///b").with_name("b")).unwrap();
    settle().await;
    assert_eq!(*observed.lock().unwrap(), vec!["file:///a".to_string(), "file:///b".to_string()]);

    client.remove_root("file:///a").unwrap();
    settle().await;
    assert_eq!(*observed.lock().unwrap(), vec!["file:///b".to_string()]);
}

/// S5 — a client with no roots capability rejects a `roots/list`
/// request locally; the capability error crosses the wire as a
/// `JsonRpcError` and is reconstructed as a `Protocol` error on the
/// peer, but the original message text survives verbatim.
#[tokio::test]
async fn s5_roots_list_without_capability_is_rejected() {
    let (client_transport, peer_transport) = DuplexTransport::pair();
    let peer = Session::spawn(Box::new(peer_transport));
    server_handshake(&peer);

    let client = Client::connect(
        Box::new(client_transport),
        ClientInfo::new("s5-client", "0.1.0"),
        ClientCapabilities::default(),
        None,
    )
    .await
    .unwrap();

    let err = peer
        .request("roots/list", None, Some(Duration::from_secs(1)))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Roots not supported"), "{err}");
    let _ = client;
}

/// S6 — a server's tool registry mutations propagate as
/// `notifications/tools/list_changed`; since that notification carries
/// no payload, the peer re-fetches `tools/list` each time to observe
/// the new state.
#[tokio::test]
async fn s6_tool_registry_changes_propagate_to_the_peer() {
    let capabilities = ServerCapabilities {
        tools: Some(ToolsCapability { list_changed: Some(true) }),
        ..Default::default()
    };
    let (peer_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(Box::new(server_transport), ServerInfo::new("s6-server", "0.1.0"), capabilities);
    let peer = Session::spawn(Box::new(peer_transport));

    let request = mcp::InitializeRequest {
        protocol_version: mcp::CURRENT_VERSION.to_string(),
        capabilities: ClientCapabilities::default(),
        client_info: ClientInfo::new("s6-peer", "0.1.0"),
    };
    peer.request("initialize", Some(serde_json::to_value(request).unwrap()), Some(Duration::from_secs(1)))
        .await
        .unwrap();
    peer.notify(mcp::INITIALIZED_NOTIFICATION, None).unwrap();
    settle().await;

    let observed_states: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let observed_states = Arc::clone(&observed_states);
        let peer_for_refetch = peer.clone();
        peer.register_notification_handler(
            "notifications/tools/list_changed",
            Arc::new(move |_params: Option<Value>| {
                let observed_states = Arc::clone(&observed_states);
                let peer = peer_for_refetch.clone();
                Box::pin(async move {
                    let value = peer.request("tools/list", None, Some(Duration::from_secs(1))).await?;
                    let response: mcp::ListToolsResponse = serde_json::from_value(value)?;
                    observed_states.lock().unwrap().push(response.tools.into_iter().map(|t| t.name).collect());
                    Ok(())
                }) as mcp::BoxFuture<'static, MCPResult<()>>
            }),
        );
    }

    let noop = serde_json::json!({"type": "object"});
    server.add_tool(Tool::new("one", "tool one", noop.clone()), Arc::new(EchoTool)).unwrap();
    settle().await;
    server.add_tool(Tool::new("two", "tool two", noop.clone()), Arc::new(EchoTool)).unwrap();
    settle().await;
    server.remove_tool("one").unwrap();
    settle().await;

    let states = observed_states.lock().unwrap().clone();
    assert_eq!(states, vec![
        vec!["one".to_string()],
        vec!["one".to_string(), "two".to_string()],
        vec!["two".to_string()],
    ]);
}

struct EchoTool;

#[async_trait::async_trait]
impl ToolHandler for EchoTool {
    async fn call(&self, _arguments: Option<Value>) -> MCPResult<ToolCallResponse> {
        Ok(ToolCallResponse::text("ok"))
    }
}

/// S7 — closing the peer session propagates to the client: it
/// transitions to `Closed`, a subsequent request fails with
/// `SessionClosed`, and closing the client itself stays idempotent.
#[tokio::test]
async fn s7_peer_disconnect_closes_the_client_gracefully() {
    let (client_transport, peer_transport) = DuplexTransport::pair();
    let peer = Session::spawn(Box::new(peer_transport));
    server_handshake(&peer);

    let capabilities = ClientCapabilities {
        roots: Some(RootsCapability { list_changed: Some(true) }),
        ..Default::default()
    };
    let client = Client::connect(
        Box::new(client_transport),
        ClientInfo::new("s7-client", "0.1.0"),
        capabilities,
        None,
    )
    .await
    .unwrap();
    client.add_root(Root::new("file:///a")).unwrap();
    assert_eq!(client.state(), SessionState::Operating);

    peer.close().await.unwrap();
    settle().await;
    assert_eq!(client.state(), SessionState::Closed);

    client.close().await.unwrap();
    client.close().await.unwrap();
}
