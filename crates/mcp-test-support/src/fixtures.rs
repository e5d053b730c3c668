//! Common test fixtures: server/client info and capabilities with
//! sane defaults, a ready-to-register echo tool, and a helper that
//! drives a full `initialize` handshake over an in-memory transport.

use std::sync::Arc;

use async_trait::async_trait;
use mcp_client::Client;
use mcp_schema::{
    ClientCapabilities, ClientInfo, MCPResult, ServerCapabilities, ServerInfo, Tool, ToolCallResponse,
    ToolsCapability,
};
use mcp_server::{Server, ToolHandler};
use mcp_transport::DuplexTransport;
use serde_json::Value;

/// A server info value with a given name, `0.1.0` version.
pub fn test_server_info(name: &str) -> ServerInfo {
    ServerInfo::new(name, "0.1.0")
}

/// A client info value with a given name, `0.1.0` version.
pub fn test_client_info(name: &str) -> ClientInfo {
    ClientInfo::new(name, "0.1.0")
}

/// Server capabilities advertising `tools` with `listChanged` enabled,
/// the shape most tests that mutate the tool registry need.
pub fn test_server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        tools: Some(ToolsCapability { list_changed: Some(true) }),
        ..Default::default()
    }
}

pub fn test_client_capabilities() -> ClientCapabilities {
    ClientCapabilities::default()
}

/// Echoes back the `message` argument, or `"Hello, World!"` if absent.
pub struct EchoToolHandler;

#[async_trait]
impl ToolHandler for EchoToolHandler {
    async fn call(&self, arguments: Option<Value>) -> MCPResult<ToolCallResponse> {
        let message = arguments
            .as_ref()
            .and_then(|args| args.get("message"))
            .and_then(|msg| msg.as_str())
            .unwrap_or("Hello, World!");
        Ok(ToolCallResponse::text(message.to_string()))
    }
}

/// The `echo` tool descriptor paired with [`EchoToolHandler`].
pub fn echo_tool() -> Tool {
    Tool::new(
        "echo",
        "Echo back the input message",
        serde_json::json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "The message to echo back"
                }
            },
            "required": ["message"]
        }),
    )
}

/// A server over one end of a [`DuplexTransport`] pair, pre-populated
/// with the echo tool, and the still-unconnected other end.
pub fn server_with_echo_tool() -> (Server, DuplexTransport) {
    let (client_transport, server_transport) = DuplexTransport::pair();
    let server = Server::serve(Box::new(server_transport), test_server_info("test-server"), test_server_capabilities());
    server.add_tool(echo_tool(), Arc::new(EchoToolHandler)).unwrap();
    (server, client_transport)
}

/// Spawn a server (with the echo tool registered) and a client
/// connected to it over an in-memory transport, handshake already
/// complete.
pub async fn connected_pair() -> (Client, Server) {
    let (server, client_transport) = server_with_echo_tool();
    let client = Client::connect(
        Box::new(client_transport),
        test_client_info("test-client"),
        test_client_capabilities(),
        None,
    )
    .await
    .unwrap();
    (client, server)
}
