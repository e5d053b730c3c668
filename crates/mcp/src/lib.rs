//! # mcp
//!
//! A single-crate facade over the Model Context Protocol session
//! engine: the wire schema ([`mcp_schema`]), the transport contract
//! ([`mcp_transport`]), the symmetric session engine ([`mcp_session`]),
//! and the client/server feature layers built on it.
//!
//! **Primary APIs:**
//! - [`Client`]: connect to an MCP server and drive its tools,
//!   resources, and prompts.
//! - [`Server`]: answer an MCP client's requests from registered tool,
//!   resource, and prompt handlers.
//!
//! Everything needed to build either side of a connection is
//! re-exported at the crate root; `use mcp::prelude::*;` brings the
//! most commonly needed names into scope in one line.
//!
//! ## Example: server
//!
//! ```rust
//! use mcp::{MCPResult, Server, ServerCapabilities, ServerInfo, Tool, ToolCallResponse, ToolHandler, ToolsCapability};
//! use std::sync::Arc;
//!
//! struct Greet;
//!
//! #[async_trait::async_trait]
//! impl ToolHandler for Greet {
//!     async fn call(&self, _arguments: Option<serde_json::Value>) -> MCPResult<ToolCallResponse> {
//!         Ok(ToolCallResponse::text("hello"))
//!     }
//! }
//!
//! # fn build(transport: Box<dyn mcp::Transport>) {
//! let server = Server::serve(
//!     transport,
//!     ServerInfo::new("my-server", "1.0.0"),
//!     ServerCapabilities {
//!         tools: Some(ToolsCapability { list_changed: Some(true) }),
//!         ..Default::default()
//!     },
//! );
//! server
//!     .add_tool(Tool::new("greet", "greets the caller", serde_json::json!({"type": "object"})), Arc::new(Greet))
//!     .unwrap();
//! # }
//! ```
//!
//! ## Example: client
//!
//! ```rust
//! use mcp::{Client, ClientCapabilities, ClientInfo};
//!
//! # async fn connect(transport: Box<dyn mcp::Transport>) -> mcp::MCPResult<()> {
//! let client = Client::connect(
//!     transport,
//!     ClientInfo::new("my-client", "1.0.0"),
//!     ClientCapabilities::default(),
//!     None,
//! )
//! .await?;
//! let _ = client.list_tools().await?;
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub use mcp_schema::*;

pub use mcp_transport::{DuplexTransport, StdioTransport, Transport, TransportError};

pub use mcp_session::{BoxFuture, NotificationHandler, RequestHandler, Session, SessionState, INITIALIZED_NOTIFICATION};

pub use mcp_client::{Client, SamplingHandler};

pub use mcp_server::{PromptHandler, PromptRegistry, ResourceHandler, ResourceRegistry, Server, ToolHandler, ToolRegistry};

#[cfg(feature = "test-support")]
pub use mcp_test_support as test_support;
