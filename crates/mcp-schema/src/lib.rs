//! Wire-level schema for the Model Context Protocol: the JSON-RPC 2.0
//! envelope, the `initialize` handshake and capability negotiation, and
//! every request/response/notification payload for the `tools`,
//! `resources`, `prompts`, `sampling`, and `roots` feature areas.
//!
//! This crate has no transport, dispatch, or session-state logic of its
//! own — see `mcp-transport` and `mcp-session` for those. It only
//! defines the shapes that cross the wire and the local validation
//! (JSON Schema checks, JSON-RPC envelope checks, capability gates)
//! that can be performed without I/O.
//!
//! ## Example
//!
//! ```rust
//! use mcp_schema::{InitializeRequest, Tool, ToolCallRequest};
//!
//! let init_request = InitializeRequest {
//!     protocol_version: "2025-06-18".to_string(),
//!     capabilities: Default::default(),
//!     client_info: Default::default(),
//! };
//!
//! let tool = Tool::new("greet", "Greet a person by name", serde_json::json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! }));
//!
//! let call = ToolCallRequest {
//!     name: "greet".to_string(),
//!     arguments: Some(serde_json::json!({ "name": "Alice" })),
//! };
//! # let _ = (init_request, tool, call);
//! ```

pub mod error;
pub mod protocol;
pub mod schema;
pub mod types;

pub use error::{MCPError, MCPResult};

pub use protocol::{
    error_codes, is_supported_version, negotiate_version,
    ClientCapabilities, CURRENT_VERSION, InitializeRequest, InitializeResponse,
    InitializedNotification, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse,
    LoggingCapability, PromptsCapability, RequestId, ResourcesCapability, RootsCapability,
    SamplingCapability, ServerCapabilities, SUPPORTED_VERSIONS, ToolsCapability,
    validate_jsonrpc_message,
};

pub use types::{
    ClientInfo, ContentBlock, CreateMessageRequest, CreateMessageResponse, EmbeddedResource,
    GetPromptRequest, GetPromptResponse,
    Implementation, IncludeContext, ListPromptsRequest, ListPromptsResponse,
    ListResourceTemplatesRequest, ListResourceTemplatesResponse, ListResourcesRequest,
    ListResourcesResponse, ListRootsRequest, ListRootsResponse, ListToolsRequest,
    ListToolsResponse, LogLevelSetRequest, LogLevelSetResponse, LoggingLevel,
    LoggingMessageNotification, ModelHint, ModelPreferences, PingRequest, PingResponse, Prompt,
    PromptArgument, PromptMessage, PromptMessages, PromptsListChangedNotification,
    ReadResourceRequest, ReadResourceResponse, Resource, ResourceContent,
    ResourceTemplate, ResourceUpdatedNotification, ResourcesListChangedNotification, Role, Root,
    RootListChangedNotification, SamplingMessage, SamplingRequest, SamplingResponse, ServerInfo,
    StopReason, SubscribeRequest, SubscribeResponse, Tool, ToolAnnotations, ToolCallRequest,
    ToolCallResponse, ToolsListChangedNotification, UnsubscribeRequest, UnsubscribeResponse,
};

pub use schema::{generate_schema_for, validate_against_schema, McpSchema};
