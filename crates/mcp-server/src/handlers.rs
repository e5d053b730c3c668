//! Handler traits for server-registered tools, resources, and prompts.
//!
//! Each registry entry pairs a declarative descriptor (`Tool`,
//! `Resource`, `Prompt`) with one of these handler objects. The engine
//! dispatches into the registry, not directly into these traits — see
//! [`crate::server::Server`].

use async_trait::async_trait;
use mcp_schema::{GetPromptResponse, MCPResult, ToolCallResponse};
use serde_json::Value;

/// Handles invocations of one registered tool. A returned `Err` is
/// caught by the server and converted into an in-band
/// `ToolCallResponse::error` — it never becomes a JSON-RPC error.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Option<Value>) -> MCPResult<ToolCallResponse>;
}

/// Handles reads of one registered resource.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    async fn read(&self) -> MCPResult<mcp_schema::ReadResourceResponse>;
}

/// Handles retrieval of one registered prompt, rendered with the
/// caller-supplied arguments.
#[async_trait]
pub trait PromptHandler: Send + Sync {
    async fn get(&self, arguments: Option<Value>) -> MCPResult<GetPromptResponse>;
}
