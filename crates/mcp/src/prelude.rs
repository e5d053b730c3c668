//! The `mcp` prelude.
//!
//! `use mcp::prelude::*;` brings the types most programs touch into
//! scope in one line: info/capability types, the core data model, and
//! the `Client`/`Server` entry points.

pub use crate::{
    Client,
    ClientCapabilities,
    ClientInfo,
    GetPromptRequest,
    GetPromptResponse,
    MCPError,
    MCPResult,
    Prompt,
    PromptHandler,
    ReadResourceRequest,
    ReadResourceResponse,
    Resource,
    ResourceHandler,
    SamplingHandler,
    SamplingRequest,
    SamplingResponse,
    Server,
    ServerCapabilities,
    ServerInfo,
    Tool,
    ToolAnnotations,
    ToolCallRequest,
    ToolCallResponse,
    ToolHandler,
    Transport,
};
