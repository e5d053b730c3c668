//! JSON-RPC 2.0 framing, the `initialize` handshake messages, and
//! capability negotiation for the Model Context Protocol.
//!
//! `jsonrpc` defines the wire-level message envelope shared by every
//! request, response, and notification. `lifecycle` defines the
//! `initialize` handshake messages. `capabilities` defines the two
//! disjoint capability sets peers advertise during that handshake.
//! `version` carries the supported protocol version list.

pub mod capabilities;
pub mod constants;
pub mod jsonrpc;
pub mod lifecycle;
pub mod version;

pub use capabilities::{
    ClientCapabilities, LoggingCapability, PromptsCapability, ResourcesCapability,
    RootsCapability, SamplingCapability, ServerCapabilities, ToolsCapability,
};
pub use jsonrpc::{
    error_codes, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse, RequestId,
    validate_jsonrpc_message,
};
pub use lifecycle::{InitializeRequest, InitializeResponse, InitializedNotification};
pub use version::{is_supported_version, negotiate_version, CURRENT_VERSION, SUPPORTED_VERSIONS};
