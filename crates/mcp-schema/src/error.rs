//! Error taxonomy shared by every layer of the session engine.
//!
//! `MCPError` is the canonical error type returned from schema, session,
//! client, and server APIs. Each variant corresponds to one of the error
//! kinds in the protocol design: a transport failure, a malformed or
//! unsupported JSON-RPC message, a capability gate that tripped locally,
//! an initialization problem, a timed-out request, a session that has
//! moved to `Closed`, or an application handler that panicked/returned
//! an error.

use thiserror::Error;

pub type MCPResult<T> = Result<T, MCPError>;

#[derive(Debug, Error)]
pub enum MCPError {
    /// Wire I/O failed; the session that owns this request is closing.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Malformed JSON-RPC, unknown method, or invalid params.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A capability-gated operation was attempted without the peer
    /// having advertised the capability. Raised before any wire traffic.
    #[error("capability not available: {0}")]
    Capability(String),

    /// Protocol version mismatch, or an operation attempted before
    /// (or outside of) the required lifecycle state.
    #[error("initialization error: {0}")]
    Initialization(String),

    /// The outbound request's deadline elapsed before a response arrived.
    #[error("request timed out")]
    Timeout,

    /// The session transitioned to `Closed` while this operation was
    /// in flight, or after it had already closed.
    #[error("session closed")]
    SessionClosed,

    /// An application-supplied handler returned an error. Tool-call
    /// handlers convert this into an in-band `CallToolResult`; every
    /// other inbound request converts it into a JSON-RPC `InternalError`.
    #[error("handler error: {0}")]
    Handler(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl MCPError {
    pub fn capability(capability: impl Into<String>) -> Self {
        Self::Capability(capability.into())
    }

    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::Protocol(ProtocolError::InvalidParams(msg.into()))
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::Protocol(ProtocolError::MethodNotFound(method.into()))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Protocol(ProtocolError::NotFound(msg.into()))
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::Protocol(ProtocolError::InvalidRequest(msg.into()))
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::Protocol(ProtocolError::InvalidResponse(msg.into()))
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(TransportError::ConnectionFailed(msg.into()))
    }

    /// `true` for error kinds the protocol design calls "fatal to the
    /// session" (initialization failures and transport failures).
    pub fn is_fatal(&self) -> bool {
        matches!(self, MCPError::Initialization(_) | MCPError::Transport(_))
    }
}

impl From<crate::protocol::jsonrpc::JsonRpcError> for MCPError {
    fn from(err: crate::protocol::jsonrpc::JsonRpcError) -> Self {
        Self::Protocol(ProtocolError::InvalidResponse(err.message))
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON-RPC version: {0}")]
    InvalidVersion(String),

    #[error("invalid request id: {0}")]
    InvalidRequestId(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Standard JSON-RPC 2.0 error codes, plus the application-defined range
/// the core uses for capability and initialization failures.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    pub const INITIALIZATION_REQUIRED: i32 = -32000;
    pub const CAPABILITY_NOT_SUPPORTED: i32 = -32001;
    pub const RESOURCE_NOT_FOUND: i32 = -32002;
    pub const TOOL_NOT_FOUND: i32 = -32003;
    pub const SESSION_CLOSED: i32 = -32004;
    pub const REQUEST_TIMEOUT: i32 = -32005;
}

impl From<MCPError> for crate::protocol::jsonrpc::JsonRpcError {
    fn from(err: MCPError) -> Self {
        use crate::protocol::jsonrpc::JsonRpcError;

        match err {
            MCPError::Protocol(ProtocolError::InvalidVersion(v)) => {
                JsonRpcError::new(error_codes::INVALID_REQUEST, format!("invalid JSON-RPC version: {v}"))
            }
            MCPError::Protocol(ProtocolError::InvalidRequestId(id)) => {
                JsonRpcError::new(error_codes::INVALID_REQUEST, format!("invalid request id: {id}"))
            }
            MCPError::Protocol(ProtocolError::MethodNotFound(method)) => {
                JsonRpcError::new(error_codes::METHOD_NOT_FOUND, format!("method not found: {method}"))
            }
            MCPError::Protocol(ProtocolError::InvalidParams(msg)) => {
                JsonRpcError::new(error_codes::INVALID_PARAMS, format!("invalid params: {msg}"))
            }
            MCPError::Protocol(ProtocolError::InvalidRequest(msg)) => {
                JsonRpcError::new(error_codes::INVALID_REQUEST, format!("invalid request: {msg}"))
            }
            MCPError::Protocol(ProtocolError::InvalidResponse(msg)) => {
                JsonRpcError::new(error_codes::INVALID_REQUEST, format!("invalid response: {msg}"))
            }
            MCPError::Protocol(ProtocolError::NotFound(msg)) => {
                JsonRpcError::new(error_codes::RESOURCE_NOT_FOUND, format!("not found: {msg}"))
            }
            MCPError::Capability(cap) => {
                JsonRpcError::new(error_codes::CAPABILITY_NOT_SUPPORTED, cap)
            }
            MCPError::Initialization(msg) => {
                JsonRpcError::new(error_codes::INITIALIZATION_REQUIRED, msg)
            }
            MCPError::Timeout => {
                JsonRpcError::new(error_codes::REQUEST_TIMEOUT, "request timeout".to_string())
            }
            MCPError::SessionClosed => {
                JsonRpcError::new(error_codes::SESSION_CLOSED, "session closed".to_string())
            }
            MCPError::Handler(msg) => JsonRpcError::new(error_codes::INTERNAL_ERROR, msg),
            MCPError::Transport(TransportError::ConnectionFailed(msg)) => {
                JsonRpcError::new(error_codes::INTERNAL_ERROR, format!("connection failed: {msg}"))
            }
            MCPError::Transport(TransportError::ConnectionClosed) => {
                JsonRpcError::new(error_codes::INTERNAL_ERROR, "connection closed".to_string())
            }
            MCPError::Transport(TransportError::SendFailed(msg)) => {
                JsonRpcError::new(error_codes::INTERNAL_ERROR, format!("send failed: {msg}"))
            }
            MCPError::Transport(TransportError::ReceiveFailed(msg)) => {
                JsonRpcError::new(error_codes::INTERNAL_ERROR, format!("receive failed: {msg}"))
            }
            MCPError::Serialization(e) => {
                JsonRpcError::new(error_codes::PARSE_ERROR, format!("serialization error: {e}"))
            }
            MCPError::Io(e) => JsonRpcError::new(error_codes::INTERNAL_ERROR, format!("io error: {e}")),
            MCPError::Other(e) => JsonRpcError::new(error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }
}
