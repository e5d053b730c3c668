//! Wire messages for the `initialize` handshake.
//!
//! The session state machine these messages drive lives in the session
//! engine, not here — this module only carries the three wire shapes
//! exchanged during the handshake.

use crate::types::{ClientCapabilities, ClientInfo, ServerCapabilities, ServerInfo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    #[serde(rename = "clientInfo")]
    pub client_info: ClientInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Marker notification the client emits once after observing a
/// matching-version `InitializeResponse`. Carries no parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitializedNotification {}
