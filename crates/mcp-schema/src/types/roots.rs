//! Types for the `roots` capability: the filesystem/workspace
//! boundaries a client exposes to a server.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A boundary a client is willing to let a server operate within.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Root {
    pub uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Root {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListRootsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRootsResponse {
    pub roots: Vec<Root>,
}

/// Sent by the client when the set of exposed roots changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootListChangedNotification {
    pub roots: Vec<Root>,
}
