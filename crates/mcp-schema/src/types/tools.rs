//! Types for the `tools/list` and `tools/call` operations.

use crate::error::{MCPError, MCPResult};
use crate::types::content::ContentBlock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hints about a tool's behavior. Advisory only — a client must not
/// rely on these for security decisions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "readOnlyHint", skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,

    #[serde(rename = "destructiveHint", skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,

    #[serde(rename = "idempotentHint", skip_serializing_if = "Option::is_none")]
    pub idempotent_hint: Option<bool>,

    #[serde(rename = "openWorldHint", skip_serializing_if = "Option::is_none")]
    pub open_world_hint: Option<bool>,
}

impl ToolAnnotations {
    pub fn read_only() -> Self {
        Self {
            read_only_hint: Some(true),
            ..Default::default()
        }
    }

    pub fn destructive() -> Self {
        Self {
            read_only_hint: Some(false),
            destructive_hint: Some(true),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_idempotent_hint(mut self, idempotent: bool) -> Self {
        self.idempotent_hint = Some(idempotent);
        self
    }
}

/// A tool the server exposes, along with its JSON Schema input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,

    pub description: String,

    #[serde(rename = "inputSchema")]
    pub input_schema: Value,

    #[serde(rename = "outputSchema", skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema: None,
            annotations: None,
        }
    }

    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Validate the tool's own definition: non-empty name, non-reserved
    /// name, non-empty description, and an object-shaped input schema.
    pub fn validate(&self) -> MCPResult<()> {
        if self.name.is_empty() {
            return Err(MCPError::invalid_params("tool name cannot be empty"));
        }
        if self.name.starts_with("rpc.") {
            return Err(MCPError::invalid_params(format!(
                "tool name '{}' is reserved",
                self.name
            )));
        }
        if self.description.is_empty() {
            return Err(MCPError::invalid_params("tool description cannot be empty"));
        }
        if !self.input_schema.is_object() {
            return Err(MCPError::invalid_params("input schema must be a JSON object"));
        }
        if let Some(ref output_schema) = self.output_schema {
            if !output_schema.is_object() {
                return Err(MCPError::invalid_params("output schema must be a JSON object"));
            }
        }
        Ok(())
    }

    /// Validate call arguments against this tool's input schema.
    pub fn validate_arguments(&self, arguments: &Value) -> MCPResult<()> {
        crate::schema::validate_against_schema(arguments, &self.input_schema)
            .map_err(|e| MCPError::invalid_params(format!("tool argument validation failed: {e}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListToolsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    pub tools: Vec<Tool>,

    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

/// Result of a `tools/call`. A handler error is reported here with
/// `isError: true`, in-band — it is never a JSON-RPC protocol error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResponse {
    pub content: Vec<ContentBlock>,

    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolCallResponse {
    pub fn success(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            is_error: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::success(vec![ContentBlock::text(text)])
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(message)],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}
