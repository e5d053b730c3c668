//! Types for the `resources/*` operations: listing, reading, templates,
//! and subscription to change notifications.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub uri: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Resource {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: None,
            mime_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A parameterized resource, expressed as an RFC 6570 URI template. The
/// server is responsible for expanding it; the core only carries the
/// wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTemplate {
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ResourceTemplate {
    pub fn new(uri_template: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri_template: uri_template.into(),
            name: name.into(),
            description: None,
            mime_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReadResourceRequest {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceResponse {
    pub contents: Vec<ResourceContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceContent {
    #[serde(rename = "text")]
    Text {
        uri: String,
        text: String,
        #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },

    #[serde(rename = "blob")]
    Blob {
        uri: String,
        blob: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl ResourceContent {
    pub fn text(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text {
            uri: uri.into(),
            text: text.into(),
            mime_type: Some("text/plain".to_string()),
        }
    }

    pub fn json(uri: impl Into<String>, value: &Value) -> Self {
        Self::Text {
            uri: uri.into(),
            text: serde_json::to_string_pretty(value).unwrap_or_default(),
            mime_type: Some("application/json".to_string()),
        }
    }

    pub fn blob(uri: impl Into<String>, blob: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Blob {
            uri: uri.into(),
            blob: blob.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListResourcesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourcesResponse {
    pub resources: Vec<Resource>,

    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListResourceTemplatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourceTemplatesResponse {
    #[serde(rename = "resourceTemplates")]
    pub resource_templates: Vec<ResourceTemplate>,

    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeResponse {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnsubscribeResponse {}

/// Sent by the server for any resource a client has subscribed to once
/// its content changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceUpdatedNotification {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_template_round_trips_camel_case_fields() {
        let template = ResourceTemplate::new("file:///{path}", "file");
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["uriTemplate"], "file:///{path}");
    }

    #[test]
    fn resource_content_text_defaults_to_text_plain() {
        let content = ResourceContent::text("file:///a", "hello");
        match content {
            ResourceContent::Text { mime_type, .. } => {
                assert_eq!(mime_type, Some("text/plain".to_string()));
            }
            _ => panic!("expected Text variant"),
        }
    }

    #[test]
    fn resource_content_json_serializes_pretty_text() {
        let content = ResourceContent::json("file:///a", &serde_json::json!({"k": "v"}));
        match content {
            ResourceContent::Text { text, mime_type, .. } => {
                assert!(text.contains("k"));
                assert_eq!(mime_type, Some("application/json".to_string()));
            }
            _ => panic!("expected Text variant"),
        }
    }

    #[test]
    fn subscribe_response_serializes_as_empty_object() {
        let json = serde_json::to_value(SubscribeResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
