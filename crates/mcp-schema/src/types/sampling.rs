//! Types for the `sampling/createMessage` operation: a server asking
//! the client to run an LLM completion on its behalf.

use crate::types::content::{ContentBlock, Role};
use serde::{Deserialize, Serialize};

pub type CreateMessageRequest = SamplingRequest;
pub type CreateMessageResponse = SamplingResponse;

/// Which servers' context the client should fold into the completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeContext {
    None,
    ThisServer,
    AllServers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    EndTurn,
    StopSequence,
    MaxTokens,
    Other,
}

/// A hint toward a preferred model family, not a binding selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ModelHint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Priorities the client may use to pick among models it has access to.
/// Advisory — the client is free to ignore any of it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<ModelHint>>,

    #[serde(rename = "costPriority", skip_serializing_if = "Option::is_none")]
    pub cost_priority: Option<f64>,

    #[serde(rename = "speedPriority", skip_serializing_if = "Option::is_none")]
    pub speed_priority: Option<f64>,

    #[serde(rename = "intelligencePriority", skip_serializing_if = "Option::is_none")]
    pub intelligence_priority: Option<f64>,
}

impl ModelPreferences {
    /// Priorities must each fall in `0.0..=1.0` when present.
    pub fn validate(&self) -> Result<(), String> {
        for (label, value) in [
            ("costPriority", self.cost_priority),
            ("speedPriority", self.speed_priority),
            ("intelligencePriority", self.intelligence_priority),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("{label} must be between 0.0 and 1.0, got {v}"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingMessage {
    pub role: Role,
    pub content: ContentBlock,
}

impl SamplingMessage {
    pub fn new(role: Role, content: ContentBlock) -> Self {
        Self { role, content }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingRequest {
    pub messages: Vec<SamplingMessage>,

    #[serde(rename = "modelPreferences", skip_serializing_if = "Option::is_none")]
    pub model_preferences: Option<ModelPreferences>,

    #[serde(rename = "systemPrompt", skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(rename = "includeContext", skip_serializing_if = "Option::is_none")]
    pub include_context: Option<IncludeContext>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(rename = "maxTokens")]
    pub max_tokens: u32,

    #[serde(rename = "stopSequences", skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl SamplingRequest {
    pub fn new(messages: Vec<SamplingMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            model_preferences: None,
            system_prompt: None,
            include_context: None,
            temperature: None,
            max_tokens,
            stop_sequences: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.messages.is_empty() {
            return Err("sampling request must include at least one message".to_string());
        }
        if self.max_tokens == 0 {
            return Err("maxTokens must be greater than zero".to_string());
        }
        if let Some(ref preferences) = self.model_preferences {
            preferences.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingResponse {
    pub role: Role,
    pub content: ContentBlock,
    pub model: String,

    #[serde(rename = "stopReason", skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

impl SamplingResponse {
    pub fn new(role: Role, content: ContentBlock, model: impl Into<String>) -> Self {
        Self {
            role,
            content,
            model: model.into(),
            stop_reason: None,
        }
    }

    pub fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = Some(reason);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_request_rejects_empty_messages() {
        let request = SamplingRequest::new(vec![], 100);
        assert!(request.validate().is_err());
    }

    #[test]
    fn sampling_request_rejects_zero_max_tokens() {
        let request = SamplingRequest::new(
            vec![SamplingMessage::new(Role::User, ContentBlock::text("hi"))],
            0,
        );
        assert!(request.validate().is_err());
    }

    #[test]
    fn model_preferences_reject_out_of_range_priority() {
        let preferences = ModelPreferences {
            cost_priority: Some(1.5),
            ..Default::default()
        };
        assert!(preferences.validate().is_err());
    }

    #[test]
    fn stop_reason_serializes_camel_case() {
        let json = serde_json::to_value(StopReason::MaxTokens).unwrap();
        assert_eq!(json, "maxTokens");
    }

    #[test]
    fn include_context_serializes_lowercase() {
        let json = serde_json::to_value(IncludeContext::ThisServer).unwrap();
        assert_eq!(json, "thisserver");
    }
}
