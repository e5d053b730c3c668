//! Server-to-client change notifications, the logging level/message
//! pair, and the bidirectional `ping` request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsListChangedNotification {}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourcesListChangedNotification {}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptsListChangedNotification {}

/// RFC 5424 severity levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingMessageNotification {
    pub level: LoggingLevel,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
}

impl LoggingMessageNotification {
    pub fn new(level: LoggingLevel, data: Value) -> Self {
        Self {
            level,
            data,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }
}

/// `logging/setLevel` request: the minimum level the client wants to
/// receive `notifications/message` for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLevelSetRequest {
    pub level: LoggingLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogLevelSetResponse {}

/// Bidirectional connection-health check. Either peer may send it in
/// any state except `Closed`; the receiver auto-responds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl PingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl PingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echo(request: &PingRequest) -> Self {
        Self {
            data: request.data.clone(),
        }
    }
}
