//! JSON-RPC 2.0 message envelope: requests, responses, notifications,
//! and the request id used to correlate them.

use crate::protocol::constants::{
    JSONRPC_VERSION, MAX_REQUEST_ID_LENGTH, MAX_REQUEST_ID_NUMBER, MIN_REQUEST_ID_NUMBER,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

pub use crate::error::error_codes;

/// A JSON-RPC request id: either a string or an integer. `null` ids are
/// represented by the absence of an id (a notification), never by this
/// type, per spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl RequestId {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn number(n: i64) -> Self {
        Self::Number(n)
    }

    pub fn validate(&self) -> Result<(), crate::error::ProtocolError> {
        match self {
            RequestId::String(s) => {
                if s.is_empty() {
                    return Err(crate::error::ProtocolError::InvalidRequestId(
                        "request id string cannot be empty".to_string(),
                    ));
                }
                if s.len() > MAX_REQUEST_ID_LENGTH {
                    return Err(crate::error::ProtocolError::InvalidRequestId(format!(
                        "request id string too long (max {MAX_REQUEST_ID_LENGTH} characters)"
                    )));
                }
            }
            RequestId::Number(n) => {
                if *n < MIN_REQUEST_ID_NUMBER || *n > MAX_REQUEST_ID_NUMBER {
                    return Err(crate::error::ProtocolError::InvalidRequestId(format!(
                        "request id number out of range ({MIN_REQUEST_ID_NUMBER} to {MAX_REQUEST_ID_NUMBER})"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{s}"),
            RequestId::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId::String(s)
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<u64> for RequestId {
    fn from(n: u64) -> Self {
        RequestId::Number(n as i64)
    }
}

/// A JSON-RPC 2.0 request. The same shape serves notifications: `id` is
/// `None` and the message carries no reply obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub jsonrpc: Cow<'static, str>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    #[serde(flatten)]
    pub meta: HashMap<String, Value>,
}

impl JsonRpcRequest {
    pub fn new(method: String, params: Option<Value>, id: Option<RequestId>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(JSONRPC_VERSION),
            method,
            params,
            id,
            meta: HashMap::new(),
        }
    }

    pub fn notification(method: String, params: Option<Value>) -> Self {
        Self::new(method, params, None)
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A JSON-RPC 2.0 response: exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc")]
    pub jsonrpc: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<RequestId>,
    #[serde(flatten)]
    pub meta: HashMap<String, Value>,
}

impl JsonRpcResponse {
    pub fn success(result: Value, id: Option<RequestId>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(JSONRPC_VERSION),
            result: Some(result),
            error: None,
            id,
            meta: HashMap::new(),
        }
    }

    pub fn error(error: JsonRpcError, id: Option<RequestId>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(JSONRPC_VERSION),
            result: None,
            error: Some(error),
            id,
            meta: HashMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::PARSE_ERROR, message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message.into())
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        let method = method.into();
        Self::new(error_codes::METHOD_NOT_FOUND, format!("method not found: {method}"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message.into())
    }
}

/// A decoded JSON-RPC message: a notification is a request with no id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Response(JsonRpcResponse),
    Notification(JsonRpcRequest),
}

impl JsonRpcMessage {
    pub fn get_id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcMessage::Request(req) => req.id.as_ref(),
            JsonRpcMessage::Response(resp) => resp.id.as_ref(),
            JsonRpcMessage::Notification(_) => None,
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, JsonRpcMessage::Notification(_))
    }
}

/// Reject a message that violates the JSON-RPC 2.0 envelope rules before
/// it reaches dispatch: wrong version tag, empty method name, a response
/// carrying both or neither of `result`/`error`, or a notification that
/// smuggled an id.
pub fn validate_jsonrpc_message(message: &JsonRpcMessage) -> Result<(), crate::error::ProtocolError> {
    match message {
        JsonRpcMessage::Request(request) => {
            if request.jsonrpc != JSONRPC_VERSION {
                return Err(crate::error::ProtocolError::InvalidVersion(format!(
                    "expected JSON-RPC version {}, got {}",
                    JSONRPC_VERSION, request.jsonrpc
                )));
            }
            if request.method.is_empty() {
                return Err(crate::error::ProtocolError::InvalidRequest(
                    "method name cannot be empty".to_string(),
                ));
            }
            if let Some(ref id) = request.id {
                id.validate()?;
            }
        }
        JsonRpcMessage::Response(response) => {
            if response.jsonrpc != JSONRPC_VERSION {
                return Err(crate::error::ProtocolError::InvalidVersion(format!(
                    "expected JSON-RPC version {}, got {}",
                    JSONRPC_VERSION, response.jsonrpc
                )));
            }
            if response.result.is_some() && response.error.is_some() {
                return Err(crate::error::ProtocolError::InvalidResponse(
                    "response cannot have both result and error".to_string(),
                ));
            }
            if response.result.is_none() && response.error.is_none() {
                return Err(crate::error::ProtocolError::InvalidResponse(
                    "response must have either result or error".to_string(),
                ));
            }
            if let Some(ref id) = response.id {
                id.validate()?;
            }
        }
        JsonRpcMessage::Notification(notification) => {
            if notification.jsonrpc != JSONRPC_VERSION {
                return Err(crate::error::ProtocolError::InvalidVersion(format!(
                    "expected JSON-RPC version {}, got {}",
                    JSONRPC_VERSION, notification.jsonrpc
                )));
            }
            if notification.method.is_empty() {
                return Err(crate::error::ProtocolError::InvalidRequest(
                    "method name cannot be empty".to_string(),
                ));
            }
            if notification.id.is_some() {
                return Err(crate::error::ProtocolError::InvalidRequest(
                    "notification cannot carry an id".to_string(),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_round_trips_through_json() {
        let request = JsonRpcRequest::new(
            "tools/call".to_string(),
            Some(serde_json::json!({"name": "echo"})),
            Some(RequestId::number(1)),
        );
        let serialized = serde_json::to_string(&request).unwrap();
        let deserialized: JsonRpcRequest = serde_json::from_str(&serialized).unwrap();
        assert_eq!(request, deserialized);
    }

    #[test]
    fn notification_has_no_id() {
        let notification = JsonRpcRequest::notification(
            "notifications/initialized".to_string(),
            None,
        );
        assert!(notification.is_notification());
    }

    #[test]
    fn response_carries_exactly_one_of_result_or_error() {
        let ok = JsonRpcResponse::success(serde_json::json!({}), Some(RequestId::number(1)));
        assert!(ok.is_success());

        let err = JsonRpcResponse::error(
            JsonRpcError::method_not_found("tools/unknown"),
            Some(RequestId::number(1)),
        );
        assert!(!err.is_success());
    }

    #[test]
    fn request_id_validation_rejects_empty_string_and_out_of_range_number() {
        assert!(RequestId::string("valid").validate().is_ok());
        assert!(RequestId::string("").validate().is_err());
        assert!(RequestId::number(9_999_999_999).validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_messages() {
        let empty_method = JsonRpcMessage::Request(JsonRpcRequest::new(
            String::new(),
            None,
            Some(RequestId::number(1)),
        ));
        assert!(validate_jsonrpc_message(&empty_method).is_err());

        let both = JsonRpcMessage::Response(JsonRpcResponse {
            jsonrpc: Cow::Borrowed(JSONRPC_VERSION),
            result: Some(serde_json::json!({})),
            error: Some(JsonRpcError::internal_error("boom")),
            id: Some(RequestId::number(1)),
            meta: HashMap::new(),
        });
        assert!(validate_jsonrpc_message(&both).is_err());
    }
}
