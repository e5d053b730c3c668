//! Handler tables: the direction-parameterized registration point for
//! both request and notification handlers.
//!
//! The engine itself does not know or care whether it is running as the
//! client or server half of a session — it just invokes whatever is
//! registered under an inbound message's method name. The client and
//! server feature layers are the ones that register handlers with
//! different names (`sampling/createMessage`, `tools/call`, ...).

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use mcp_schema::MCPResult;
use serde_json::Value;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Handles one inbound request method. Returns the JSON `result` payload
/// on success; an `Err` becomes a JSON-RPC error response (or, for
/// `tools/call`, is translated by the server layer into an in-band
/// `CallToolResult`).
pub trait RequestHandler: Send + Sync {
    fn handle(&self, params: Option<Value>) -> BoxFuture<'_, MCPResult<Value>>;
}

impl<F> RequestHandler for F
where
    F: Fn(Option<Value>) -> BoxFuture<'static, MCPResult<Value>> + Send + Sync,
{
    fn handle(&self, params: Option<Value>) -> BoxFuture<'_, MCPResult<Value>> {
        self(params)
    }
}

/// Handles one inbound notification method. Errors are logged and
/// swallowed — a notification never produces a reply.
pub trait NotificationHandler: Send + Sync {
    fn handle(&self, params: Option<Value>) -> BoxFuture<'_, MCPResult<()>>;
}

impl<F> NotificationHandler for F
where
    F: Fn(Option<Value>) -> BoxFuture<'static, MCPResult<()>> + Send + Sync,
{
    fn handle(&self, params: Option<Value>) -> BoxFuture<'_, MCPResult<()>> {
        self(params)
    }
}

#[derive(Default)]
pub struct HandlerTable {
    requests: RwLock<HashMap<String, Arc<dyn RequestHandler>>>,
    notifications: RwLock<HashMap<String, Vec<Arc<dyn NotificationHandler>>>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_request(&self, method: impl Into<String>, handler: Arc<dyn RequestHandler>) {
        self.requests.write().unwrap().insert(method.into(), handler);
    }

    pub fn request_handler(&self, method: &str) -> Option<Arc<dyn RequestHandler>> {
        self.requests.read().unwrap().get(method).cloned()
    }

    /// Register a notification handler. Multiple handlers may share a
    /// method name; they are invoked sequentially in registration order.
    pub fn register_notification(
        &self,
        method: impl Into<String>,
        handler: Arc<dyn NotificationHandler>,
    ) {
        self.notifications
            .write()
            .unwrap()
            .entry(method.into())
            .or_default()
            .push(handler);
    }

    pub fn notification_handlers(&self, method: &str) -> Vec<Arc<dyn NotificationHandler>> {
        self.notifications
            .read()
            .unwrap()
            .get(method)
            .cloned()
            .unwrap_or_default()
    }
}
