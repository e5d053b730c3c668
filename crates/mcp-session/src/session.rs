//! The symmetric session engine: one implementation drives both the
//! client and server side of a connection. Which messages a side sends
//! and which handlers it registers is entirely up to the feature layer
//! built on top (`mcp-client`, `mcp-server`); this engine only knows how
//! to correlate requests with responses, dispatch inbound traffic, and
//! enforce the lifecycle state machine.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use mcp_schema::protocol::{
    validate_jsonrpc_message, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse,
    RequestId,
};
use mcp_schema::{MCPError, MCPResult};
use mcp_transport::{Transport, TransportError};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::handlers::{HandlerTable, NotificationHandler, RequestHandler};
use crate::pending::PendingRequestTable;
use crate::state::SessionState;

/// The `notifications/initialized` method name, sent by the client once
/// it has processed the `initialize` response and observed by the
/// server to complete the handshake.
pub const INITIALIZED_NOTIFICATION: &str = "notifications/initialized";
const INITIALIZE_METHOD: &str = "initialize";
const PING_METHOD: &str = "ping";

struct SessionInner {
    state: RwLock<SessionState>,
    next_id: AtomicI64,
    pending: PendingRequestTable,
    handlers: HandlerTable,
    outbound: Mutex<Option<mpsc::UnboundedSender<JsonRpcMessage>>>,
    closed_rx: watch::Receiver<bool>,
}

impl SessionInner {
    fn state(&self) -> SessionState {
        *self.state.read().unwrap()
    }

    fn transition(&self, next: SessionState) -> MCPResult<()> {
        let mut state = self.state.write().unwrap();
        state.validate_transition(next)?;
        *state = next;
        Ok(())
    }

    /// Forced terminal transition taken when the transport loop ends,
    /// whether via `Session::close` or an unexpected disconnect. Unlike
    /// `transition`, this never fails: it is always valid to arrive at
    /// `Closed` from wherever the session currently is.
    fn finish_closing(&self) {
        *self.state.write().unwrap() = SessionState::Closed;
        self.pending.fail_all(|| Err(MCPError::SessionClosed));
    }

    fn send_message(&self, message: JsonRpcMessage) -> MCPResult<()> {
        match self.outbound.lock().unwrap().as_ref() {
            Some(tx) => tx.send(message).map_err(|_| MCPError::SessionClosed),
            None => Err(MCPError::SessionClosed),
        }
    }

    /// Guard applied to every caller-initiated request: nothing but
    /// `initialize`/`ping` may leave the session before the handshake
    /// has reached `Operating`. This alone satisfies the rule that a
    /// server must not emit a server-originated request until it has
    /// observed `notifications/initialized` — it simply can't emit
    /// *anything* before `Operating`, and `Operating` is only reached
    /// after that notification has been sent or seen.
    fn guard_outbound_request(&self, method: &str) -> MCPResult<()> {
        match self.state() {
            SessionState::Operating => Ok(()),
            SessionState::Uninitialized | SessionState::Initializing
                if method == INITIALIZE_METHOD || method == PING_METHOD =>
            {
                Ok(())
            }
            SessionState::Closing | SessionState::Closed => Err(MCPError::SessionClosed),
            state => Err(MCPError::initialization(format!(
                "cannot send '{method}' request while the session is {state:?}"
            ))),
        }
    }

    fn guard_outbound_notification(&self, method: &str) -> MCPResult<()> {
        match self.state() {
            SessionState::Operating => Ok(()),
            SessionState::Initializing if method == INITIALIZED_NOTIFICATION => Ok(()),
            SessionState::Closing | SessionState::Closed => Err(MCPError::SessionClosed),
            state => Err(MCPError::initialization(format!(
                "cannot send '{method}' notification while the session is {state:?}"
            ))),
        }
    }

    fn observe_initialized(&self) {
        if self.state() == SessionState::Initializing {
            let _ = self.transition(SessionState::Operating);
        }
    }
}

/// A handle to a running session. Cheap to clone; every clone shares the
/// same underlying engine and transport driver task.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Start driving `transport` in a background task and return a
    /// handle to the resulting session, initially `Uninitialized`.
    pub fn spawn(transport: Box<dyn Transport>) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (closed_tx, closed_rx) = watch::channel(false);

        let inner = Arc::new(SessionInner {
            state: RwLock::new(SessionState::Uninitialized),
            next_id: AtomicI64::new(1),
            pending: PendingRequestTable::new(),
            handlers: HandlerTable::new(),
            outbound: Mutex::new(Some(outbound_tx)),
            closed_rx,
        });

        tokio::spawn(drive(transport, outbound_rx, Arc::clone(&inner), closed_tx));

        Self { inner }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state()
    }

    /// Register the handler invoked for inbound requests named `method`.
    /// Replaces any handler previously registered for the same method.
    pub fn register_request_handler(&self, method: impl Into<String>, handler: Arc<dyn RequestHandler>) {
        self.inner.handlers.register_request(method, handler);
    }

    /// Register an additional handler invoked for inbound notifications
    /// named `method`. Handlers for the same method run sequentially in
    /// registration order; a handler error is logged and does not stop
    /// the rest from running.
    pub fn register_notification_handler(
        &self,
        method: impl Into<String>,
        handler: Arc<dyn NotificationHandler>,
    ) {
        self.inner.handlers.register_notification(method, handler);
    }

    /// Send a request and await its response, completing with
    /// [`MCPError::Timeout`] if `timeout` elapses first.
    pub async fn request(
        &self,
        method: impl Into<String>,
        params: Option<Value>,
        timeout: Option<Duration>,
    ) -> MCPResult<Value> {
        let method = method.into();

        if method == INITIALIZE_METHOD {
            match self.inner.state() {
                SessionState::Uninitialized => self.inner.transition(SessionState::Initializing)?,
                SessionState::Initializing => {}
                _ => return Err(MCPError::initialization("initialize has already been sent")),
            }
        }
        self.inner.guard_outbound_request(&method)?;

        let id = RequestId::number(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let (tx, rx) = oneshot::channel();
        if !self.inner.pending.insert(id.clone(), tx) {
            warn!(%id, "duplicate request id generated, dropping request");
            return Err(MCPError::invalid_request("duplicate request id"));
        }

        let request = JsonRpcRequest::new(method, params, Some(id.clone()));
        if let Err(err) = self.inner.send_message(JsonRpcMessage::Request(request)) {
            self.inner.pending.remove(&id);
            return Err(err);
        }

        match timeout {
            Some(duration) => match tokio::time::timeout(duration, rx).await {
                Ok(Ok(result)) => result,
                Ok(Err(_)) => Err(MCPError::SessionClosed),
                Err(_) => {
                    self.inner.pending.remove(&id);
                    Err(MCPError::Timeout)
                }
            },
            None => rx.await.unwrap_or(Err(MCPError::SessionClosed)),
        }
    }

    /// Send a fire-and-forget notification. The one exception to the
    /// "no traffic before `Operating`" rule is
    /// [`INITIALIZED_NOTIFICATION`] itself, sent while `Initializing`.
    pub fn notify(&self, method: impl Into<String>, params: Option<Value>) -> MCPResult<()> {
        let method = method.into();
        self.inner.guard_outbound_notification(&method)?;

        let notification = JsonRpcRequest::notification(method.clone(), params);
        self.inner.send_message(JsonRpcMessage::Notification(notification))?;

        if method == INITIALIZED_NOTIFICATION && self.inner.state() == SessionState::Initializing {
            self.inner.transition(SessionState::Operating)?;
        }
        Ok(())
    }

    /// Close the session. Idempotent: a second call while already
    /// `Closing`/`Closed` just waits for (or confirms) completion.
    /// Every pending request completes with [`MCPError::SessionClosed`]
    /// exactly once.
    pub async fn close(&self) -> MCPResult<()> {
        {
            let mut state = self.inner.state.write().unwrap();
            if *state == SessionState::Closed {
                return Ok(());
            }
            if *state != SessionState::Closing {
                *state = SessionState::Closing;
            }
        }

        // Dropping our sender is what tells the driver task to stop:
        // its next `outbound_rx.recv()` resolves to `None`.
        self.inner.outbound.lock().unwrap().take();

        let mut closed_rx = self.inner.closed_rx.clone();
        if *closed_rx.borrow() {
            return Ok(());
        }
        let _ = closed_rx.changed().await;
        Ok(())
    }
}

async fn drive(
    mut transport: Box<dyn Transport>,
    mut outbound_rx: mpsc::UnboundedReceiver<JsonRpcMessage>,
    inner: Arc<SessionInner>,
    closed_tx: watch::Sender<bool>,
) {
    loop {
        tokio::select! {
            outgoing = outbound_rx.recv() => {
                match outgoing {
                    Some(message) => {
                        if let Err(err) = transport.send(message).await {
                            warn!(error = %err, "transport send failed, ending session");
                            break;
                        }
                    }
                    None => break,
                }
            }
            incoming = transport.receive() => {
                match incoming {
                    Ok(message) => dispatch(Arc::clone(&inner), message),
                    Err(TransportError::Closed) => {
                        debug!("transport closed, ending session");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "transport receive failed, ending session");
                        break;
                    }
                }
            }
        }
    }

    let _ = transport.close().await;
    inner.finish_closing();
    let _ = closed_tx.send(true);
}

/// Classify and route one inbound message. Per the dispatch algorithm:
/// a message carrying both an id and a method is a request; a message
/// carrying an id but no method is a response; a message with no id is
/// a notification, dispatched to every registered handler in order.
fn dispatch(inner: Arc<SessionInner>, message: JsonRpcMessage) {
    if let Err(err) = validate_jsonrpc_message(&message) {
        warn!(error = %err, "dropping malformed inbound message");
        return;
    }

    match message {
        JsonRpcMessage::Response(response) => {
            let Some(id) = response.id else {
                warn!("dropping response with no id");
                return;
            };
            let result = match response.error {
                Some(error) => Err(MCPError::from(error)),
                None => Ok(response.result.unwrap_or(Value::Null)),
            };
            if !inner.pending.complete(&id, result) {
                debug!(%id, "dropping response for an unknown or already-resolved request");
            }
        }
        JsonRpcMessage::Request(request) | JsonRpcMessage::Notification(request) => {
            match request.id.clone() {
                Some(id) => dispatch_request(inner, request, id),
                None => dispatch_notification(inner, request),
            }
        }
    }
}

fn dispatch_request(inner: Arc<SessionInner>, request: JsonRpcRequest, id: RequestId) {
    if request.method == INITIALIZE_METHOD && inner.state() == SessionState::Uninitialized {
        let _ = inner.transition(SessionState::Initializing);
    }

    let handler = inner.handlers.request_handler(&request.method);
    tokio::spawn(async move {
        let response = match handler {
            Some(handler) => build_response(handler.handle(request.params).await, id),
            None => JsonRpcResponse::error(
                JsonRpcError::method_not_found(request.method.clone()),
                Some(id),
            ),
        };
        if let Err(err) = inner.send_message(JsonRpcMessage::Response(response)) {
            warn!(error = %err, "failed to send response");
        }
    });
}

fn build_response(result: MCPResult<Value>, id: RequestId) -> JsonRpcResponse {
    match result {
        Ok(value) => JsonRpcResponse::success(value, Some(id)),
        Err(err) => JsonRpcResponse::error(err.into(), Some(id)),
    }
}

fn dispatch_notification(inner: Arc<SessionInner>, notification: JsonRpcRequest) {
    if notification.method == INITIALIZED_NOTIFICATION {
        inner.observe_initialized();
    }

    let handlers = inner.handlers.notification_handlers(&notification.method);
    let method = notification.method.clone();
    let params = notification.params;
    tokio::spawn(async move {
        for handler in handlers {
            if let Err(err) = handler.handle(params.clone()).await {
                warn!(error = %err, method = %method, "notification handler failed");
            }
        }
    });
}
