//! The MCP client feature layer, built on top of the symmetric session
//! engine: the `initialize` handshake, outbound tools/resources/prompts
//! calls, root management, and the server-initiated requests a client
//! must answer (`sampling/createMessage`, `roots/list`, `ping`).

use std::sync::{Arc, RwLock};
use std::time::Duration;

use mcp_schema::{
    ClientCapabilities, ClientInfo, GetPromptRequest, GetPromptResponse, InitializeRequest,
    InitializeResponse, ListPromptsRequest, ListPromptsResponse, ListResourcesRequest,
    ListResourcesResponse, ListRootsResponse, ListToolsRequest, ListToolsResponse,
    LogLevelSetRequest, LogLevelSetResponse, LoggingLevel, MCPError, MCPResult,
    ReadResourceRequest, ReadResourceResponse, Root, RootListChangedNotification, SamplingRequest,
    SamplingResponse, ServerCapabilities, ServerInfo, SubscribeRequest, SubscribeResponse,
    ToolCallRequest, ToolCallResponse, CURRENT_VERSION,
};
use mcp_session::{BoxFuture, Session, INITIALIZED_NOTIFICATION};
use mcp_transport::Transport;
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handles a server-initiated `sampling/createMessage` request. Never
/// invoked for a client configured without sampling capabilities — that
/// request is rejected locally, before any handler runs.
#[async_trait::async_trait]
pub trait SamplingHandler: Send + Sync {
    async fn create_message(&self, request: SamplingRequest) -> MCPResult<SamplingResponse>;
}

struct ClientState {
    server_info: Option<ServerInfo>,
    server_capabilities: Option<ServerCapabilities>,
    roots: Vec<Root>,
}

struct ClientInner {
    capabilities: ClientCapabilities,
    session: Session,
    state: RwLock<ClientState>,
    sampling_handler: Option<Arc<dyn SamplingHandler>>,
}

/// A connected MCP client. Cheap to clone; every clone shares the same
/// underlying session and local state.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Spawn a session over `transport`, register the handlers for
    /// server-initiated requests, and perform the `initialize` handshake.
    /// Returns once `notifications/initialized` has been sent and the
    /// session has moved to `Operating`.
    pub async fn connect(
        transport: Box<dyn Transport>,
        client_info: ClientInfo,
        capabilities: ClientCapabilities,
        sampling_handler: Option<Arc<dyn SamplingHandler>>,
    ) -> MCPResult<Self> {
        let session = Session::spawn(transport);
        let inner = Arc::new(ClientInner {
            capabilities: capabilities.clone(),
            session: session.clone(),
            state: RwLock::new(ClientState {
                server_info: None,
                server_capabilities: None,
                roots: Vec::new(),
            }),
            sampling_handler,
        });
        install_handlers(&session, Arc::clone(&inner));

        let client = Self { inner };
        client.initialize(client_info, capabilities).await?;
        Ok(client)
    }

    async fn initialize(
        &self,
        client_info: ClientInfo,
        capabilities: ClientCapabilities,
    ) -> MCPResult<InitializeResponse> {
        let request = InitializeRequest {
            protocol_version: CURRENT_VERSION.to_string(),
            capabilities,
            client_info,
        };
        let response: InitializeResponse = self
            .call("initialize", &request, Some(DEFAULT_TIMEOUT))
            .await?;

        {
            let mut state = self.inner.state.write().unwrap();
            state.server_info = Some(response.server_info.clone());
            state.server_capabilities = Some(response.capabilities.clone());
        }

        self.inner.session.notify(INITIALIZED_NOTIFICATION, None)?;
        Ok(response)
    }

    pub fn state(&self) -> mcp_session::SessionState {
        self.inner.session.state()
    }

    pub fn server_info(&self) -> Option<ServerInfo> {
        self.inner.state.read().unwrap().server_info.clone()
    }

    pub fn server_capabilities(&self) -> Option<ServerCapabilities> {
        self.inner.state.read().unwrap().server_capabilities.clone()
    }

    pub async fn list_tools(&self) -> MCPResult<ListToolsResponse> {
        self.call("tools/list", &ListToolsRequest::default(), None).await
    }

    pub async fn call_tool(&self, request: ToolCallRequest) -> MCPResult<ToolCallResponse> {
        self.call("tools/call", &request, None).await
    }

    pub async fn list_resources(&self) -> MCPResult<ListResourcesResponse> {
        self.call("resources/list", &ListResourcesRequest::default(), None)
            .await
    }

    pub async fn read_resource(&self, uri: impl Into<String>) -> MCPResult<ReadResourceResponse> {
        self.call(
            "resources/read",
            &ReadResourceRequest { uri: uri.into() },
            None,
        )
        .await
    }

    pub async fn subscribe_resource(&self, uri: impl Into<String>) -> MCPResult<SubscribeResponse> {
        if !self.server_supports_subscribe() {
            return Err(MCPError::capability("resource subscriptions not supported by server"));
        }
        self.call(
            "resources/subscribe",
            &SubscribeRequest { uri: uri.into() },
            None,
        )
        .await
    }

    fn server_supports_subscribe(&self) -> bool {
        self.inner
            .state
            .read()
            .unwrap()
            .server_capabilities
            .as_ref()
            .map(|c| c.supports_resource_subscribe())
            .unwrap_or(false)
    }

    pub async fn list_prompts(&self) -> MCPResult<ListPromptsResponse> {
        self.call("prompts/list", &ListPromptsRequest::default(), None).await
    }

    pub async fn get_prompt(&self, request: GetPromptRequest) -> MCPResult<GetPromptResponse> {
        self.call("prompts/get", &request, None).await
    }

    pub async fn set_logging_level(&self, level: LoggingLevel) -> MCPResult<LogLevelSetResponse> {
        self.call("logging/setLevel", &LogLevelSetRequest { level }, None).await
    }

    /// Add a root to the client's local list, then notify the server if
    /// it needs to know (only sent once `roots.listChanged` was
    /// advertised in this client's own capabilities).
    pub fn add_root(&self, root: Root) -> MCPResult<()> {
        self.inner.state.write().unwrap().roots.push(root);
        self.notify_roots_changed()
    }

    pub fn remove_root(&self, uri: &str) -> MCPResult<()> {
        self.inner.state.write().unwrap().roots.retain(|r| r.uri != uri);
        self.notify_roots_changed()
    }

    pub fn roots(&self) -> Vec<Root> {
        self.inner.state.read().unwrap().roots.clone()
    }

    fn notify_roots_changed(&self) -> MCPResult<()> {
        if !self.inner.capabilities.supports_roots_list_changed() {
            return Ok(());
        }
        let roots = self.roots();
        self.inner.session.notify(
            "notifications/roots/list_changed",
            Some(serde_json::to_value(RootListChangedNotification { roots })?),
        )
    }

    pub async fn close(&self) -> MCPResult<()> {
        self.inner.session.close().await
    }

    async fn call<Req: serde::Serialize, Resp: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        request: &Req,
        timeout: Option<Duration>,
    ) -> MCPResult<Resp> {
        let params = serde_json::to_value(request)?;
        let params = if params.is_null() { None } else { Some(params) };
        let result = self
            .inner
            .session
            .request(method.to_string(), params, timeout.or(Some(DEFAULT_TIMEOUT)))
            .await?;
        Ok(serde_json::from_value(result)?)
    }
}

fn install_handlers(session: &Session, inner: Arc<ClientInner>) {
    {
        let inner = Arc::clone(&inner);
        session.register_request_handler(
            "sampling/createMessage",
            Arc::new(move |params: Option<Value>| {
                let inner = Arc::clone(&inner);
                boxed(async move { handle_create_message(inner, params).await })
            }),
        );
    }
    {
        let inner = Arc::clone(&inner);
        session.register_request_handler(
            "roots/list",
            Arc::new(move |params: Option<Value>| {
                let inner = Arc::clone(&inner);
                boxed(async move { handle_list_roots(inner, params).await })
            }),
        );
    }
    {
        session.register_request_handler(
            "ping",
            Arc::new(move |params: Option<Value>| boxed(async move { handle_ping(params).await })),
        );
    }
}

async fn handle_ping(params: Option<Value>) -> MCPResult<Value> {
    let request: mcp_schema::PingRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    Ok(serde_json::to_value(mcp_schema::PingResponse::echo(&request))?)
}

async fn handle_create_message(inner: Arc<ClientInner>, params: Option<Value>) -> MCPResult<Value> {
    if !inner.capabilities.supports_sampling() {
        warn!("server sent sampling/createMessage but sampling was never advertised");
        return Err(MCPError::capability(
            "Client must be configured with sampling capabilities",
        ));
    }
    let handler = inner.sampling_handler.clone().ok_or_else(|| {
        MCPError::capability("Client must be configured with sampling capabilities")
    })?;
    let request: SamplingRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    let response = handler.create_message(request).await?;
    Ok(serde_json::to_value(response)?)
}

async fn handle_list_roots(inner: Arc<ClientInner>, _params: Option<Value>) -> MCPResult<Value> {
    if !inner.capabilities.supports_roots() {
        warn!("server sent roots/list but roots was never advertised");
        return Err(MCPError::capability("Roots not supported"));
    }
    let roots = inner.state.read().unwrap().roots.clone();
    debug!(count = roots.len(), "returning current root list to server");
    Ok(serde_json::to_value(ListRootsResponse { roots })?)
}

fn boxed<F>(fut: F) -> BoxFuture<'static, MCPResult<Value>>
where
    F: std::future::Future<Output = MCPResult<Value>> + Send + 'static,
{
    Box::pin(fut)
}
