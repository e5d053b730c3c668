//! The MCP server feature layer, built on top of the symmetric session
//! engine: `initialize` handling, the tools/resources/prompts
//! registries with auto change-notifications, and the two
//! server-initiated requests a server may send
//! (`sampling/createMessage`, `roots/list`).

use std::sync::{Arc, RwLock};
use std::time::Duration;

use mcp_schema::{
    ClientCapabilities, GetPromptRequest, GetPromptResponse, InitializeRequest,
    InitializeResponse, ListPromptsRequest, ListPromptsResponse, ListResourceTemplatesResponse,
    ListResourcesRequest, ListResourcesResponse, ListRootsResponse, ListToolsRequest,
    ListToolsResponse, LogLevelSetRequest, LogLevelSetResponse, MCPError, MCPResult, Prompt,
    ReadResourceRequest, ReadResourceResponse, Resource, ResourceUpdatedNotification, Root,
    SamplingRequest, SamplingResponse, ServerCapabilities, ServerInfo, SubscribeRequest,
    SubscribeResponse, Tool, ToolCallRequest, ToolCallResponse, UnsubscribeRequest,
    UnsubscribeResponse, CURRENT_VERSION,
};
use mcp_session::{BoxFuture, Session};
use mcp_transport::Transport;
use serde_json::Value;
use tracing::{debug, warn};

use crate::handlers::{PromptHandler, ResourceHandler, ToolHandler};
use crate::registry::{PromptRegistry, ResourceRegistry, ToolRegistry};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

struct ServerState {
    client_capabilities: Option<ClientCapabilities>,
    subscribed_uris: std::collections::HashSet<String>,
}

struct ServerInner {
    info: ServerInfo,
    capabilities: ServerCapabilities,
    session: Session,
    tools: ToolRegistry,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
    state: RwLock<ServerState>,
}

/// A running MCP server bound to one session. Cheap to clone; every
/// clone shares the same registries and underlying session.
#[derive(Clone)]
pub struct Server {
    inner: Arc<ServerInner>,
}

impl Server {
    /// Spawn a session over `transport` and start answering
    /// client-initiated requests. Registries start empty; use
    /// [`Server::add_tool`] and friends afterwards to populate them,
    /// including while the session is `Operating`.
    pub fn serve(transport: Box<dyn Transport>, info: ServerInfo, capabilities: ServerCapabilities) -> Self {
        let session = Session::spawn(transport);
        let inner = Arc::new(ServerInner {
            info,
            capabilities,
            session: session.clone(),
            tools: ToolRegistry::new(),
            resources: ResourceRegistry::new(),
            prompts: PromptRegistry::new(),
            state: RwLock::new(ServerState {
                client_capabilities: None,
                subscribed_uris: std::collections::HashSet::new(),
            }),
        });
        install_handlers(&session, Arc::clone(&inner));
        Self { inner }
    }

    pub fn state(&self) -> mcp_session::SessionState {
        self.inner.session.state()
    }

    pub fn client_capabilities(&self) -> Option<ClientCapabilities> {
        self.inner.state.read().unwrap().client_capabilities.clone()
    }

    pub fn add_tool(&self, tool: Tool, handler: Arc<dyn ToolHandler>) -> MCPResult<()> {
        self.inner.tools.add(tool, handler);
        let advertised = self.inner.capabilities.tools.as_ref().and_then(|t| t.list_changed).unwrap_or(false);
        self.notify_if_operating("notifications/tools/list_changed", advertised)
    }

    pub fn remove_tool(&self, name: &str) -> MCPResult<bool> {
        let removed = self.inner.tools.remove(name);
        if removed {
            let advertised = self.inner.capabilities.tools.as_ref().and_then(|t| t.list_changed).unwrap_or(false);
            self.notify_if_operating("notifications/tools/list_changed", advertised)?;
        }
        Ok(removed)
    }

    pub fn list_tools_sync(&self) -> Vec<Tool> {
        self.inner.tools.list()
    }

    pub fn add_resource(&self, resource: Resource, handler: Arc<dyn ResourceHandler>) -> MCPResult<()> {
        self.inner.resources.add(resource, handler);
        let advertised = self.inner.capabilities.resources.as_ref().and_then(|r| r.list_changed).unwrap_or(false);
        self.notify_if_operating("notifications/resources/list_changed", advertised)
    }

    pub fn remove_resource(&self, uri: &str) -> MCPResult<bool> {
        let removed = self.inner.resources.remove(uri);
        if removed {
            let advertised = self.inner.capabilities.resources.as_ref().and_then(|r| r.list_changed).unwrap_or(false);
            self.notify_if_operating("notifications/resources/list_changed", advertised)?;
        }
        Ok(removed)
    }

    /// Notify subscribers that a resource's content changed. A no-op if
    /// the client never subscribed to `uri`.
    pub fn notify_resource_updated(&self, uri: &str) -> MCPResult<()> {
        if !self.inner.state.read().unwrap().subscribed_uris.contains(uri) {
            return Ok(());
        }
        if self.inner.session.state() != mcp_session::SessionState::Operating {
            return Ok(());
        }
        let payload = ResourceUpdatedNotification { uri: uri.to_string() };
        self.inner
            .session
            .notify("notifications/resources/updated", Some(serde_json::to_value(payload)?))
    }

    pub fn add_prompt(&self, prompt: Prompt, handler: Arc<dyn PromptHandler>) -> MCPResult<()> {
        self.inner.prompts.add(prompt, handler);
        let advertised = self.inner.capabilities.prompts.as_ref().and_then(|p| p.list_changed).unwrap_or(false);
        self.notify_if_operating("notifications/prompts/list_changed", advertised)
    }

    pub fn remove_prompt(&self, name: &str) -> MCPResult<bool> {
        let removed = self.inner.prompts.remove(name);
        if removed {
            let advertised = self.inner.capabilities.prompts.as_ref().and_then(|p| p.list_changed).unwrap_or(false);
            self.notify_if_operating("notifications/prompts/list_changed", advertised)?;
        }
        Ok(removed)
    }

    fn notify_if_operating(&self, method: &str, advertised: bool) -> MCPResult<()> {
        if !advertised || self.inner.session.state() != mcp_session::SessionState::Operating {
            return Ok(());
        }
        self.inner.session.notify(method.to_string(), None)
    }

    /// Ask the client to run an LLM completion. Fails locally, without
    /// wire traffic, unless the client advertised `sampling`.
    pub async fn create_message(&self, request: SamplingRequest) -> MCPResult<SamplingResponse> {
        if !self.supports_client_sampling() {
            return Err(MCPError::capability(
                "Client must be configured with sampling capabilities",
            ));
        }
        let params = serde_json::to_value(request)?;
        let result = self
            .inner
            .session
            .request("sampling/createMessage", Some(params), Some(DEFAULT_TIMEOUT))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Ask the client for its current root list. Fails locally unless
    /// the client advertised `roots`.
    pub async fn list_roots(&self) -> MCPResult<Vec<Root>> {
        if !self.supports_client_roots() {
            return Err(MCPError::capability("Roots not supported"));
        }
        let result = self
            .inner
            .session
            .request("roots/list", None, Some(DEFAULT_TIMEOUT))
            .await?;
        let response: ListRootsResponse = serde_json::from_value(result)?;
        Ok(response.roots)
    }

    fn supports_client_sampling(&self) -> bool {
        self.inner
            .state
            .read()
            .unwrap()
            .client_capabilities
            .as_ref()
            .map(|c| c.supports_sampling())
            .unwrap_or(false)
    }

    fn supports_client_roots(&self) -> bool {
        self.inner
            .state
            .read()
            .unwrap()
            .client_capabilities
            .as_ref()
            .map(|c| c.supports_roots())
            .unwrap_or(false)
    }

    pub async fn close(&self) -> MCPResult<()> {
        self.inner.session.close().await
    }
}

fn install_handlers(session: &Session, inner: Arc<ServerInner>) {
    macro_rules! register {
        ($method:expr, $handle:ident) => {{
            let inner = Arc::clone(&inner);
            session.register_request_handler(
                $method,
                Arc::new(move |params: Option<Value>| {
                    let inner = Arc::clone(&inner);
                    boxed(async move { $handle(inner, params).await })
                }),
            );
        }};
    }

    register!("initialize", handle_initialize);
    register!("ping", handle_ping);
    register!("tools/list", handle_tools_list);
    register!("tools/call", handle_tools_call);
    register!("resources/list", handle_resources_list);
    register!("resources/read", handle_resources_read);
    register!("resources/templates/list", handle_resource_templates_list);
    register!("resources/subscribe", handle_resources_subscribe);
    register!("resources/unsubscribe", handle_resources_unsubscribe);
    register!("prompts/list", handle_prompts_list);
    register!("prompts/get", handle_prompts_get);
    register!("logging/setLevel", handle_logging_set_level);
}

async fn handle_initialize(inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let request: InitializeRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    if request.protocol_version != CURRENT_VERSION {
        return Err(MCPError::initialization(format!(
            "unsupported protocol version '{}', expected '{CURRENT_VERSION}'",
            request.protocol_version
        )));
    }
    inner.state.write().unwrap().client_capabilities = Some(request.capabilities);

    let response = InitializeResponse {
        protocol_version: CURRENT_VERSION.to_string(),
        capabilities: inner.capabilities.clone(),
        server_info: inner.info.clone(),
        instructions: None,
    };
    Ok(serde_json::to_value(response)?)
}

async fn handle_ping(_inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let request: mcp_schema::PingRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    Ok(serde_json::to_value(mcp_schema::PingResponse::echo(&request))?)
}

async fn handle_tools_list(inner: Arc<ServerInner>, _params: Option<Value>) -> MCPResult<Value> {
    let _request = ListToolsRequest::default();
    Ok(serde_json::to_value(ListToolsResponse {
        tools: inner.tools.list(),
        next_cursor: None,
    })?)
}

async fn handle_tools_call(inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let request: ToolCallRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    let Some((_, handler)) = inner.tools.get(&request.name) else {
        warn!(tool = %request.name, "tools/call for an unregistered tool");
        return Err(MCPError::invalid_params("Tool not found"));
    };
    let response = match handler.call(request.arguments).await {
        Ok(response) => response,
        Err(err) => {
            debug!(tool = %request.name, error = %err, "tool handler returned an error, reporting in-band");
            ToolCallResponse::error(err.to_string())
        }
    };
    Ok(serde_json::to_value(response)?)
}

async fn handle_resources_list(inner: Arc<ServerInner>, _params: Option<Value>) -> MCPResult<Value> {
    let _request = ListResourcesRequest::default();
    Ok(serde_json::to_value(ListResourcesResponse {
        resources: inner.resources.list(),
        next_cursor: None,
    })?)
}

async fn handle_resources_read(inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let request: ReadResourceRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    let Some((_, handler)) = inner.resources.get(&request.uri) else {
        return Err(MCPError::not_found(format!("resource not found: {}", request.uri)));
    };
    let response: ReadResourceResponse = handler.read().await?;
    Ok(serde_json::to_value(response)?)
}

async fn handle_resource_templates_list(
    _inner: Arc<ServerInner>,
    _params: Option<Value>,
) -> MCPResult<Value> {
    Ok(serde_json::to_value(ListResourceTemplatesResponse {
        resource_templates: Vec::new(),
        next_cursor: None,
    })?)
}

async fn handle_resources_subscribe(inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    if !inner.capabilities.supports_resource_subscribe() {
        return Err(MCPError::capability("resource subscriptions not supported"));
    }
    let request: SubscribeRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    inner.state.write().unwrap().subscribed_uris.insert(request.uri);
    Ok(serde_json::to_value(SubscribeResponse::default())?)
}

async fn handle_resources_unsubscribe(inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let request: UnsubscribeRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    inner.state.write().unwrap().subscribed_uris.remove(&request.uri);
    Ok(serde_json::to_value(UnsubscribeResponse::default())?)
}

async fn handle_prompts_list(inner: Arc<ServerInner>, _params: Option<Value>) -> MCPResult<Value> {
    let _request = ListPromptsRequest::default();
    Ok(serde_json::to_value(ListPromptsResponse {
        prompts: inner.prompts.list(),
        next_cursor: None,
    })?)
}

async fn handle_prompts_get(inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let request: GetPromptRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    let Some((_, handler)) = inner.prompts.get(&request.name) else {
        return Err(MCPError::not_found(format!("prompt not found: {}", request.name)));
    };
    let response: GetPromptResponse = handler.get(request.arguments).await?;
    Ok(serde_json::to_value(response)?)
}

async fn handle_logging_set_level(_inner: Arc<ServerInner>, params: Option<Value>) -> MCPResult<Value> {
    let _request: LogLevelSetRequest = serde_json::from_value(params.unwrap_or(Value::Null))?;
    Ok(serde_json::to_value(LogLevelSetResponse::default())?)
}

fn boxed<F>(fut: F) -> BoxFuture<'static, MCPResult<Value>>
where
    F: std::future::Future<Output = MCPResult<Value>> + Send + 'static,
{
    Box::pin(fut)
}
