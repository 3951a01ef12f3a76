use super::Dispatcher;
use crate::tools::catalog;
use iaptic_api::BackendGateway;
use iaptic_identity::{AuthMode, CredentialContext};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, InitializeRequestParam,
    InitializeResult, ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use std::sync::Arc;

/// rmcp-facing service. Clones share one dispatcher and so one credential
/// context.
#[derive(Clone)]
pub struct IapticService {
    dispatcher: Arc<Dispatcher>,
    startup_mode: AuthMode,
}

impl IapticService {
    pub fn new(gateway: Arc<dyn BackendGateway>, context: CredentialContext) -> Self {
        let startup_mode = context.mode();
        Self {
            dispatcher: Arc::new(Dispatcher::new(gateway, context)),
            startup_mode,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn server_info(&self, mode: AuthMode) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::tool_instructions(mode)),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

impl ServerHandler for IapticService {
    #[allow(clippy::manual_async_fn)]
    fn initialize(
        &self,
        request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<InitializeResult, McpError>> + Send + '_ {
        async move {
            if context.peer.peer_info().is_none() {
                context.peer.set_peer_info(request.clone());
            }
            let mode = self.dispatcher.mode().await;
            log::info!(
                "MCP session initialized ({:?}, protocol {:?})",
                mode,
                request.protocol_version
            );
            let mut info = self.server_info(mode);
            info.protocol_version = request.protocol_version;
            Ok(info)
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            let tools = self
                .dispatcher
                .list_tools()
                .await
                .iter()
                .map(|descriptor| descriptor.to_tool())
                .collect();
            Ok(ListToolsResult::with_all_items(tools))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            Ok(self
                .dispatcher
                .call_tool(&request.name, request.arguments)
                .await)
        }
    }

    fn get_info(&self) -> ServerInfo {
        self.server_info(self.startup_mode)
    }
}
