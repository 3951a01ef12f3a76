//! Tool dispatch for the Iaptic MCP server.
//!
//! Resolves a tool name to its family, works out the identity the call runs
//! as, and turns every outcome into a tool-call result.
//!
//! ## Scoped impersonation
//!
//! Under a master key a call may carry `tenant`. The dispatcher derives a
//! one-off [`Identity`] for that app from the credential context and hands it
//! to the handler through a [`ScopedCall`]; the context is never written. The
//! ambient identity after a call, successful or failed or cancelled, is the one
//! before it, and concurrent calls for different apps do not interfere.

mod error;
mod router;
mod service;

pub use error::ToolError;
pub use service::IapticService;

pub(in crate::tools) use error::parse_args;

use super::catalog::{describe_tools, ToolDescriptor, TENANT_PARAM};
use super::family::ToolFamily;
use error::{tool_failure, tool_success};
use iaptic_api::{BackendGateway, Operation};
use iaptic_identity::{AuthMode, ContextInfo, CredentialContext, Identity};
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A backend call pinned to one identity for its whole lifetime.
pub(in crate::tools) struct ScopedCall<'a> {
    gateway: &'a dyn BackendGateway,
    identity: &'a Identity,
}

impl ScopedCall<'_> {
    pub(in crate::tools) async fn run(&self, operation: Operation) -> Result<Value, ToolError> {
        log::debug!(
            "{} as {} ({:?})",
            operation.name(),
            self.identity.tenant(),
            self.identity.mode()
        );
        Ok(self.gateway.call(self.identity, &operation).await?)
    }
}

/// Routes tool calls and owns the process's credential context.
pub struct Dispatcher {
    gateway: Arc<dyn BackendGateway>,
    context: Arc<Mutex<CredentialContext>>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn BackendGateway>, context: CredentialContext) -> Self {
        Self {
            gateway,
            context: Arc::new(Mutex::new(context)),
        }
    }

    pub async fn mode(&self) -> AuthMode {
        self.context.lock().await.mode()
    }

    pub async fn inspect(&self) -> ContextInfo {
        self.context.lock().await.inspect()
    }

    /// Descriptors for the mode in effect right now; never cached.
    pub async fn list_tools(&self) -> Vec<ToolDescriptor> {
        describe_tools(self.mode().await)
    }

    /// Runs one tool and converts any failure into the tool-call error shape.
    pub async fn call_tool(&self, name: &str, args: Option<JsonObject>) -> CallToolResult {
        match self.handle(name, args.unwrap_or_default()).await {
            Ok(text) => tool_success(text),
            Err(err) => {
                log::error!("Error handling tool {name} ({}): {err}", err.kind());
                tool_failure(&err)
            }
        }
    }

    pub async fn handle(&self, name: &str, mut args: JsonObject) -> Result<String, ToolError> {
        let family =
            ToolFamily::for_tool(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        if family == ToolFamily::App {
            let mut context = self.context.lock().await;
            return router::app::handle(&mut context, name, args);
        }

        let requested = args.remove(TENANT_PARAM);
        // The lock is released before the backend is awaited.
        let identity = {
            let context = self.context.lock().await;
            let tenant = requested_tenant(requested, context.mode())?;
            context.identity_for_call(tenant.as_deref())?
        };
        log::info!("{name} as app {}", identity.tenant());

        let call = ScopedCall {
            gateway: self.gateway.as_ref(),
            identity: &identity,
        };
        router::handle(family, &call, name, args).await
    }
}

/// Per-call app named by `tenant`. Only a master key can act on it, so a
/// malformed value is an error there and dropped otherwise.
fn requested_tenant(value: Option<Value>, mode: AuthMode) -> Result<Option<String>, ToolError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(tenant)) => Ok(Some(tenant)),
        Some(other) if mode == AuthMode::MasterKey => Err(ToolError::Validation(format!(
            "{TENANT_PARAM} must be a string, got {other}"
        ))),
        Some(other) => {
            log::debug!("Ignoring tenant override {other}: app-specific key in use");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn requested_tenant_accepts_strings_and_null() {
        for mode in [AuthMode::MasterKey, AuthMode::TenantKey] {
            assert_eq!(
                requested_tenant(Some(json!("beta")), mode).expect("tenant"),
                Some("beta".to_string())
            );
            assert_eq!(requested_tenant(Some(Value::Null), mode).expect("null"), None);
            assert_eq!(requested_tenant(None, mode).expect("absent"), None);
        }
    }

    #[test]
    fn non_string_tenant_fails_only_under_a_master_key() {
        let err = requested_tenant(Some(json!(7)), AuthMode::MasterKey).unwrap_err();
        assert_eq!(err.to_string(), "tenant must be a string, got 7");

        let ignored = requested_tenant(Some(json!(7)), AuthMode::TenantKey).expect("ignored");
        assert_eq!(ignored, None);
    }
}
