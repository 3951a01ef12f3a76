use iaptic_api::GatewayError;
use iaptic_identity::IdentityError;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    /// Malformed or missing arguments.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ToolError {
    /// Stable short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Identity(_) => "validation",
            Self::UnknownTool(_) => "unknown_tool",
            Self::Gateway(GatewayError::Upstream { .. }) => "upstream",
            Self::Gateway(GatewayError::Transport { .. }) => "transport",
            Self::Gateway(_) => "gateway",
        }
    }
}

pub(in crate::tools) fn parse_args<T: DeserializeOwned>(
    tool: &str,
    args: JsonObject,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|err| ToolError::Validation(format!("Invalid arguments for {tool}: {err}")))
}

pub(in crate::tools) fn tool_success(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Tool-call error shape: `isError: true`, text `Error: <message>`.
pub(in crate::tools) fn tool_failure(err: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {err}"))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        purchase_id: String,
    }

    #[test]
    fn parse_args_reports_tool_and_field() {
        let args = json!({ "purchaseId": 42 });
        let err = parse_args::<Probe>("purchase_get", args.as_object().cloned().unwrap_or_default())
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
        let message = err.to_string();
        assert!(message.starts_with("Invalid arguments for purchase_get:"), "{message}");

        let ok: Probe = parse_args(
            "purchase_get",
            json!({ "purchaseId": "p-1" }).as_object().cloned().unwrap_or_default(),
        )
        .expect("parse");
        assert_eq!(ok.purchase_id, "p-1");
    }

    #[test]
    fn failure_is_prefixed_with_error() {
        let result = tool_failure(&ToolError::UnknownTool("nope".to_string()));
        assert_eq!(result.is_error, Some(true));
        let text = result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone());
        assert_eq!(text.as_deref(), Some("Error: Unknown tool: nope"));
    }
}
