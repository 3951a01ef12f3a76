//! Context tools: the only handlers that read or change the credential context.

use super::unknown;
use crate::tools::dispatch::{parse_args, ToolError};
use crate::tools::schemas::app::SwitchAppRequest;
use crate::tools::schemas::EmptyRequest;
use iaptic_identity::CredentialContext;
use rmcp::model::JsonObject;

pub(in crate::tools::dispatch) fn handle(
    context: &mut CredentialContext,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    match name {
        "iaptic_switch_app" => {
            let request: SwitchAppRequest = parse_args(name, args)?;
            let identity = context.switch(&request.app_name, request.api_key.as_deref())?;
            Ok(format!("Successfully switched to app: {}", identity.tenant()))
        }
        "iaptic_reset_app" => {
            let _: EmptyRequest = parse_args(name, args)?;
            context.reset();
            Ok("Successfully reset to default app".to_string())
        }
        "iaptic_current_app" => {
            let _: EmptyRequest = parse_args(name, args)?;
            let info = context.inspect();
            Ok(format!(
                "Current app: {} ({} credentials, {})",
                info.tenant,
                if info.is_default { "default" } else { "custom" },
                if info.using_master_key {
                    "using master key"
                } else {
                    "using app-specific API key"
                }
            ))
        }
        _ => Err(unknown(name)),
    }
}
