//! Per-family tool handlers.
//!
//! Backend families receive a [`ScopedCall`] and never see the credential
//! context; the `app` family is the only one that reads or changes it.

pub(super) mod app;
mod customer;
mod event;
mod purchase;
mod stats;
mod stripe;
mod transaction;

use super::{ScopedCall, ToolError};
use crate::tools::family::ToolFamily;
use rmcp::model::JsonObject;
use serde_json::Value;

pub(super) async fn handle(
    family: ToolFamily,
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    match family {
        ToolFamily::Customer => customer::handle(call, name, args).await,
        ToolFamily::Purchase => purchase::handle(call, name, args).await,
        ToolFamily::Transaction => transaction::handle(call, name, args).await,
        ToolFamily::Stats => stats::handle(call, name, args).await,
        ToolFamily::Stripe => stripe::handle(call, name, args).await,
        ToolFamily::Event => event::handle(call, name, args).await,
        // Context tools are served by the dispatcher under the context lock.
        ToolFamily::App => Err(unknown(name)),
    }
}

fn unknown(name: &str) -> ToolError {
    ToolError::UnknownTool(name.to_string())
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Path identifiers are inserted as URL segments; a blank one would silently
/// turn a "get" into a "list".
fn require_id(field: &str, value: String) -> Result<String, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
