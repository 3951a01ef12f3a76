use super::family::ToolFamily;
use iaptic_identity::AuthMode;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TENANT_PARAM: &str = "tenant";

/// Declared shape of one tool, as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Property name -> JSON schema of that property.
    pub parameters: JsonObject,
    pub required: Vec<String>,
}

impl ToolDescriptor {
    /// Descriptor whose parameters come from the `JsonSchema` of `T`.
    pub fn for_request<T: JsonSchema>(name: &'static str, description: &'static str) -> Self {
        let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null);
        let parameters = schema
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name,
            description,
            parameters,
            required,
        }
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn requires(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    fn require_tenant(&mut self) {
        self.parameters.insert(
            TENANT_PARAM.to_string(),
            json!({
                "type": "string",
                "description": "Name of the Iaptic app to run this call as (required when using a master key)",
            }),
        );
        if !self.requires(TENANT_PARAM) {
            self.required.push(TENANT_PARAM.to_string());
        }
    }

    pub fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert(
            "properties".to_string(),
            Value::Object(self.parameters.clone()),
        );
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        schema
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::new(self.input_schema()))
    }
}

/// Every tool, shaped for the given authentication mode.
///
/// Under a master key every backend call is ambiguous without an app name, so
/// backend tools require `tenant`. Under an app-specific key the app is implied
/// by the key and the parameter is not offered at all.
pub fn describe_tools(mode: AuthMode) -> Vec<ToolDescriptor> {
    ToolFamily::ALL
        .into_iter()
        .flat_map(|family| {
            family.descriptors().into_iter().map(move |mut tool| {
                if family.takes_tenant() && mode == AuthMode::MasterKey {
                    tool.require_tenant();
                }
                tool
            })
        })
        .collect()
}

pub fn tool_instructions(mode: AuthMode) -> String {
    let mut lines = vec![
        "Iaptic MCP exposes the Iaptic receipt-validation API: customers, purchases, transactions, statistics, Stripe and events.".to_string(),
        "Use iaptic_current_app to see which app calls run as; iaptic_switch_app / iaptic_reset_app change it.".to_string(),
    ];
    if mode == AuthMode::MasterKey {
        lines.push(
            "A master key is configured: pass `tenant` (the app name) on every data tool call."
                .to_string(),
        );
    }
    lines.join("\n")
}
