use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAppRequest {
    #[schemars(description = "Name of the app to switch to")]
    pub app_name: String,

    #[schemars(description = "API key for the app (not required if using master key)")]
    pub api_key: Option<String>,
}
