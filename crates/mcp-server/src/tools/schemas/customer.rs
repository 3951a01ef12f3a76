use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CustomerListRequest {
    #[schemars(description = "Number of customers to return (default: 100, max: 1000)")]
    pub limit: Option<f64>,

    #[schemars(description = "Offset for pagination")]
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGetRequest {
    #[schemars(description = "ID of the customer")]
    pub customer_id: String,
}
