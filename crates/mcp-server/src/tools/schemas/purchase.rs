use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseListRequest {
    #[schemars(description = "Maximum number of purchases to return (default: 100, max: 1000)")]
    pub limit: Option<f64>,

    #[schemars(description = "Number of purchases to skip for pagination")]
    pub offset: Option<u32>,

    #[schemars(description = "Filter purchases after this date (ISO format, e.g. 2024-01-01)")]
    pub startdate: Option<String>,

    #[schemars(description = "Filter purchases before this date (ISO format, e.g. 2024-12-31)")]
    pub enddate: Option<String>,

    #[schemars(description = "Filter by customer ID")]
    pub customer_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseGetRequest {
    #[schemars(description = "ID of the purchase")]
    pub purchase_id: String,
}
