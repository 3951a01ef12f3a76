use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListRequest {
    #[schemars(description = "Maximum number of transactions to return (default: 100, max: 1000)")]
    pub limit: Option<f64>,

    #[schemars(description = "Number of transactions to skip for pagination")]
    pub offset: Option<u32>,

    #[schemars(description = "Filter transactions after this date (ISO format, e.g. 2024-01-01)")]
    pub startdate: Option<String>,

    #[schemars(description = "Filter transactions before this date (ISO format, e.g. 2024-12-31)")]
    pub enddate: Option<String>,

    #[schemars(description = "Filter by purchase ID")]
    pub purchase_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionGetRequest {
    #[schemars(description = "ID of the transaction")]
    pub transaction_id: String,
}
