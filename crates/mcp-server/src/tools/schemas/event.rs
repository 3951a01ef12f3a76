use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EventListRequest {
    #[schemars(description = "Maximum number of events to return (default: 100, max: 1000)")]
    pub limit: Option<f64>,

    #[schemars(description = "Number of events to skip for pagination")]
    pub offset: Option<u32>,

    #[schemars(description = "Filter events after this date (ISO format, e.g. 2024-01-01)")]
    pub startdate: Option<String>,

    #[schemars(description = "Filter events before this date (ISO format, e.g. 2024-12-31)")]
    pub enddate: Option<String>,
}
