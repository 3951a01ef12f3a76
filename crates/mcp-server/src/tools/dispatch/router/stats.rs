use super::{render, unknown};
use crate::tools::dispatch::{parse_args, ScopedCall, ToolError};
use crate::tools::schemas::stats::StatsRequest;
use iaptic_api::Operation;
use rmcp::model::JsonObject;

pub(super) async fn handle(
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    let operation = match name {
        "stats_get" => Operation::GetStats,
        // The app is the one the call runs as, so a master-key call with
        // `tenant` reads that app's statistics.
        "stats_app" => Operation::GetAppStats,
        _ => return Err(unknown(name)),
    };
    let _: StatsRequest = parse_args(name, args)?;
    Ok(render(&call.run(operation).await?))
}
