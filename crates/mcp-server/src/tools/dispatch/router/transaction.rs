use super::{render, require_id, unknown};
use crate::tools::dispatch::{parse_args, ScopedCall, ToolError};
use crate::tools::schemas::transaction::{TransactionGetRequest, TransactionListRequest};
use iaptic_api::{Operation, Page};
use rmcp::model::JsonObject;

pub(super) async fn handle(
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    let operation = match name {
        "transaction_list" => {
            let request: TransactionListRequest = parse_args(name, args)?;
            Operation::ListTransactions {
                page: Page::requested(request.limit)
                    .with_offset(request.offset)
                    .with_dates(request.startdate, request.enddate),
                purchase_id: request.purchase_id.filter(|id| !id.trim().is_empty()),
            }
        }
        "transaction_get" => {
            let request: TransactionGetRequest = parse_args(name, args)?;
            Operation::GetTransaction {
                transaction_id: require_id("transactionId", request.transaction_id)?,
            }
        }
        _ => return Err(unknown(name)),
    };
    Ok(render(&call.run(operation).await?))
}
