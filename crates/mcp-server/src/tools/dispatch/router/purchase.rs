use super::{render, require_id, unknown};
use crate::tools::dispatch::{parse_args, ScopedCall, ToolError};
use crate::tools::schemas::purchase::{PurchaseGetRequest, PurchaseListRequest};
use iaptic_api::{Operation, Page};
use rmcp::model::JsonObject;

pub(super) async fn handle(
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    let operation = match name {
        "purchase_list" => {
            let request: PurchaseListRequest = parse_args(name, args)?;
            Operation::ListPurchases {
                page: Page::requested(request.limit)
                    .with_offset(request.offset)
                    .with_dates(request.startdate, request.enddate),
                customer_id: request.customer_id.filter(|id| !id.trim().is_empty()),
            }
        }
        "purchase_get" => {
            let request: PurchaseGetRequest = parse_args(name, args)?;
            Operation::GetPurchase {
                purchase_id: require_id("purchaseId", request.purchase_id)?,
            }
        }
        _ => return Err(unknown(name)),
    };
    Ok(render(&call.run(operation).await?))
}
