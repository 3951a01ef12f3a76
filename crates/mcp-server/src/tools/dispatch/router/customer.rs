use super::{render, require_id, unknown};
use crate::tools::dispatch::{parse_args, ScopedCall, ToolError};
use crate::tools::schemas::customer::{CustomerGetRequest, CustomerListRequest};
use iaptic_api::{Operation, Page};
use rmcp::model::JsonObject;

pub(super) async fn handle(
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    let operation = match name {
        "customer_list" => {
            let request: CustomerListRequest = parse_args(name, args)?;
            Operation::ListCustomers {
                page: Page::requested(request.limit).with_offset(request.offset),
            }
        }
        "customer_get" => {
            let request: CustomerGetRequest = parse_args(name, args)?;
            Operation::GetCustomer {
                customer_id: require_id("customerId", request.customer_id)?,
            }
        }
        _ => return Err(unknown(name)),
    };
    Ok(render(&call.run(operation).await?))
}
