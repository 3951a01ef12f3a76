use super::{render, unknown};
use crate::tools::dispatch::{parse_args, ScopedCall, ToolError};
use crate::tools::schemas::stripe::{
    StripeCheckoutRequest, StripePortalRequest, StripePurchasesRequest,
};
use crate::tools::schemas::EmptyRequest;
use iaptic_api::Operation;
use rmcp::model::JsonObject;
use serde::Serialize;
use serde_json::Value;

pub(super) async fn handle(
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    let operation = match name {
        "stripe_prices" => {
            let _: EmptyRequest = parse_args(name, args)?;
            Operation::StripePrices
        }
        "stripe_checkout" => {
            let request: StripeCheckoutRequest = parse_args(name, args)?;
            Operation::StripeCheckout {
                body: to_body(name, &request)?,
            }
        }
        "stripe_portal" => {
            let request: StripePortalRequest = parse_args(name, args)?;
            Operation::StripePortal {
                body: to_body(name, &request)?,
            }
        }
        "stripe_purchases" => {
            let request: StripePurchasesRequest = parse_args(name, args)?;
            Operation::StripePurchases {
                customer_id: request.customer_id,
                access_key: request.access_key,
            }
        }
        _ => return Err(unknown(name)),
    };
    Ok(render(&call.run(operation).await?))
}

fn to_body<T: Serialize>(tool: &str, request: &T) -> Result<Value, ToolError> {
    serde_json::to_value(request)
        .map_err(|err| ToolError::Validation(format!("Invalid arguments for {tool}: {err}")))
}
