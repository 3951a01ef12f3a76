use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /stripe/checkout`, forwarded as-is.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StripeCheckoutRequest {
    #[schemars(description = "Offer to purchase, e.g. stripe:prod_XXX#price_YYY (see stripe_prices)")]
    pub offer_id: String,

    #[schemars(description = "Username of the customer in your application")]
    pub application_username: String,

    #[schemars(description = "URL to redirect to after a successful payment")]
    pub success_url: String,

    #[schemars(description = "URL to redirect to when the customer cancels")]
    pub cancel_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Access key of an existing Stripe customer")]
    pub access_key: Option<String>,
}

/// Body of `POST /stripe/portal`, forwarded as-is.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StripePortalRequest {
    #[schemars(description = "Stripe customer ID")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Access key of the Stripe customer")]
    pub access_key: Option<String>,

    #[schemars(description = "URL to return to when leaving the portal")]
    pub return_url: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StripePurchasesRequest {
    #[schemars(description = "Stripe customer ID")]
    pub customer_id: Option<String>,

    #[schemars(description = "Access key of the Stripe customer")]
    pub access_key: Option<String>,
}
