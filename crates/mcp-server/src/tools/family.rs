use super::catalog::ToolDescriptor;
use super::schemas::app::SwitchAppRequest;
use super::schemas::customer::{CustomerGetRequest, CustomerListRequest};
use super::schemas::event::EventListRequest;
use super::schemas::purchase::{PurchaseGetRequest, PurchaseListRequest};
use super::schemas::stats::StatsRequest;
use super::schemas::stripe::{StripeCheckoutRequest, StripePortalRequest, StripePurchasesRequest};
use super::schemas::transaction::{TransactionGetRequest, TransactionListRequest};
use super::schemas::EmptyRequest;

/// Group of tools sharing a name prefix and a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    Customer,
    Purchase,
    Transaction,
    Stats,
    Stripe,
    Event,
    /// Inspects and changes the credential context itself.
    App,
}

impl ToolFamily {
    pub const ALL: [ToolFamily; 7] = [
        Self::Customer,
        Self::Purchase,
        Self::Transaction,
        Self::Stats,
        Self::Stripe,
        Self::Event,
        Self::App,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Customer => "customer_",
            Self::Purchase => "purchase_",
            Self::Transaction => "transaction_",
            Self::Stats => "stats_",
            Self::Stripe => "stripe_",
            Self::Event => "event_",
            Self::App => "iaptic_",
        }
    }

    pub fn for_tool(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| name.starts_with(family.prefix()))
    }

    /// Whether tools of this family call the backend and so accept a per-call app.
    pub fn takes_tenant(self) -> bool {
        self != Self::App
    }

    pub fn descriptors(self) -> Vec<ToolDescriptor> {
        match self {
            Self::Customer => vec![
                ToolDescriptor::for_request::<CustomerListRequest>(
                    "customer_list",
                    "List all customers with pagination support",
                ),
                ToolDescriptor::for_request::<CustomerGetRequest>(
                    "customer_get",
                    "Get detailed information about a specific customer",
                ),
            ],
            Self::Purchase => vec![
                ToolDescriptor::for_request::<PurchaseListRequest>(
                    "purchase_list",
                    "List purchases with pagination and date filtering",
                ),
                ToolDescriptor::for_request::<PurchaseGetRequest>(
                    "purchase_get",
                    "Get detailed information about a specific purchase",
                ),
            ],
            Self::Transaction => vec![
                ToolDescriptor::for_request::<TransactionListRequest>(
                    "transaction_list",
                    "List transactions with pagination and date filtering",
                ),
                ToolDescriptor::for_request::<TransactionGetRequest>(
                    "transaction_get",
                    "Get detailed information about a specific transaction",
                ),
            ],
            Self::Stats => vec![
                ToolDescriptor::for_request::<StatsRequest>(
                    "stats_get",
                    "Get statistics about transactions and revenue",
                ),
                ToolDescriptor::for_request::<StatsRequest>(
                    "stats_app",
                    "Get app-specific statistics",
                ),
            ],
            Self::Stripe => vec![
                ToolDescriptor::for_request::<EmptyRequest>(
                    "stripe_prices",
                    "Get available Stripe products and prices.\n\
                     - Returns list of products with their associated prices\n\
                     - Each product includes ID, display name, description, metadata, pricing offers and subscription terms",
                ),
                ToolDescriptor::for_request::<StripeCheckoutRequest>(
                    "stripe_checkout",
                    "Create a Stripe checkout session for an offer. Returns the checkout URL.",
                ),
                ToolDescriptor::for_request::<StripePortalRequest>(
                    "stripe_portal",
                    "Create a Stripe customer portal session. Returns the portal URL.",
                ),
                ToolDescriptor::for_request::<StripePurchasesRequest>(
                    "stripe_purchases",
                    "List the Stripe purchases of a customer",
                ),
            ],
            Self::Event => vec![ToolDescriptor::for_request::<EventListRequest>(
                "event_list",
                "List recent events from your Iaptic account.\n\
                 - Events include receipt validations, platform notifications (Apple/Google/etc), webhook deliveries, purchase status changes and subscription renewals\n\
                 - Use limit and offset for pagination\n\
                 - Results ordered by date (newest first); the summary shows at most 20 events",
            )],
            Self::App => vec![
                ToolDescriptor::for_request::<SwitchAppRequest>(
                    "iaptic_switch_app",
                    "Switch to a different Iaptic app.\n\
                     - All subsequent API calls use the new app name (and API key, when given)\n\
                     - Required: appName (apiKey required only if not using a master key)",
                ),
                ToolDescriptor::for_request::<EmptyRequest>(
                    "iaptic_reset_app",
                    "Reset to the default Iaptic app provided at server start.",
                ),
                ToolDescriptor::for_request::<EmptyRequest>(
                    "iaptic_current_app",
                    "Get the currently active Iaptic app and whether it uses default or custom credentials.",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_family_by_prefix() {
        assert_eq!(ToolFamily::for_tool("purchase_list"), Some(ToolFamily::Purchase));
        assert_eq!(ToolFamily::for_tool("stats_app"), Some(ToolFamily::Stats));
        assert_eq!(ToolFamily::for_tool("iaptic_reset_app"), Some(ToolFamily::App));
        assert_eq!(ToolFamily::for_tool("purchases"), None);
        assert_eq!(ToolFamily::for_tool(""), None);
    }

    #[test]
    fn only_the_app_family_skips_tenant() {
        let skipping: Vec<ToolFamily> = ToolFamily::ALL
            .into_iter()
            .filter(|family| !family.takes_tenant())
            .collect();
        assert_eq!(skipping, vec![ToolFamily::App]);
    }
}
