use reqwest::Method;
use serde_json::Value;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIST_LIMIT: u32 = 100;
/// Largest page the server will ever request, whatever the caller asked for.
pub const MAX_LIST_LIMIT: u32 = 1000;

pub fn clamp_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_LIST_LIMIT,
        Some(limit) => limit.min(MAX_LIST_LIMIT),
    }
}

/// Pagination and date window of a list operation.
///
/// The limit is clamped on construction, so a `Page` can never carry more than
/// [`MAX_LIST_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: Option<u32>,
    startdate: Option<String>,
    enddate: Option<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Page {
    pub fn new(limit: Option<u32>) -> Self {
        Self {
            limit: clamp_limit(limit),
            offset: None,
            startdate: None,
            enddate: None,
        }
    }

    /// Page for a caller-supplied numeric limit of any size or sign. Values
    /// below one take the default; larger ones saturate at the ceiling.
    pub fn requested(limit: Option<f64>) -> Self {
        let limit = limit
            .filter(|limit| limit.is_finite() && *limit >= 1.0)
            .map(|limit| limit.min(f64::from(MAX_LIST_LIMIT)) as u32);
        Self::new(limit)
    }

    pub fn with_offset(mut self, offset: Option<u32>) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_dates(mut self, startdate: Option<String>, enddate: Option<String>) -> Self {
        self.startdate = non_blank(startdate);
        self.enddate = non_blank(enddate);
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        query.push(("limit", self.limit.to_string()));
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(startdate) = &self.startdate {
            query.push(("startdate", startdate.clone()));
        }
        if let Some(enddate) = &self.enddate {
            query.push(("enddate", enddate.clone()));
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One backend REST call, independent of who performs it.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListCustomers {
        page: Page,
    },
    GetCustomer {
        customer_id: String,
    },
    ListPurchases {
        page: Page,
        customer_id: Option<String>,
    },
    GetPurchase {
        purchase_id: String,
    },
    ListTransactions {
        page: Page,
        purchase_id: Option<String>,
    },
    GetTransaction {
        transaction_id: String,
    },
    GetStats,
    /// Statistics of the app the call authenticates as.
    GetAppStats,
    ListEvents {
        page: Page,
    },
    StripePrices,
    StripeCheckout {
        body: Value,
    },
    StripePortal {
        body: Value,
    },
    StripePurchases {
        customer_id: Option<String>,
        access_key: Option<String>,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListCustomers { .. } => "customers.list",
            Self::GetCustomer { .. } => "customers.get",
            Self::ListPurchases { .. } => "purchases.list",
            Self::GetPurchase { .. } => "purchases.get",
            Self::ListTransactions { .. } => "transactions.list",
            Self::GetTransaction { .. } => "transactions.get",
            Self::GetStats => "stats.get",
            Self::GetAppStats => "stats.app",
            Self::ListEvents { .. } => "events.list",
            Self::StripePrices => "stripe.prices",
            Self::StripeCheckout { .. } => "stripe.checkout",
            Self::StripePortal { .. } => "stripe.portal",
            Self::StripePurchases { .. } => "stripe.purchases",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::StripeCheckout { .. } | Self::StripePortal { .. } => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path below the API base URL. `tenant` is the app the call runs as.
    pub fn path_segments(&self, tenant: &str) -> Vec<String> {
        let segments: Vec<&str> = match self {
            Self::ListCustomers { .. } => vec!["customers"],
            Self::GetCustomer { customer_id } => vec!["customers", customer_id.as_str()],
            Self::ListPurchases { .. } => vec!["purchases"],
            Self::GetPurchase { purchase_id } => vec!["purchases", purchase_id.as_str()],
            Self::ListTransactions { .. } => vec!["transactions"],
            Self::GetTransaction { transaction_id } => vec!["transactions", transaction_id.as_str()],
            Self::GetStats => vec!["stats"],
            Self::GetAppStats => vec!["apps", tenant, "stats"],
            Self::ListEvents { .. } => vec!["events"],
            Self::StripePrices => vec!["stripe", "prices"],
            Self::StripeCheckout { .. } => vec!["stripe", "checkout"],
            Self::StripePortal { .. } => vec!["stripe", "portal"],
            Self::StripePurchases { .. } => vec!["stripe", "purchases"],
        };
        segments.into_iter().map(str::to_string).collect()
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        match self {
            Self::ListCustomers { page } | Self::ListEvents { page } => page.push_query(&mut query),
            Self::ListPurchases { page, customer_id } => {
                page.push_query(&mut query);
                if let Some(id) = customer_id {
                    query.push(("customerId", id.clone()));
                }
            }
            Self::ListTransactions { page, purchase_id } => {
                page.push_query(&mut query);
                if let Some(id) = purchase_id {
                    query.push(("purchaseId", id.clone()));
                }
            }
            Self::StripePurchases {
                customer_id,
                access_key,
            } => {
                if let Some(id) = customer_id {
                    query.push(("customerId", id.clone()));
                }
                if let Some(key) = access_key {
                    query.push(("accessKey", key.clone()));
                }
            }
            _ => {}
        }
        query
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::StripeCheckout { body } | Self::StripePortal { body } => Some(body),
            _ => None,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::ListCustomers { page }
            | Self::ListEvents { page }
            | Self::ListPurchases { page, .. }
            | Self::ListTransactions { page, .. } => Some(page),
            _ => None,
        }
    }
}
