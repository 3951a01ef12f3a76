//! `event_list`: a readable digest of the most recent account events.

use super::{render, unknown};
use crate::tools::dispatch::{parse_args, ScopedCall, ToolError};
use crate::tools::schemas::event::EventListRequest;
use iaptic_api::{Operation, Page};
use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Write as _;

/// Events shown in one digest, whatever page size was fetched.
pub(super) const MAX_SUMMARY_EVENTS: usize = 20;

const NO_EVENTS: &str = "No events found.";

pub(super) async fn handle(
    call: &ScopedCall<'_>,
    name: &str,
    args: JsonObject,
) -> Result<String, ToolError> {
    if name != "event_list" {
        return Err(unknown(name));
    }
    let request: EventListRequest = parse_args(name, args)?;
    let operation = Operation::ListEvents {
        page: Page::requested(request.limit)
            .with_offset(request.offset)
            .with_dates(request.startdate, request.enddate),
    };
    let events = call.run(operation).await?;
    Ok(summarize(&events))
}

pub(super) fn summarize(events: &Value) -> String {
    let page = match EventPage::deserialize(events) {
        Ok(page) => page,
        Err(err) => {
            log::warn!("Unrecognized event list shape ({err}); returning raw JSON");
            return render(events);
        }
    };
    let rows = page.rows.unwrap_or_default();
    log::debug!("Retrieved {} events", rows.len());
    if rows.is_empty() {
        return NO_EVENTS.to_string();
    }
    rows.iter()
        .take(MAX_SUMMARY_EVENTS)
        .map(format_event)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Deserialize)]
struct EventPage {
    #[serde(default)]
    rows: Option<Vec<Event>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Event {
    context: Option<EventContext>,
    content: Option<EventContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EventContext {
    event_date: Option<Value>,
    event_type: Option<String>,
    application_username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EventContent {
    refresh_failures: Option<Vec<RefreshFailure>>,
    transactions: Option<Vec<EventTransaction>>,
    products: Option<Vec<EventProduct>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefreshFailure {
    platform: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EventTransaction {
    transaction_id: Option<String>,
    product_id: Option<String>,
    amount_micros: Option<f64>,
    currency: Option<String>,
    sandbox: Option<bool>,
    is_consumed: Option<bool>,
    is_acknowledged: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EventProduct {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    currency: Option<String>,
    offers: Option<Vec<ProductOffer>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProductOffer {
    pricing_phases: Option<Vec<PricingPhase>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PricingPhase {
    price_micros: Option<f64>,
}

impl EventProduct {
    fn first_price_micros(&self) -> Option<f64> {
        self.offers
            .as_deref()?
            .first()?
            .pricing_phases
            .as_deref()?
            .first()?
            .price_micros
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

fn money(micros: f64, currency: &Option<String>) -> String {
    format!("{:.2} {}", micros / 1_000_000.0, currency.as_deref().unwrap_or(""))
        .trim_end()
        .to_string()
}

fn format_event(event: &Event) -> String {
    let context = event.context.as_ref();
    let date = match context.and_then(|c| c.event_date.as_ref()) {
        Some(Value::String(date)) => date.clone(),
        Some(other) => other.to_string(),
        None => "unknown date".to_string(),
    };
    let kind = context
        .and_then(|c| c.event_type.as_deref())
        .unwrap_or("unknown");
    let user = context
        .and_then(|c| c.application_username.as_deref())
        .filter(|user| !user.is_empty())
        .unwrap_or("system");

    let mut out = format!("### {date}: {kind} by {user}");
    let Some(content) = event.content.as_ref() else {
        return out;
    };

    let failures = content.refresh_failures.as_deref().unwrap_or_default();
    if !failures.is_empty() {
        out.push_str("\nRefresh Failures:");
        for failure in failures {
            let _ = write!(out, "\n  {}: {}", text(&failure.platform), text(&failure.reason));
        }
    }

    let transactions = content.transactions.as_deref().unwrap_or_default();
    if !transactions.is_empty() {
        out.push_str("\nTransactions:");
        for tx in transactions {
            let _ = write!(
                out,
                "\n  {}: {}",
                text(&tx.transaction_id),
                text(&tx.product_id)
            );
            if let Some(micros) = tx.amount_micros.filter(|m| *m != 0.0) {
                let _ = write!(out, " ({})", money(micros, &tx.currency));
            }
            for (flag, label) in [
                (tx.sandbox, "SANDBOX"),
                (tx.is_consumed, "CONSUMED"),
                (tx.is_acknowledged, "ACKNOWLEDGED"),
            ] {
                if flag == Some(true) {
                    let _ = write!(out, " [{label}]");
                }
            }
        }
    }

    let products = content.products.as_deref().unwrap_or_default();
    if !products.is_empty() {
        out.push_str("\nProducts:");
        for product in products {
            let _ = write!(out, "\n  {} ({})", text(&product.id), text(&product.kind));
            if let Some(micros) = product.first_price_micros().filter(|m| *m != 0.0) {
                let _ = write!(out, " - {}", money(micros, &product.currency));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_rows_render_placeholder() {
        assert_eq!(summarize(&json!({ "rows": [] })), NO_EVENTS);
        assert_eq!(summarize(&json!({})), NO_EVENTS);
        assert_eq!(summarize(&json!({ "rows": null })), NO_EVENTS);
    }

    #[test]
    fn formats_failures_transactions_and_products() {
        let events = json!({
            "rows": [{
                "context": {
                    "eventDate": "2024-05-01T10:00:00Z",
                    "eventType": "validator.success",
                    "applicationUsername": "user-1"
                },
                "content": {
                    "refreshFailures": [{ "platform": "apple", "reason": "timeout" }],
                    "transactions": [{
                        "transactionId": "apple:1000",
                        "productId": "pro_monthly",
                        "amountMicros": 4990000,
                        "currency": "USD",
                        "sandbox": true,
                        "isAcknowledged": true
                    }],
                    "products": [{
                        "id": "pro_monthly",
                        "type": "paid subscription",
                        "currency": "EUR",
                        "offers": [{ "pricingPhases": [{ "priceMicros": 1990000 }] }]
                    }]
                }
            }]
        });
        let expected = "### 2024-05-01T10:00:00Z: validator.success by user-1\n\
                        Refresh Failures:\n  apple: timeout\n\
                        Transactions:\n  apple:1000: pro_monthly (4.99 USD) [SANDBOX] [ACKNOWLEDGED]\n\
                        Products:\n  pro_monthly (paid subscription) - 1.99 EUR";
        assert_eq!(summarize(&events), expected);
    }

    #[test]
    fn missing_user_is_system_and_sections_are_optional() {
        let events = json!({
            "rows": [{ "context": { "eventDate": "d", "eventType": "webhook.sent" }, "content": {} }]
        });
        assert_eq!(summarize(&events), "### d: webhook.sent by system");
    }

    #[test]
    fn caps_the_digest_at_twenty_events() {
        let rows: Vec<Value> = (0..25)
            .map(|i| json!({ "context": { "eventDate": format!("d{i}"), "eventType": "t" } }))
            .collect();
        let summary = summarize(&json!({ "rows": rows }));
        assert_eq!(summary.lines().count(), MAX_SUMMARY_EVENTS);
        assert!(summary.ends_with("### d19: t by system"));
    }

    #[test]
    fn unexpected_shape_falls_back_to_json() {
        let events = json!(["not", "a", "page"]);
        assert_eq!(summarize(&events), render(&events));
    }
}
