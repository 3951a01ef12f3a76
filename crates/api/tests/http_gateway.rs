use anyhow::{Context, Result};
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use iaptic_api::{
    authorization_header, BackendGateway, GatewayConfig, GatewayError, HttpGateway, Operation,
    Page,
};
use iaptic_identity::Identity;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Seen {
    authorization: Option<String>,
    query: Option<String>,
}

type SeenLog = Arc<Mutex<Vec<Seen>>>;

async fn purchases(
    State(seen): State<SeenLog>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Ok(mut log) = seen.lock() {
        log.push(Seen {
            authorization,
            query,
        });
    }
    Json(json!({ "rows": [{ "purchaseId": "apple:1" }] }))
}

async fn broken_stats() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "ok": false,
            "status": 500,
            "code": "6778100",
            "message": "backend exploded",
        })),
    )
}

async fn spawn_backend() -> Result<(String, SeenLog)> {
    let seen: SeenLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v3/purchases", get(purchases))
        .route("/v3/stats", get(broken_stats))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind mock backend")?;
    let addr = listener.local_addr().context("mock backend addr")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/v3"), seen))
}

fn gateway(base_url: String) -> Result<HttpGateway> {
    HttpGateway::new(&GatewayConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
    .context("build gateway")
}

#[tokio::test]
async fn list_call_authenticates_as_passed_identity() -> Result<()> {
    let (base_url, seen) = spawn_backend().await?;
    let gateway = gateway(base_url)?;

    let identity = Identity::with_master_key("beta", "mk");
    let op = Operation::ListPurchases {
        page: Page::new(Some(5000)),
        customer_id: Some("cust-7".to_string()),
    };
    let value = gateway.call(&identity, &op).await?;
    assert_eq!(value["rows"][0]["purchaseId"], "apple:1");

    let seen = seen.lock().expect("seen lock").clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].authorization.as_deref(),
        Some(authorization_header(&identity).as_str())
    );
    assert_eq!(
        seen[0].query.as_deref(),
        Some("limit=1000&customerId=cust-7")
    );
    Ok(())
}

#[tokio::test]
async fn upstream_failure_surfaces_status_code_and_message() -> Result<()> {
    let (base_url, _) = spawn_backend().await?;
    let gateway = gateway(base_url)?;

    let err = gateway
        .call(&Identity::with_tenant_key("alpha", "ak"), &Operation::GetStats)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Upstream {
            status: Some(500),
            code: Some("6778100".to_string()),
            message: "backend exploded".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Iaptic API error (500): backend exploded");
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() -> Result<()> {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let gateway = gateway(format!("http://{addr}/v3"))?;
    let err = gateway
        .call(&Identity::with_tenant_key("alpha", "ak"), &Operation::StripePrices)
        .await
        .unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err:?}");
    Ok(())
}
