use crate::error::{GatewayError, Result};
use crate::operation::Operation;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use iaptic_identity::Identity;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://validator.iaptic.com/v3";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Executes backend operations on behalf of an explicit identity.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn call(&self, identity: &Identity, operation: &Operation) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `Bearer base64("<app>:<key>")`, the same for app-specific and master keys.
pub fn authorization_header(identity: &Identity) -> String {
    let token = STANDARD.encode(format!(
        "{}:{}",
        identity.tenant(),
        identity.credential().secret()
    ));
    format!("Bearer {token}")
}

/// Gateway backed by the Iaptic REST API.
///
/// One connection pool serves every identity; authentication is attached per
/// request from the identity passed to [`BackendGateway::call`].
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|err| GatewayError::Config(format!("base URL '{}': {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("iaptic-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GatewayError::Config(format!("HTTP client: {err}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[String]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                GatewayError::Config(format!("base URL '{}' cannot carry a path", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn call(&self, identity: &Identity, operation: &Operation) -> Result<Value> {
        let url = self.endpoint(&operation.path_segments(identity.tenant()))?;
        log::debug!(
            "{} {} {url} as {}",
            operation.name(),
            operation.method(),
            identity.tenant()
        );

        let mut request = self
            .client
            .request(operation.method(), url)
            .header(AUTHORIZATION, authorization_header(identity))
            .header(ACCEPT, "application/json");
        let query = operation.query();
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = operation.body() {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|err| transport_error(operation, &err))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| transport_error(operation, &err))?;

        if !status.is_success() {
            let err = upstream_error(status, &bytes);
            log::warn!("{} failed as {}: {err}", operation.name(), identity.tenant());
            return Err(err);
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode {
            operation: operation.name(),
            reason: err.to_string(),
        })
    }
}

fn transport_error(operation: &Operation, err: &reqwest::Error) -> GatewayError {
    let reason = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    GatewayError::Transport {
        operation: operation.name(),
        reason,
    }
}

/// Builds the typed error from an `{ ok: false, status?, code?, message? }`
/// body, falling back to the HTTP status and raw text.
fn upstream_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let field = |name: &str| parsed.as_ref().and_then(|v| v.get(name));

    let body_status = field("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok());
    let code = field("code").and_then(|code| match code {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    let message = field("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            if parsed.is_some() {
                return None;
            }
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            (!text.is_empty()).then(|| text.chars().take(MAX_ERROR_BODY_CHARS).collect())
        })
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());

    GatewayError::Upstream {
        status: body_status.or(Some(status.as_u16())),
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn authorization_header_encodes_tenant_and_secret() {
        let identity = Identity::with_master_key("beta", "mk");
        // base64("beta:mk")
        assert_eq!(authorization_header(&identity), "Bearer YmV0YTptaw==");
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let gateway = HttpGateway::new(&GatewayConfig {
            base_url: "https://validator.iaptic.com/v3/".to_string(),
            ..GatewayConfig::default()
        })
        .expect("gateway");
        let url = gateway
            .endpoint(&Operation::GetAppStats.path_segments("my app"))
            .expect("endpoint");
        assert_eq!(
            url.as_str(),
            "https://validator.iaptic.com/v3/apps/my%20app/stats"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        let err = HttpGateway::new(&GatewayConfig {
            base_url: "mailto:ops@example.com".to_string(),
            ..GatewayConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)), "{err:?}");
    }

    #[test]
    fn upstream_error_reads_structured_body() {
        let err = upstream_error(
            StatusCode::BAD_REQUEST,
            br#"{"ok":false,"code":6778003,"message":"Invalid receipt"}"#,
        );
        assert_eq!(
            err,
            GatewayError::Upstream {
                status: Some(400),
                code: Some("6778003".to_string()),
                message: "Invalid receipt".to_string(),
            }
        );
    }

    #[test]
    fn upstream_error_falls_back_to_text_and_reason() {
        let err = upstream_error(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(err.to_string(), "Iaptic API error (502): upstream down");

        let err = upstream_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(
            err.to_string(),
            "Iaptic API error (503): Service Unavailable"
        );
    }
}
