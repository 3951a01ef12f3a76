//! Startup configuration: command-line flags with environment fallbacks.

use anyhow::{bail, Result};
use clap::Parser;
use iaptic_api::{GatewayConfig, DEFAULT_BASE_URL};
use iaptic_identity::Identity;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "iaptic-mcp")]
#[command(about = "MCP server for the Iaptic receipt-validation API", long_about = None)]
#[command(version)]
pub struct ServerArgs {
    /// Default app name every call runs as until switched
    #[arg(long, env = "IAPTIC_APP_NAME")]
    pub app_name: String,

    /// App-specific API key
    #[arg(long, env = "IAPTIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Master key; takes precedence over --api-key and enables per-call `tenant`
    #[arg(long, env = "IAPTIC_MASTER_KEY", hide_env_values = true)]
    pub master_key: Option<String>,

    /// Iaptic API base URL
    #[arg(long, env = "IAPTIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "IAPTIC_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Validated configuration the server starts from.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub identity: Identity,
    pub gateway: GatewayConfig,
}

impl ServerConfig {
    pub fn from_args(args: ServerArgs) -> Result<Self> {
        let app_name = args.app_name.trim();
        if app_name.is_empty() {
            bail!("app name is required (--app-name or IAPTIC_APP_NAME)");
        }
        if args.timeout_secs == 0 {
            bail!("--timeout-secs must be positive");
        }

        let identity = match (non_blank(args.master_key), non_blank(args.api_key)) {
            (Some(master_key), _) => Identity::with_master_key(app_name, master_key),
            (None, Some(api_key)) => Identity::with_tenant_key(app_name, api_key),
            (None, None) => bail!(
                "an API key is required: set --api-key/IAPTIC_API_KEY or --master-key/IAPTIC_MASTER_KEY"
            ),
        };

        Ok(Self {
            identity,
            gateway: GatewayConfig {
                base_url: args.base_url,
                timeout: Duration::from_secs(args.timeout_secs),
            },
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iaptic_identity::AuthMode;
    use pretty_assertions::assert_eq;

    // Env fallbacks are not exercised here: tests run in parallel and share the
    // process environment.
    fn parse(args: &[&str]) -> ServerArgs {
        let mut argv = vec!["iaptic-mcp"];
        argv.extend_from_slice(args);
        ServerArgs::try_parse_from(argv).expect("parse args")
    }

    #[test]
    fn master_key_takes_precedence() {
        let config = ServerConfig::from_args(parse(&[
            "--app-name",
            "alpha",
            "--api-key",
            "ak",
            "--master-key",
            "mk",
        ]))
        .expect("config");
        assert_eq!(config.identity.tenant(), "alpha");
        assert_eq!(config.identity.mode(), AuthMode::MasterKey);
        assert_eq!(config.identity.credential().secret(), "mk");
    }

    #[test]
    fn api_key_alone_is_app_specific() {
        let config = ServerConfig::from_args(parse(&[
            "--app-name",
            " alpha ",
            "--api-key",
            "ak",
            "--master-key",
            "  ",
        ]))
        .expect("config");
        assert_eq!(config.identity.tenant(), "alpha");
        assert_eq!(config.identity.mode(), AuthMode::TenantKey);
        assert_eq!(config.gateway.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gateway.timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_keys_are_rejected() {
        let err = ServerConfig::from_args(parse(&["--app-name", "alpha"])).unwrap_err();
        assert!(err.to_string().contains("API key is required"), "{err}");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ServerConfig::from_args(parse(&[
            "--app-name",
            "alpha",
            "--api-key",
            "ak",
            "--timeout-secs",
            "0",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("timeout"), "{err}");
    }

    #[test]
    fn overrides_base_url() {
        let config = ServerConfig::from_args(parse(&[
            "--app-name",
            "alpha",
            "--api-key",
            "ak",
            "--base-url",
            "http://127.0.0.1:9/v3",
            "--timeout-secs",
            "5",
        ]))
        .expect("config");
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:9/v3");
        assert_eq!(config.gateway.timeout, Duration::from_secs(5));
    }
}
