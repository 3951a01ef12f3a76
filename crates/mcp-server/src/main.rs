//! Iaptic MCP Server
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "iaptic": {
//!       "command": "iaptic-mcp",
//!       "env": { "IAPTIC_APP_NAME": "my-app", "IAPTIC_API_KEY": "..." }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use iaptic_api::HttpGateway;
use iaptic_identity::CredentialContext;
use iaptic_mcp::{IapticService, ServerArgs, ServerConfig};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` fills in only variables the environment does not already set.
    let dotenv_path = dotenvy::dotenv().ok();

    // Logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    if let Some(path) = &dotenv_path {
        log::debug!("Loaded environment from {}", path.display());
    }

    let config = ServerConfig::from_args(ServerArgs::parse())?;
    let gateway = HttpGateway::new(&config.gateway).context("failed to configure Iaptic API client")?;

    log::info!(
        "Starting Iaptic MCP server for app {} ({:?}) against {}",
        config.identity.tenant(),
        config.identity.mode(),
        gateway.base_url()
    );

    let service = IapticService::new(Arc::new(gateway), CredentialContext::new(config.identity));
    let server = service
        .serve(stdio())
        .await
        .context("failed to start MCP transport")?;

    server.waiting().await?;

    log::info!("Iaptic MCP server stopped");
    Ok(())
}
