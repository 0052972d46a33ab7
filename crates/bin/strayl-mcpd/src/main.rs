//! Daemon entry point for the Strayl MCP server.
//!
//! Loads configuration from the environment, builds the backend client and
//! control plane, and serves the MCP protocol over stdio and/or streamable
//! HTTP.

mod config;

use std::sync::Arc;

use strayl_core::client::{StraylClient, StraylConfig};
use strayl_core::control::StraylControlPlane;
use strayl_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::StraylMcpdConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logs go to stderr; stdout belongs to the stdio MCP transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = StraylMcpdConfig::from_args()?;
    let client = StraylClient::new(StraylConfig {
        api_url: config.api_url.clone(),
        api_key: config.api_key.clone(),
    })?;
    let control = Arc::new(StraylControlPlane::new(client));

    if config.mcp_serve {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        info!(addr = %config.mcp_http_addr, "serving MCP over streamable HTTP");
        if config.enable_stdio {
            let http_control = control.clone();
            tokio::spawn(async move {
                if let Err(err) = serve_streamable_http(http_control, http_config).await {
                    tracing::error!(%err, "streamable HTTP server exited");
                }
            });
        } else {
            serve_streamable_http(control, http_config).await?;
            return Ok(());
        }
    }

    if config.enable_stdio {
        info!("serving MCP over stdio");
        serve_stdio(control).await?;
    }
    Ok(())
}
