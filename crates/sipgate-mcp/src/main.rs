// ABOUTME: CLI entry point for the sipgate MCP server binary
// ABOUTME: Loads credentials, builds the sipgate client, and serves MCP over stdio
//
// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "config-file")]
use std::path::PathBuf;

use clap::Parser;
use sipgate::config::{API_URL_ENV, DEFAULT_API_URL};
use sipgate::{ClientConfig, Credentials, SipgateClient};

use sipgate_mcp::transport::stdio::StdioTransport;
use sipgate_mcp::transport::McpTransport;
use sipgate_mcp::McpServer;

/// sipgate-mcp: MCP server exposing the sipgate telephony API to AI agents
#[derive(Parser)]
#[command(name = "sipgate-mcp", version, about)]
struct Cli {
    /// sipgate API base URL (defaults to $SIPGATE_API_URL or the production API)
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout for sipgate API calls, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// TOML file with `token_id`, `token`, and `api_url` (environment wins)
    #[cfg(feature = "config-file")]
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr to keep stdout clean for stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    #[cfg(feature = "config-file")]
    let file = sipgate::config::FileConfig::load_or_default(cli.config.as_deref())?;
    let lookup = |key: &str| {
        let value = std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        #[cfg(feature = "config-file")]
        let value = value.or_else(|| file.lookup(key));
        value
    };

    let credentials = Credentials::from_lookup(&lookup)?;
    let api_url = cli
        .api_url
        .or_else(|| lookup(API_URL_ENV))
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

    let config = ClientConfig::new(credentials)
        .with_base_url(api_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    tracing::info!(
        api_url = %config.base_url,
        token_id = %config.credentials.token_id(),
        "Starting sipgate MCP server"
    );
    let client = SipgateClient::new(config)?;

    let server = Arc::new(McpServer::new(Arc::new(client)));
    StdioTransport.serve(server).await?;

    Ok(())
}
