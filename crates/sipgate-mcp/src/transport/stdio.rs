// ABOUTME: Stdio transport reading newline-delimited JSON-RPC from stdin and writing to stdout
// ABOUTME: Stops on end of input or on Ctrl-C, abandoning any in-flight request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::protocol::{JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, PARSE_ERROR};
use crate::server::McpServer;
use crate::transport::McpTransport;

/// MCP transport over stdin/stdout using newline-delimited JSON-RPC
///
/// Each line on stdin is expected to be a complete JSON-RPC message.
/// Responses are written as single lines to stdout. Logs go to stderr
/// to avoid polluting the protocol channel.
pub struct StdioTransport;

#[async_trait]
impl McpTransport for StdioTransport {
    async fn serve(self, server: Arc<McpServer>) -> io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        debug!("Stdio transport ready, waiting for JSON-RPC messages on stdin");

        tokio::select! {
            result = serve_lines(&server, stdin, stdout) => {
                debug!("Stdin closed, shutting down stdio transport");
                result
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Interrupt received, closing stdio transport");
                Ok(())
            }
        }
    }
}

/// Serve JSON-RPC lines from `reader` until end of input
pub async fn serve_lines<R, W>(server: &McpServer, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let message: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, "Failed to parse JSON-RPC message");
                let resp = JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"));
                write_response(&mut writer, &resp).await?;
                continue;
            }
        };

        // Valid JSON that is not a request object
        let id = message
            .get("id")
            .filter(|id| id.is_string() || id.is_number())
            .cloned();
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(req) => req,
            Err(e) => {
                error!(error = %e, "Received JSON that is not a JSON-RPC request");
                let resp =
                    JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid request: {e}"));
                write_response(&mut writer, &resp).await?;
                continue;
            }
        };

        debug!(method = %request.method, "Handling MCP request");

        if let Some(response) = server.handle_request(request).await {
            write_response(&mut writer, &response).await?;
        }
    }

    Ok(())
}

/// Serialize and write a JSON-RPC response as a single line
async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_vec(response).map_err(io::Error::other)?;
    json.push(b'\n');
    writer.write_all(&json).await?;
    writer.flush().await
}
