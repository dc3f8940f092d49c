// ABOUTME: MCP server core that routes JSON-RPC requests to resources and tools
// ABOUTME: Implements initialize, ping, tools/list, tools/call, resources/list, and resources/read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use sipgate::types::TelephonyProvider;
use tracing::debug;

use crate::protocol::{
    CallToolParams, EmptyCapability, InitializeParams, InitializeResult, JsonRpcRequest,
    JsonRpcResponse, McpError, ReadResourceParams, ResourcesListResult, ServerCapabilities,
    ServerInfo, ToolsListResult, INVALID_REQUEST, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION,
};
use crate::resources::ResourceResolver;
use crate::tools::ToolRegistry;

/// MCP server that dispatches JSON-RPC requests to the appropriate handler
///
/// Owns the resource resolver and tool registry, both backed by the same
/// provider. Transport layers feed parsed requests into `handle_request`
/// and send the returned responses.
pub struct McpServer {
    resources: ResourceResolver,
    tools: ToolRegistry,
}

impl McpServer {
    /// Create a server whose resources and tools use the given provider
    pub fn new(provider: Arc<dyn TelephonyProvider>) -> Self {
        Self {
            resources: ResourceResolver::new(Arc::clone(&provider)),
            tools: ToolRegistry::new(provider),
        }
    }

    /// Route a JSON-RPC request to the appropriate MCP handler
    ///
    /// Returns `None` for notifications (requests without an id).
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Notifications have no id and are never answered, even when malformed
        if request.id.is_none() {
            debug!(method = %request.method, "Received notification, no response");
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Unsupported JSON-RPC version: {}", request.jsonrpc),
            ));
        }

        let id = request.id;
        let result = match request.method.as_str() {
            "initialize" => Self::handle_initialize(request.params),
            "ping" => Ok(Value::Object(serde_json::Map::new())),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params).await,
            "resources/list" => self.handle_resources_list(),
            "resources/read" => self.handle_resources_read(request.params).await,
            method => {
                debug!(method, "Unknown MCP method");
                Err(McpError::method_not_found(format!("Method not found: {method}")))
            }
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::from_error(id, e),
        })
    }

    /// Handle `initialize`: log client info and return server capabilities
    fn handle_initialize(params: Option<Value>) -> Result<Value, McpError> {
        if let Some(init) = params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
        {
            debug!(
                client = %init.client_info.name,
                version = ?init.client_info.version,
                protocol = %init.protocol_version,
                "MCP client connected"
            );
        }

        to_result(&InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: Some(EmptyCapability {}),
                resources: Some(EmptyCapability {}),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_owned(),
                version: SERVER_VERSION.to_owned(),
            },
        })
    }

    /// Handle `tools/list`: return all tool definitions
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        to_result(&ToolsListResult {
            tools: self.tools.list_definitions(),
        })
    }

    /// Handle `tools/call`: dispatch to the named tool handler
    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let call: CallToolParams = parse_params(params, "tools/call")?;
        let arguments = call
            .arguments
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        let result = self.tools.execute(&call.name, arguments).await?;
        to_result(&result)
    }

    /// Handle `resources/list`: return all resource definitions
    fn handle_resources_list(&self) -> Result<Value, McpError> {
        to_result(&ResourcesListResult {
            resources: self.resources.list_resources(),
        })
    }

    /// Handle `resources/read`: resolve the uri through the cache or provider
    async fn handle_resources_read(&self, params: Option<Value>) -> Result<Value, McpError> {
        let read: ReadResourceParams = parse_params(params, "resources/read")?;
        let result = self.resources.read_resource(&read.uri).await?;
        to_result(&result)
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<Value>,
    method: &str,
) -> Result<T, McpError> {
    let params =
        params.ok_or_else(|| McpError::invalid_params(format!("Missing params for {method}")))?;
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(format!("Invalid params: {e}")))
}

fn to_result<T: Serialize>(result: &T) -> Result<Value, McpError> {
    serde_json::to_value(result)
        .map_err(|e| McpError::internal(format!("Result serialization error: {e}")))
}
