// ABOUTME: MCP JSON-RPC protocol types for request/response handling
// ABOUTME: Defines wire format for initialize, tools, resources, and protocol-level errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP protocol version supported by this server
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported during MCP handshake
pub const SERVER_NAME: &str = "sipgate-mcp";

/// Server version reported during MCP handshake
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MIME type of every resource this server exposes
pub const JSON_MIME_TYPE: &str = "application/json";

// ============================================================================
// JSON-RPC Error Codes
// ============================================================================

/// JSON-RPC parse error: invalid JSON received
pub const PARSE_ERROR: i32 = -32_700;

/// JSON-RPC invalid request (bad protocol version, unknown resource)
pub const INVALID_REQUEST: i32 = -32_600;

/// JSON-RPC method not found (unknown method or tool)
pub const METHOD_NOT_FOUND: i32 = -32_601;

/// JSON-RPC invalid parameters
pub const INVALID_PARAMS: i32 = -32_602;

/// JSON-RPC internal error
pub const INTERNAL_ERROR: i32 = -32_603;

// ============================================================================
// JSON-RPC Messages
// ============================================================================

/// Incoming JSON-RPC request from MCP client
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version marker (must be "2.0")
    pub jsonrpc: String,
    /// Request identifier (None for notifications)
    pub id: Option<Value>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC response to MCP client
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Matching request identifier
    pub id: Option<Value>,
    /// Success payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Build a success response with the given result
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response with the given code and message
    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }

    /// Build an error response from a protocol error
    pub fn from_error(id: Option<Value>, error: McpError) -> Self {
        Self::error(id, error.code, error.message)
    }
}

// ============================================================================
// Protocol Errors
// ============================================================================

/// Error raised to the JSON-RPC layer instead of being returned as tool data
///
/// Malformed requests (unknown resource, unknown tool, missing arguments)
/// and failed resource reads take this path. Tool execution failures are
/// reported inside a [`CallToolResult`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpError {
    /// JSON-RPC error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

impl McpError {
    /// Unknown resource uri or otherwise unacceptable request
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_REQUEST,
            message: message.into(),
        }
    }

    /// Unknown method or tool name
    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: message.into(),
        }
    }

    /// Missing or malformed parameters
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }

    /// Provider failure or unmet provider precondition
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: message.into(),
        }
    }
}

impl fmt::Display for McpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MCP error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for McpError {}

// ============================================================================
// MCP Initialize
// ============================================================================

/// Parameters for the `initialize` request (used when deserializing client handshake)
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    /// Protocol version requested by the client
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Client identification
    #[serde(rename = "clientInfo")]
    pub client_info: ClientInfo,
}

/// Client identification sent during initialization
#[derive(Debug, Deserialize)]
pub struct ClientInfo {
    /// Client name
    pub name: String,
    /// Client version
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of a successful `initialize` response
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    /// Protocol version the server supports
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Server identification
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// Server identification
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// Server capability declarations
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    /// Tool support (presence signals tools are available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<EmptyCapability>,
    /// Resource support (presence signals resources are available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<EmptyCapability>,
}

/// Capability marker serialized as `{}`
#[derive(Debug, Serialize)]
pub struct EmptyCapability {}

// ============================================================================
// MCP Tools
// ============================================================================

/// Tool definition exposed via `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable tool description
    pub description: String,
    /// JSON Schema describing the tool's input
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result of a `tools/list` call
#[derive(Debug, Serialize)]
pub struct ToolsListResult {
    /// Available tool definitions
    pub tools: Vec<ToolDefinition>,
}

/// Parameters for a `tools/call` request
#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to invoke
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Result of a `tools/call` invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToolResult {
    /// Response content parts
    pub content: Vec<ContentPart>,
    /// Whether this result represents an error
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// A content part within a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPart {
    /// Content type (always "text")
    #[serde(rename = "type")]
    pub content_type: String,
    /// Text content
    pub text: String,
}

impl CallToolResult {
    /// Build a successful text result
    pub fn text(content: String) -> Self {
        Self {
            content: vec![ContentPart {
                content_type: "text".to_owned(),
                text: content,
            }],
            is_error: None,
        }
    }

    /// Build an error result with the given message
    pub fn error(message: String) -> Self {
        Self {
            content: vec![ContentPart {
                content_type: "text".to_owned(),
                text: message,
            }],
            is_error: Some(true),
        }
    }

    /// Whether the result carries `isError: true`
    pub fn is_error(&self) -> bool {
        self.is_error == Some(true)
    }
}

// ============================================================================
// MCP Resources
// ============================================================================

/// Resource definition exposed via `resources/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDefinition {
    /// Resource identifier (e.g. `sipgate://account`)
    pub uri: String,
    /// Short display name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Content MIME type
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Result of a `resources/list` call
#[derive(Debug, Serialize)]
pub struct ResourcesListResult {
    /// Available resource definitions
    pub resources: Vec<ResourceDefinition>,
}

/// Parameters for a `resources/read` request
#[derive(Debug, Deserialize)]
pub struct ReadResourceParams {
    /// Identifier of the resource to read
    pub uri: String,
}

/// Result of a `resources/read` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadResourceResult {
    /// Resource contents (always a single entry)
    pub contents: Vec<ResourceContents>,
}

/// Text contents of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceContents {
    /// Identifier of the resource that was read
    pub uri: String,
    /// Content MIME type
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Pretty-printed JSON document
    pub text: String,
}

impl ReadResourceResult {
    /// Wrap a JSON document read from `uri`
    pub fn json(uri: &str, text: String) -> Self {
        Self {
            contents: vec![ResourceContents {
                uri: uri.to_owned(),
                mime_type: JSON_MIME_TYPE.to_owned(),
                text,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_success_response() {
        let resp = JsonRpcResponse::success(Some(Value::from(1)), serde_json::json!({"ok": true}));
        let json = serde_json::to_string(&resp).expect("serialize");
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn parse_error_response_carries_null_id() {
        let resp = JsonRpcResponse::error(None, PARSE_ERROR, "bad json".to_owned());
        let json: Value = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["id"], Value::Null);
        assert_eq!(json["error"]["code"], -32_700);
        assert!(json.get("result").is_none());
    }

    #[test]
    fn mcp_error_maps_to_rpc_error() {
        let resp = JsonRpcResponse::from_error(
            Some(Value::from(7)),
            McpError::invalid_params("Missing required argument: to"),
        );
        let error = resp.error.expect("error");
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.message, "Missing required argument: to");
    }

    #[test]
    fn deserialize_request() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#;
        let req: JsonRpcRequest = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(req.method, "resources/list");
        assert!(req.params.is_none());
    }

    #[test]
    fn call_tool_result_error_sets_flag() {
        let result = CallToolResult::error("oops".to_owned());
        assert!(result.is_error());
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
    }

    #[test]
    fn call_tool_result_text_omits_flag() {
        let json = serde_json::to_value(CallToolResult::text("hello".to_owned())).expect("serialize");
        assert!(json.get("isError").is_none());
    }

    #[test]
    fn read_result_uses_camel_case_mime_type() {
        let result = ReadResourceResult::json("sipgate://account", "{}".to_owned());
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["contents"][0]["mimeType"], JSON_MIME_TYPE);
        assert_eq!(json["contents"][0]["uri"], "sipgate://account");
    }
}
