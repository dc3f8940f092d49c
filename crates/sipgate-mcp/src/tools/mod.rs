// ABOUTME: Tool registry that maps MCP tool names to sipgate handler implementations
// ABOUTME: Validates required arguments and normalizes handler failures into error envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

pub mod account;
pub mod call;
pub mod devices;
pub mod history;
pub mod numbers;
pub mod sms;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sipgate::types::{ProviderError, TelephonyProvider};
use tracing::{debug, warn};

use crate::protocol::{CallToolResult, McpError, ToolDefinition};

/// Trait implemented by each MCP tool exposed by this server
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Return the tool's MCP definition (name, description, input schema)
    fn definition(&self) -> ToolDefinition;

    /// Arguments that must be present and non-empty before `execute` runs
    fn required_arguments(&self) -> &'static [&'static str] {
        &[]
    }

    /// Execute the tool with already-validated arguments
    async fn execute(
        &self,
        provider: &dyn TelephonyProvider,
        arguments: &Value,
    ) -> Result<CallToolResult, ToolError>;
}

/// Failure raised by a tool handler
///
/// The variant decides the reporting channel: `InvalidArguments` becomes
/// a JSON-RPC `InvalidParams` error, everything else becomes an
/// `isError: true` tool result.
#[derive(Debug, Clone)]
pub enum ToolError {
    /// Argument present but unusable (wrong type, unknown enum value)
    InvalidArguments(String),
    /// The provider call failed
    Provider(ProviderError),
    /// A precondition the provider requires was not met
    Precondition(String),
    /// Local failure while building the result
    Internal(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            Self::Provider(err) => write!(f, "{err}"),
            Self::Precondition(msg) | Self::Internal(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<ProviderError> for ToolError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

/// Tools exposed by this server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// `get_account_info`
    GetAccountInfo,
    /// `get_phone_numbers`
    GetPhoneNumbers,
    /// `send_sms`
    SendSms,
    /// `initiate_call`
    InitiateCall,
    /// `get_call_history`
    GetCallHistory,
    /// `get_user_info`
    GetUserInfo,
    /// `get_devices`
    GetDevices,
}

impl ToolKind {
    /// All tools, in listing order
    pub const ALL: [Self; 7] = [
        Self::GetAccountInfo,
        Self::GetPhoneNumbers,
        Self::SendSms,
        Self::InitiateCall,
        Self::GetCallHistory,
        Self::GetUserInfo,
        Self::GetDevices,
    ];

    /// Wire name of the tool
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetAccountInfo => "get_account_info",
            Self::GetPhoneNumbers => "get_phone_numbers",
            Self::SendSms => "send_sms",
            Self::InitiateCall => "initiate_call",
            Self::GetCallHistory => "get_call_history",
            Self::GetUserInfo => "get_user_info",
            Self::GetDevices => "get_devices",
        }
    }

    /// Look up a tool by its exact name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Handler implementing the tool
    pub fn handler(self) -> &'static dyn McpTool {
        match self {
            Self::GetAccountInfo => &account::GetAccountInfo,
            Self::GetPhoneNumbers => &numbers::GetPhoneNumbers,
            Self::SendSms => &sms::SendSms,
            Self::InitiateCall => &call::InitiateCall,
            Self::GetCallHistory => &history::GetCallHistory,
            Self::GetUserInfo => &account::GetUserInfo,
            Self::GetDevices => &devices::GetDevices,
        }
    }
}

/// Registry dispatching `tools/call` requests to their handlers
///
/// Holds the provider every handler runs against. Malformed calls are
/// rejected with a protocol error before any provider call; handler
/// failures are returned as error envelopes.
pub struct ToolRegistry {
    provider: Arc<dyn TelephonyProvider>,
}

impl ToolRegistry {
    /// Create a registry backed by the given provider
    pub fn new(provider: Arc<dyn TelephonyProvider>) -> Self {
        Self { provider }
    }

    /// List all tool definitions for `tools/list` responses
    pub fn list_definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL
            .into_iter()
            .map(|kind| kind.handler().definition())
            .collect()
    }

    /// Dispatch a `tools/call` to the named tool handler
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        let kind = ToolKind::parse(name)
            .ok_or_else(|| McpError::method_not_found(format!("Unknown tool: {name}")))?;
        let tool = kind.handler();

        if !arguments.is_object() {
            return Err(McpError::invalid_params(format!(
                "Arguments for {name} must be a JSON object"
            )));
        }

        let missing = missing_arguments(tool.required_arguments(), &arguments);
        if !missing.is_empty() {
            debug!(tool = name, ?missing, "Rejecting tool call with missing arguments");
            return Err(McpError::invalid_params(format!(
                "Missing required argument(s) for {name}: {}",
                missing.join(", ")
            )));
        }

        debug!(tool = name, "Executing tool");
        match tool.execute(self.provider.as_ref(), &arguments).await {
            Ok(result) => Ok(result),
            Err(ToolError::InvalidArguments(message)) => Err(McpError::invalid_params(message)),
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                Ok(CallToolResult::error(format!("Error executing {name}: {e}")))
            }
        }
    }
}

/// Required keys that are absent, null, or blank strings
fn missing_arguments(required: &[&'static str], arguments: &Value) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|key| match arguments.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .collect()
}

/// Read a string argument, rejecting non-string values
pub(crate) fn string_argument<'a>(
    arguments: &'a Value,
    key: &str,
) -> Result<Option<&'a str>, ToolError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "'{key}' must be a string, got: {other}"
        ))),
    }
}

/// Read a string argument that validation already guaranteed is present
pub(crate) fn required_string<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    string_argument(arguments, key)?
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))
}

/// Render a provider record as pretty-printed JSON text
pub(crate) fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, ToolError> {
    serde_json::to_string_pretty(value)
        .map(CallToolResult::text)
        .map_err(|e| ToolError::Internal(format!("Response serialization failed: {e}")))
}

/// Pretty JSON for a non-empty list, the fallback text for an empty one
pub(crate) fn list_or_fallback<T: Serialize>(
    items: &[T],
    fallback: &str,
) -> Result<CallToolResult, ToolError> {
    if items.is_empty() {
        return Ok(CallToolResult::text(fallback.to_owned()));
    }
    pretty_json(items)
}
