// ABOUTME: MCP tool fetching recent calls, voicemails, faxes, and SMS from the sipgate history
// ABOUTME: Defaults to the ten newest entries of every type when no filter is given
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use serde_json::{json, Value};
use sipgate::types::{HistoryFilter, HistoryType, TelephonyProvider};

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{list_or_fallback, McpTool, ToolError};

/// Entries returned when the caller gives no `limit`
const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Returns recent history entries
pub struct GetCallHistory;

#[async_trait]
impl McpTool for GetCallHistory {
    fn definition(&self) -> ToolDefinition {
        let type_names: Vec<&str> = HistoryType::ALL.into_iter().map(HistoryType::as_str).collect();

        ToolDefinition {
            name: "get_call_history".to_owned(),
            description: "Get recent calls, voicemails, faxes, and SMS from the sipgate history"
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of entries to return",
                        "default": DEFAULT_HISTORY_LIMIT
                    },
                    "types": {
                        "type": "array",
                        "description": "History entry types to include",
                        "items": {
                            "type": "string",
                            "enum": type_names
                        }
                    }
                }
            }),
        }
    }

    async fn execute(
        &self,
        provider: &dyn TelephonyProvider,
        arguments: &Value,
    ) -> Result<CallToolResult, ToolError> {
        let filter = parse_filter(arguments)?;
        let entries = provider.fetch_history(&filter).await?;
        list_or_fallback(&entries, "No call history available")
    }
}

/// Build the history filter from tool arguments, applying defaults
fn parse_filter(arguments: &Value) -> Result<HistoryFilter, ToolError> {
    let limit = match arguments.get("limit") {
        None | Some(Value::Null) => DEFAULT_HISTORY_LIMIT,
        Some(value) => parse_limit(value)?,
    };

    let types = match arguments.get("types") {
        None | Some(Value::Null) => HistoryType::ALL.to_vec(),
        Some(Value::Array(items)) if items.is_empty() => HistoryType::ALL.to_vec(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| {
                        ToolError::InvalidArguments(format!(
                            "History type must be a string, got: {item}"
                        ))
                    })?
                    .parse::<HistoryType>()
                    .map_err(ToolError::InvalidArguments)
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(ToolError::InvalidArguments(format!(
                "'types' must be an array, got: {other}"
            )));
        }
    };

    Ok(HistoryFilter::all_types(limit).with_types(types))
}

fn parse_limit(value: &Value) -> Result<u32, ToolError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            ToolError::InvalidArguments(format!("'limit' must be a positive integer, got: {value}"))
        })
}
