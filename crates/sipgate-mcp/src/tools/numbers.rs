// ABOUTME: MCP tool listing the phone numbers assigned to the sipgate account
// ABOUTME: Answers with a fixed sentence instead of an empty array when there are none
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use serde_json::{json, Value};
use sipgate::types::TelephonyProvider;

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{list_or_fallback, McpTool, ToolError};

/// Returns every phone number on the account
pub struct GetPhoneNumbers;

#[async_trait]
impl McpTool for GetPhoneNumbers {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_phone_numbers".to_owned(),
            description: "List all phone numbers assigned to the sipgate account".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn execute(
        &self,
        provider: &dyn TelephonyProvider,
        _arguments: &Value,
    ) -> Result<CallToolResult, ToolError> {
        let numbers = provider.list_numbers().await?;
        list_or_fallback(&numbers, "No phone numbers available")
    }
}
