// ABOUTME: MCP tool starting a sipgate click-to-dial call session
// ABOUTME: Confirms the request only; call progress is not tracked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use serde_json::{json, Value};
use sipgate::types::{CallRequest, TelephonyProvider};

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{required_string, string_argument, McpTool, ToolError};

/// Starts a call between a device or number and a callee
pub struct InitiateCall;

#[async_trait]
impl McpTool for InitiateCall {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "initiate_call".to_owned(),
            description: "Initiate a phone call from a device or number to a callee".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "from": {
                        "type": "string",
                        "description": "Caller device id (e.g. e0) or phone number"
                    },
                    "to": {
                        "type": "string",
                        "description": "Callee phone number"
                    },
                    "callerId": {
                        "type": "string",
                        "description": "Number to present to the callee"
                    }
                },
                "required": ["from", "to"]
            }),
        }
    }

    fn required_arguments(&self) -> &'static [&'static str] {
        &["from", "to"]
    }

    async fn execute(
        &self,
        provider: &dyn TelephonyProvider,
        arguments: &Value,
    ) -> Result<CallToolResult, ToolError> {
        let request = CallRequest {
            caller: required_string(arguments, "from")?.to_owned(),
            callee: required_string(arguments, "to")?.to_owned(),
            caller_id: string_argument(arguments, "callerId")?
                .filter(|id| !id.trim().is_empty())
                .map(ToOwned::to_owned),
        };

        provider.initiate_call(&request).await?;

        let mut text = format!(
            "Call initiated from {} to {}",
            request.caller, request.callee
        );
        if let Some(caller_id) = &request.caller_id {
            text.push_str(&format!(" with caller ID {caller_id}"));
        }
        Ok(CallToolResult::text(text))
    }
}
