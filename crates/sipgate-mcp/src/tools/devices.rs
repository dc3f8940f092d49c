// ABOUTME: MCP tool listing the devices registered to the authenticated sipgate user
// ABOUTME: Resolves the user id first, then lists that user's devices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use serde_json::{json, Value};
use sipgate::types::TelephonyProvider;
use tracing::debug;

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{list_or_fallback, McpTool, ToolError};

/// Returns the devices of the authenticated user
pub struct GetDevices;

#[async_trait]
impl McpTool for GetDevices {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_devices".to_owned(),
            description: "List the devices registered to the authenticated sipgate user"
                .to_owned(),
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
        let user_id = provider.authenticated_user_id().await?;
        let devices = provider.list_devices(&user_id).await?;
        debug!(user_id = %user_id, count = devices.len(), "Listed devices");
        list_or_fallback(&devices, "No devices available")
    }
}
