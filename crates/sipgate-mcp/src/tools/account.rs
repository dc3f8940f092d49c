// ABOUTME: MCP tools returning sipgate account details and the authenticated user's profile
// ABOUTME: Both render the provider record as pretty-printed JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use serde_json::{json, Value};
use sipgate::types::TelephonyProvider;

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{pretty_json, McpTool, ToolError};

/// Returns account-level information (company, product, verification)
pub struct GetAccountInfo;

#[async_trait]
impl McpTool for GetAccountInfo {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_account_info".to_owned(),
            description: "Get sipgate account information".to_owned(),
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
        let account = provider.account_info().await?;
        pretty_json(&account)
    }
}

/// Returns the profile of the user the credentials belong to
pub struct GetUserInfo;

#[async_trait]
impl McpTool for GetUserInfo {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_user_info".to_owned(),
            description: "Get the profile of the authenticated sipgate user".to_owned(),
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
        let profile = provider.user_profile(&user_id).await?;
        pretty_json(&profile)
    }
}
