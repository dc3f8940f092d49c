// ABOUTME: MCP tool sending an SMS through the authenticated user's first SMS extension
// ABOUTME: Strips whitespace from the recipient and prefixes replies with sender diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use serde_json::{json, Value};
use sipgate::records::SmsExtension;
use sipgate::types::{SmsRequest, TelephonyProvider};
use tracing::{debug, warn};

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{required_string, McpTool, ToolError};

/// Sends an SMS to a phone number
///
/// The sender is always the first SMS extension the provider lists for
/// the authenticated user. The caller's `smsId` is accepted for
/// compatibility but does not influence the choice.
pub struct SendSms;

#[async_trait]
impl McpTool for SendSms {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "send_sms".to_owned(),
            description: "Send an SMS message to a phone number".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "smsId": {
                        "type": "string",
                        "description": "SMS extension id (e.g. s0)"
                    },
                    "recipient": {
                        "type": "string",
                        "description": "Recipient phone number in E.164 format (e.g. +4915123456789)"
                    },
                    "message": {
                        "type": "string",
                        "description": "Message text"
                    }
                },
                "required": ["smsId", "recipient", "message"]
            }),
        }
    }

    fn required_arguments(&self) -> &'static [&'static str] {
        &["recipient", "message"]
    }

    async fn execute(
        &self,
        provider: &dyn TelephonyProvider,
        arguments: &Value,
    ) -> Result<CallToolResult, ToolError> {
        let requested_sms_id = arguments.get("smsId").and_then(Value::as_str);
        let recipient = strip_whitespace(required_string(arguments, "recipient")?);
        let message = required_string(arguments, "message")?;

        let user_id = provider.authenticated_user_id().await?;
        let extensions = provider.list_sms_extensions(&user_id).await?;
        let Some(extension) = extensions.into_iter().next() else {
            return Err(ToolError::Precondition(format!(
                "No SMS extensions available for user {user_id}"
            )));
        };

        if requested_sms_id.is_some_and(|id| id != extension.id) {
            debug!(
                requested = ?requested_sms_id,
                chosen = %extension.id,
                "Ignoring requested smsId in favour of the first extension"
            );
        }

        let diagnostics = diagnostics(&user_id, &extension);
        let request = SmsRequest {
            sms_id: extension.id,
            recipient,
            message: message.to_owned(),
        };

        match provider.send_sms(&request).await {
            Ok(()) => Ok(CallToolResult::text(format!(
                "{diagnostics}SMS sent successfully to {}",
                request.recipient
            ))),
            Err(e) => {
                warn!(recipient = %request.recipient, error = %e, "SMS delivery failed");
                Ok(CallToolResult::error(format!(
                    "{diagnostics}Failed to send SMS: {e}"
                )))
            }
        }
    }
}

/// Remove every whitespace character from a phone number
fn strip_whitespace(number: &str) -> String {
    number.chars().filter(|c| !c.is_whitespace()).collect()
}

fn diagnostics(user_id: &str, extension: &SmsExtension) -> String {
    format!(
        "Debug info:\n- Authenticated user ID: {user_id}\n- Using SMS extension: {} ({})\n\n",
        extension.id,
        extension.alias.as_deref().unwrap_or_default()
    )
}
