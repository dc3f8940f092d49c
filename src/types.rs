// ABOUTME: Core types for the sipgate client: error type, request types, and provider trait
// ABOUTME: Defines the TelephonyProvider capability interface consumed by the MCP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

//! # Core Types
//!
//! Self-contained definitions of the telephony capability contract.
//! The MCP server only ever talks to a [`TelephonyProvider`]; the HTTP
//! client in [`crate::client`] is one implementation of it.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::records::{Account, Device, HistoryEntry, PhoneNumber, SmsExtension, UserProfile};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for sipgate provider operations
#[derive(Debug, Clone)]
pub struct ProviderError {
    /// Error category
    pub kind: ProviderErrorKind,
    /// Human-readable error message
    pub message: String,
}

/// Categories of errors produced by a telephony provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Connection failure, DNS failure, or request timeout
    Network,
    /// Credentials rejected (HTTP 401/403)
    AuthFailure,
    /// Request rejected by the provider (other HTTP 4xx)
    Rejected,
    /// Provider-side failure (HTTP 5xx or unexpected status)
    ExternalService,
    /// Response body could not be decoded
    Decode,
    /// Invalid local configuration (credentials, base URL)
    Config,
}

impl ProviderError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Network,
            message: message.into(),
        }
    }

    /// Create an auth failure error
    pub fn auth_failure(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::AuthFailure,
            message: message.into(),
        }
    }

    /// Create a rejection error carrying the HTTP status and provider body
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Rejected,
            message: format!("HTTP {status}: {}", body.into()),
        }
    }

    /// Create an external service error
    pub fn external_service(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::ExternalService,
            message: format!("HTTP {status}: {}", body.into()),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Decode,
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Config,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ProviderError {}

// ============================================================================
// History Filter
// ============================================================================

/// Kinds of entries in the sipgate call history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryType {
    /// Voice call
    Call,
    /// Voicemail recording
    Voicemail,
    /// Fax transmission
    Fax,
    /// Text message
    Sms,
}

impl HistoryType {
    /// Every history type, in the order sipgate documents them
    pub const ALL: [Self; 4] = [Self::Call, Self::Voicemail, Self::Fax, Self::Sms];

    /// Wire name used in query strings and JSON
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "CALL",
            Self::Voicemail => "VOICEMAIL",
            Self::Fax => "FAX",
            Self::Sms => "SMS",
        }
    }
}

impl fmt::Display for HistoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CALL" => Ok(Self::Call),
            "VOICEMAIL" => Ok(Self::Voicemail),
            "FAX" => Ok(Self::Fax),
            "SMS" => Ok(Self::Sms),
            other => Err(format!(
                "Unknown history type: {other}. Valid: CALL, VOICEMAIL, FAX, SMS"
            )),
        }
    }
}

/// Filter applied to a history fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Maximum number of entries to return
    pub limit: u32,
    /// Entry types to include
    pub types: Vec<HistoryType>,
}

impl HistoryFilter {
    /// Filter for the newest `limit` entries of every type
    pub fn all_types(limit: u32) -> Self {
        Self {
            limit,
            types: HistoryType::ALL.to_vec(),
        }
    }

    /// Restrict the filter to the given entry types
    pub fn with_types(mut self, types: Vec<HistoryType>) -> Self {
        self.types = types;
        self
    }
}

// ============================================================================
// Session Requests
// ============================================================================

/// Outgoing SMS session request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    /// SMS extension id used as the sender (e.g. `s0`)
    pub sms_id: String,
    /// Recipient phone number in E.164 form
    pub recipient: String,
    /// Message body
    pub message: String,
}

/// Click-to-dial call session request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Originating device id or phone number
    pub caller: String,
    /// Destination phone number
    pub callee: String,
    /// Number presented to the callee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Telephony capability interface
///
/// Every operation the MCP server needs from sipgate, as plain async
/// functions with typed results. Implementations perform at most one
/// outbound request per call and never retry.
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// Fetch the account record for the authenticated credentials
    async fn account_info(&self) -> Result<Account, ProviderError>;

    /// List every phone number on the account
    async fn list_numbers(&self) -> Result<Vec<PhoneNumber>, ProviderError>;

    /// Fetch history entries, newest first as ordered by the provider
    async fn fetch_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryEntry>, ProviderError>;

    /// List the devices registered to a web user
    async fn list_devices(&self, webuser_id: &str) -> Result<Vec<Device>, ProviderError>;

    /// Send an SMS through the given extension
    async fn send_sms(&self, request: &SmsRequest) -> Result<(), ProviderError>;

    /// Start a click-to-dial call session
    async fn initiate_call(&self, request: &CallRequest) -> Result<(), ProviderError>;

    /// Resolve the web user id the credentials belong to
    async fn authenticated_user_id(&self) -> Result<String, ProviderError>;

    /// List the SMS-capable extensions of a web user
    async fn list_sms_extensions(
        &self,
        webuser_id: &str,
    ) -> Result<Vec<SmsExtension>, ProviderError>;

    /// Fetch the profile of a web user
    async fn user_profile(&self, webuser_id: &str) -> Result<UserProfile, ProviderError>;
}
