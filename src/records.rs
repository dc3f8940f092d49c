// ABOUTME: Response records returned by the sipgate REST API
// ABOUTME: Optional camelCase fields plus flattened maps so provider JSON passes through unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::HistoryType;

/// Account-level information (`GET /account`)
///
/// Fields the provider omits or sends as `null` stay absent when the
/// record is serialized again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    /// Company name registered on the account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Product the account is subscribed to (e.g. `TEAM`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_product_type: Option<String>,
    /// Company logo URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Whether the account has been verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A phone number assigned to the account (`GET /numbers`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneNumber {
    /// Number id
    pub id: String,
    /// Number in E.164 form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Number formatted for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized: Option<String>,
    /// Number kind (`LANDLINE`, `MOBILE`, `QUICKDIAL`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub number_type: Option<String>,
    /// Extension the number routes to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    /// Alias of the routed extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_alias: Option<String>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One call, voicemail, fax, or SMS entry (`GET /history`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Entry id
    pub id: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub entry_type: HistoryType,
    /// Creation timestamp (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// `INCOMING`, `OUTGOING`, or `MISSED_INCOMING` and friends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Originating number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Destination number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A device registered to a web user (`GET /{userId}/devices`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    /// Device id (e.g. `e0`, `x1`)
    pub id: String,
    /// Display alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Device kind (`REGISTER`, `MOBILE`, `EXTERNAL`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    /// Whether the device is currently online
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    /// Whether do-not-disturb is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnd: Option<bool>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An SMS-capable extension of a web user (`GET /{userId}/sms`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsExtension {
    /// Extension id (e.g. `s0`)
    pub id: String,
    /// Display alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Number presented to recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
}

/// A web user's profile (`GET /users/{userId}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Web user id (e.g. `w0`)
    pub id: String,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// Login email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Device that rings by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_device: Option<String>,
    /// Whether the user has admin rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identity of the authenticated credentials (`GET /authorization/userinfo`)
///
/// Only the web user id is read; `domain`, `masterSipId` and `locale`
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct UserInfo {
    /// Web user id the credentials belong to
    pub sub: String,
}

/// Envelope sipgate wraps list responses in
#[derive(Debug, Deserialize)]
pub(crate) struct Items<T> {
    /// Listed records
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
