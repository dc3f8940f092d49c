// ABOUTME: In-memory TelephonyProvider double shared by the MCP integration tests
// ABOUTME: Serves mutable canned records, counts calls, and records outgoing requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use sipgate::records::{Account, Device, HistoryEntry, PhoneNumber, SmsExtension, UserProfile};
use sipgate::types::{
    CallRequest, HistoryFilter, HistoryType, ProviderError, SmsRequest, TelephonyProvider,
};
use sipgate_mcp::protocol::JsonRpcRequest;
use sipgate_mcp::McpServer;

/// Canned provider data, editable between requests
#[derive(Default)]
pub struct FakeData {
    pub account: Account,
    pub numbers: Vec<PhoneNumber>,
    pub history: Vec<HistoryEntry>,
    pub devices: Vec<Device>,
    pub extensions: Vec<SmsExtension>,
    pub profile: UserProfile,
    /// When set, every provider call fails with this error
    pub fail_with: Option<ProviderError>,
    /// When set, only `send_sms` fails with this error
    pub sms_fails_with: Option<ProviderError>,
}

/// Provider double counting every call it receives
#[derive(Default)]
pub struct FakeProvider {
    pub data: Mutex<FakeData>,
    pub calls: AtomicUsize,
    pub sent_sms: Mutex<Vec<SmsRequest>>,
    pub placed_calls: Mutex<Vec<CallRequest>>,
    pub history_filters: Mutex<Vec<HistoryFilter>>,
    pub devices_requested_for: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        let provider = Self::default();
        {
            let mut data = provider.data.lock().expect("lock");
            data.account = account("ACME");
            data.numbers = vec![number("+4921100000001")];
            data.history = vec![history("h1", HistoryType::Call)];
            data.devices = vec![device("e0")];
            data.extensions = vec![extension("s0", "Office")];
            data.profile = UserProfile {
                id: "w0".to_owned(),
                firstname: Some("Ada".to_owned()),
                lastname: Some("Lovelace".to_owned()),
                ..UserProfile::default()
            };
        }
        Arc::new(provider)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn edit(&self, f: impl FnOnce(&mut FakeData)) {
        f(&mut self.data.lock().expect("lock"));
    }

    fn enter(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.data.lock().expect("lock").fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&FakeData) -> T) -> T {
        f(&self.data.lock().expect("lock"))
    }
}

#[async_trait]
impl TelephonyProvider for FakeProvider {
    async fn account_info(&self) -> Result<Account, ProviderError> {
        self.enter()?;
        Ok(self.read(|d| d.account.clone()))
    }

    async fn list_numbers(&self) -> Result<Vec<PhoneNumber>, ProviderError> {
        self.enter()?;
        Ok(self.read(|d| d.numbers.clone()))
    }

    async fn fetch_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryEntry>, ProviderError> {
        self.enter()?;
        self.history_filters
            .lock()
            .expect("lock")
            .push(filter.clone());
        Ok(self.read(|d| d.history.clone()))
    }

    async fn list_devices(&self, webuser_id: &str) -> Result<Vec<Device>, ProviderError> {
        self.enter()?;
        self.devices_requested_for
            .lock()
            .expect("lock")
            .push(webuser_id.to_owned());
        Ok(self.read(|d| d.devices.clone()))
    }

    async fn send_sms(&self, request: &SmsRequest) -> Result<(), ProviderError> {
        self.enter()?;
        if let Some(err) = self.read(|d| d.sms_fails_with.clone()) {
            return Err(err);
        }
        self.sent_sms.lock().expect("lock").push(request.clone());
        Ok(())
    }

    async fn initiate_call(&self, request: &CallRequest) -> Result<(), ProviderError> {
        self.enter()?;
        self.placed_calls.lock().expect("lock").push(request.clone());
        Ok(())
    }

    async fn authenticated_user_id(&self) -> Result<String, ProviderError> {
        self.enter()?;
        Ok("w0".to_owned())
    }

    async fn list_sms_extensions(
        &self,
        _webuser_id: &str,
    ) -> Result<Vec<SmsExtension>, ProviderError> {
        self.enter()?;
        Ok(self.read(|d| d.extensions.clone()))
    }

    async fn user_profile(&self, _webuser_id: &str) -> Result<UserProfile, ProviderError> {
        self.enter()?;
        Ok(self.read(|d| d.profile.clone()))
    }
}

pub fn account(company: &str) -> Account {
    Account {
        company: Some(company.to_owned()),
        main_product_type: Some("TEAM".to_owned()),
        verified: Some(true),
        ..Account::default()
    }
}

pub fn number(e164: &str) -> PhoneNumber {
    PhoneNumber {
        id: format!("n-{e164}"),
        number: Some(e164.to_owned()),
        localized: Some(e164.to_owned()),
        number_type: Some("LANDLINE".to_owned()),
        ..PhoneNumber::default()
    }
}

pub fn history(id: &str, entry_type: HistoryType) -> HistoryEntry {
    HistoryEntry {
        id: id.to_owned(),
        entry_type,
        created: Some("2026-10-01T09:30:00Z".to_owned()),
        direction: Some("INCOMING".to_owned()),
        source: Some("+4915100000000".to_owned()),
        target: Some("+4921100000001".to_owned()),
        extra: serde_json::Map::new(),
    }
}

pub fn device(id: &str) -> Device {
    Device {
        id: id.to_owned(),
        alias: Some(format!("Device {id}")),
        device_type: Some("REGISTER".to_owned()),
        online: Some(true),
        ..Device::default()
    }
}

pub fn extension(id: &str, alias: &str) -> SmsExtension {
    SmsExtension {
        id: id.to_owned(),
        alias: Some(alias.to_owned()),
        caller_id: Some("+4921100000001".to_owned()),
    }
}

pub fn server_with(provider: &Arc<FakeProvider>) -> McpServer {
    McpServer::new(Arc::clone(provider) as Arc<dyn TelephonyProvider>)
}

/// Send a JSON-RPC request and return the serialized response
pub async fn rpc(server: &McpServer, method: &str, params: Value) -> Value {
    let request: JsonRpcRequest = serde_json::from_value(serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    }))
    .expect("request");
    let response = server.handle_request(request).await.expect("response");
    serde_json::to_value(response).expect("serialize")
}

/// Invoke a tool and return the serialized response
pub async fn call_tool(server: &McpServer, name: &str, arguments: Value) -> Value {
    rpc(
        server,
        "tools/call",
        serde_json::json!({"name": name, "arguments": arguments}),
    )
    .await
}

/// Text of the first content part of a tool result
pub fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content")
}

/// Whether a tool result carries `isError: true`
pub fn tool_is_error(response: &Value) -> bool {
    response["result"]["isError"] == Value::Bool(true)
}

/// JSON-RPC error code of a response, if any
pub fn error_code(response: &Value) -> Option<i64> {
    response["error"]["code"].as_i64()
}
