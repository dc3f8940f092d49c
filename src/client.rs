// ABOUTME: reqwest-backed TelephonyProvider talking to the sipgate REST API v2
// ABOUTME: Handles basic auth, status-to-error mapping, and JSON decoding of list envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Credentials};
use crate::records::{
    Account, Device, HistoryEntry, Items, PhoneNumber, SmsExtension, UserInfo, UserProfile,
};
use crate::types::{
    CallRequest, HistoryFilter, ProviderError, SmsRequest, TelephonyProvider,
};

/// User agent sent with every API request
const USER_AGENT: &str = concat!("sipgate-mcp/", env!("CARGO_PKG_VERSION"));

/// Longest provider error body echoed back in error messages
const MAX_ERROR_BODY: usize = 512;

/// sipgate REST API client
///
/// One instance is shared for the process lifetime; the underlying
/// `reqwest::Client` pools connections across calls.
pub struct SipgateClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl SipgateClient {
    /// Build a client from the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            credentials: config.credentials,
        })
    }

    /// API base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .basic_auth(self.credentials.token_id(), Some(self.credentials.token()))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send a request and map transport failures and non-2xx statuses
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ProviderError> {
        let response = builder.send().await.map_err(|e| {
            warn!(path, error = %e, "sipgate request failed");
            ProviderError::network(format!("{path}: {e}"))
        })?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "sipgate response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, truncate(&body)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        decode(response, path).await
    }

    async fn get_items<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ProviderError> {
        let list: Items<T> = self.get_json(path).await?;
        Ok(list.items)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ProviderError> {
        self.send(self.request(Method::POST, path).json(body), path)
            .await
            .map(drop)
    }
}

#[async_trait]
impl TelephonyProvider for SipgateClient {
    async fn account_info(&self) -> Result<Account, ProviderError> {
        self.get_json("/account").await
    }

    async fn list_numbers(&self) -> Result<Vec<PhoneNumber>, ProviderError> {
        self.get_items("/numbers").await
    }

    async fn fetch_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<HistoryEntry>, ProviderError> {
        let path = "/history";
        let mut query: Vec<(&str, String)> = vec![("limit", filter.limit.to_string())];
        query.extend(filter.types.iter().map(|t| ("types", t.as_str().to_owned())));

        let builder = self.request(Method::GET, path).query(&query);
        let response = self.send(builder, path).await?;
        let list: Items<HistoryEntry> = decode(response, path).await?;
        Ok(list.items)
    }

    async fn list_devices(&self, webuser_id: &str) -> Result<Vec<Device>, ProviderError> {
        self.get_items(&format!("/{webuser_id}/devices")).await
    }

    async fn send_sms(&self, request: &SmsRequest) -> Result<(), ProviderError> {
        debug!(sms_id = %request.sms_id, recipient = %request.recipient, "Sending SMS");
        self.post_json("/sessions/sms", request).await
    }

    async fn initiate_call(&self, request: &CallRequest) -> Result<(), ProviderError> {
        debug!(caller = %request.caller, callee = %request.callee, "Initiating call");
        self.post_json("/sessions/calls", request).await
    }

    async fn authenticated_user_id(&self) -> Result<String, ProviderError> {
        let info: UserInfo = self.get_json("/authorization/userinfo").await?;
        if info.sub.is_empty() {
            return Err(ProviderError::decode(
                "/authorization/userinfo: response has no user id",
            ));
        }
        Ok(info.sub)
    }

    async fn list_sms_extensions(
        &self,
        webuser_id: &str,
    ) -> Result<Vec<SmsExtension>, ProviderError> {
        self.get_items(&format!("/{webuser_id}/sms")).await
    }

    async fn user_profile(&self, webuser_id: &str) -> Result<UserProfile, ProviderError> {
        self.get_json(&format!("/users/{webuser_id}")).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ProviderError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ProviderError::network(format!("{path}: failed to read body: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ProviderError::decode(format!("{path}: invalid JSON response: {e}")))
}

fn status_error(status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::auth_failure(format!(
            "sipgate rejected the credentials (HTTP {})",
            status.as_u16()
        )),
        s if s.is_client_error() => ProviderError::rejected(s.as_u16(), body),
        s => ProviderError::external_service(s.as_u16(), body),
    }
}

fn truncate(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HistoryType, ProviderErrorKind};
    use mockito::Matcher;

    /// `base64("token-1:secret")`
    const AUTH_HEADER: &str = "Basic dG9rZW4tMTpzZWNyZXQ=";

    fn client_for(server: &mockito::ServerGuard) -> SipgateClient {
        let creds = Credentials::new("token-1", "secret").expect("credentials");
        let config = ClientConfig::new(creds).with_base_url(server.url());
        SipgateClient::new(config).expect("client")
    }

    #[tokio::test]
    async fn account_info_sends_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/account")
            .match_header("authorization", AUTH_HEADER)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"company":"ACME","mainProductType":"TEAM","verified":true}"#)
            .create_async()
            .await;

        let account = client_for(&server).account_info().await.expect("account");
        assert_eq!(account.company.as_deref(), Some("ACME"));
        assert_eq!(account.verified, Some(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn history_passes_limit_and_types() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/history")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "5".into()),
                Matcher::UrlEncoded("types".into(), "SMS".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"items":[{"id":"h1","type":"SMS"}],"totalCount":1}"#)
            .create_async()
            .await;

        let filter = HistoryFilter::all_types(5).with_types(vec![HistoryType::Sms]);
        let entries = client_for(&server)
            .fetch_history(&filter)
            .await
            .expect("history");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, HistoryType::Sms);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn user_id_comes_from_userinfo_sub() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/authorization/userinfo")
            .with_status(200)
            .with_body(r#"{"sub":"w0","domain":"api.sipgate.com","masterSipId":"1234567","locale":"de_DE"}"#)
            .create_async()
            .await;

        let id = client_for(&server)
            .authenticated_user_id()
            .await
            .expect("user id");
        assert_eq!(id, "w0");
    }

    #[tokio::test]
    async fn send_sms_posts_session_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/sessions/sms")
            .match_body(Matcher::Json(serde_json::json!({
                "smsId": "s0",
                "recipient": "+4915123456789",
                "message": "hello"
            })))
            .with_status(204)
            .create_async()
            .await;

        let request = SmsRequest {
            sms_id: "s0".to_owned(),
            recipient: "+4915123456789".to_owned(),
            message: "hello".to_owned(),
        };
        client_for(&server).send_sms(&request).await.expect("sent");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn initiate_call_omits_absent_caller_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/sessions/calls")
            .match_body(Matcher::Json(serde_json::json!({
                "caller": "e0",
                "callee": "+4915123456789"
            })))
            .with_status(200)
            .with_body(r#"{"sessionId":"abc"}"#)
            .create_async()
            .await;

        let request = CallRequest {
            caller: "e0".to_owned(),
            callee: "+4915123456789".to_owned(),
            caller_id: None,
        };
        client_for(&server).initiate_call(&request).await.expect("call");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_endpoints_unwrap_items() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/numbers")
            .with_status(200)
            .with_body(r#"{"items":[{"id":"n1","number":"+4921100000","type":"LANDLINE"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/w0/devices")
            .with_status(200)
            .with_body(r#"{"items":[{"id":"e0","alias":"Desk","type":"REGISTER","online":true}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/w0/sms")
            .with_status(200)
            .with_body(r#"{"items":[{"id":"s0","alias":"SMS","callerId":"+4915100000"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/users/w0")
            .with_status(200)
            .with_body(r#"{"id":"w0","firstname":"Ada","lastname":"Lovelace","email":"ada@example.com"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let numbers = client.list_numbers().await.expect("numbers");
        assert_eq!(numbers[0].number_type.as_deref(), Some("LANDLINE"));
        let devices = client.list_devices("w0").await.expect("devices");
        assert_eq!(devices[0].online, Some(true));
        let extensions = client.list_sms_extensions("w0").await.expect("sms");
        assert_eq!(extensions[0].id, "s0");
        let profile = client.user_profile("w0").await.expect("profile");
        assert_eq!(profile.firstname.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/numbers")
            .with_status(401)
            .create_async()
            .await;

        let err = client_for(&server).list_numbers().await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::AuthFailure);
    }

    #[tokio::test]
    async fn client_error_keeps_provider_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/sessions/calls")
            .with_status(400)
            .with_body("callee is not a valid number")
            .create_async()
            .await;

        let request = CallRequest {
            caller: "e0".to_owned(),
            callee: "nope".to_owned(),
            caller_id: None,
        };
        let err = client_for(&server).initiate_call(&request).await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Rejected);
        assert!(err.message.contains("callee is not a valid number"));
    }

    #[tokio::test]
    async fn server_error_maps_to_external_service() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/w0/devices")
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).list_devices("w0").await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::ExternalService);
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/w0")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = client_for(&server).user_profile("w0").await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Decode);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "ä".repeat(MAX_ERROR_BODY);
        let cut = truncate(&body);
        assert!(cut.len() <= MAX_ERROR_BODY);
        assert!(body.starts_with(cut));
    }
}
