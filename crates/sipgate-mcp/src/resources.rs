// ABOUTME: Resource resolver mapping the fixed sipgate:// uris to provider calls
// ABOUTME: Memoizes the first successful read of each uri for the rest of the process lifetime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use sipgate::types::{HistoryFilter, ProviderError, TelephonyProvider};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::protocol::{McpError, ReadResourceResult, ResourceDefinition, JSON_MIME_TYPE};

/// Number of entries served by `sipgate://history`
const HISTORY_RESOURCE_LIMIT: u32 = 20;

/// Resources exposed by this server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceUri {
    /// `sipgate://account`
    Account,
    /// `sipgate://numbers`
    Numbers,
    /// `sipgate://history`
    History,
    /// `sipgate://devices`
    Devices,
}

impl ResourceUri {
    /// All resources, in listing order
    pub const ALL: [Self; 4] = [Self::Account, Self::Numbers, Self::History, Self::Devices];

    /// Wire identifier of the resource
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "sipgate://account",
            Self::Numbers => "sipgate://numbers",
            Self::History => "sipgate://history",
            Self::Devices => "sipgate://devices",
        }
    }

    /// Look up a resource by its exact uri
    pub fn parse(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == uri)
    }

    /// Descriptor returned from `resources/list`
    pub fn definition(self) -> ResourceDefinition {
        let (name, description) = match self {
            Self::Account => ("Account Information", "sipgate account details"),
            Self::Numbers => ("Phone Numbers", "Phone numbers assigned to the account"),
            Self::History => ("Call History", "The 20 most recent calls, voicemails, faxes and SMS"),
            Self::Devices => ("Devices", "Devices registered to the authenticated user"),
        };
        ResourceDefinition {
            uri: self.as_str().to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            mime_type: JSON_MIME_TYPE.to_owned(),
        }
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves resource reads against the provider
///
/// The first successful read of each resource is cached and served
/// verbatim for the rest of the process lifetime. Entries are never
/// evicted or refreshed, so provider-side changes made after the first
/// read stay invisible until restart. Failed reads cache nothing.
pub struct ResourceResolver {
    provider: Arc<dyn TelephonyProvider>,
    cache: RwLock<HashMap<ResourceUri, Value>>,
}

impl ResourceResolver {
    /// Create a resolver with an empty cache
    pub fn new(provider: Arc<dyn TelephonyProvider>) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Every resource descriptor, in fixed order
    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        ResourceUri::ALL.into_iter().map(ResourceUri::definition).collect()
    }

    /// Read a resource as pretty-printed JSON
    ///
    /// Unknown uris fail with `InvalidRequest` before any provider call;
    /// provider failures fail with `InternalError`.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let resource = ResourceUri::parse(uri)
            .ok_or_else(|| McpError::invalid_request(format!("Unknown resource: {uri}")))?;

        let cached = self.cache.read().await.get(&resource).cloned();
        let value = if let Some(value) = cached {
            debug!(%resource, "Serving resource from cache");
            value
        } else {
            let value = self.fetch(resource).await.map_err(|e| {
                warn!(%resource, error = %e, "Resource read failed");
                McpError::internal(format!("Failed to read resource {resource}: {e}"))
            })?;
            // Concurrent first reads may both land here; the last insert wins.
            self.cache.write().await.insert(resource, value.clone());
            value
        };

        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| McpError::internal(format!("Resource serialization failed: {e}")))?;
        Ok(ReadResourceResult::json(resource.as_str(), text))
    }

    async fn fetch(&self, resource: ResourceUri) -> Result<Value, ProviderError> {
        debug!(%resource, "Fetching resource from provider");
        match resource {
            ResourceUri::Account => to_value(&self.provider.account_info().await?),
            ResourceUri::Numbers => to_value(&self.provider.list_numbers().await?),
            ResourceUri::History => {
                let filter = HistoryFilter::all_types(HISTORY_RESOURCE_LIMIT);
                to_value(&self.provider.fetch_history(&filter).await?)
            }
            ResourceUri::Devices => {
                let user_id = self.provider.authenticated_user_id().await?;
                to_value(&self.provider.list_devices(&user_id).await?)
            }
        }
    }
}

fn to_value<T: serde::Serialize>(record: &T) -> Result<Value, ProviderError> {
    serde_json::to_value(record)
        .map_err(|e| ProviderError::decode(format!("Failed to encode provider record: {e}")))
}
