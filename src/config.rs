// ABOUTME: Credential and client configuration for the sipgate REST API
// ABOUTME: Reads the token pair from the environment with an optional TOML file fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config-file")]
use std::path::{Path, PathBuf};

#[cfg(feature = "config-file")]
use serde::Deserialize;

use crate::types::ProviderError;

/// Environment variable holding the personal access token id
pub const TOKEN_ID_ENV: &str = "SIPGATE_TOKEN_ID";

/// Environment variable holding the personal access token
pub const TOKEN_ENV: &str = "SIPGATE_TOKEN";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SIPGATE_API_URL";

/// Production sipgate REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.sipgate.com/v2";

/// Default timeout for a single API request (30 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// sipgate personal access token pair
///
/// Both halves are opaque and forwarded as HTTP basic auth. Construction
/// fails when either is empty, so a `Credentials` value is always usable.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token_id: String,
    token: String,
}

impl Credentials {
    /// Build a credential pair, rejecting empty or whitespace-only halves
    pub fn new(token_id: impl Into<String>, token: impl Into<String>) -> Result<Self, ProviderError> {
        let token_id = token_id.into();
        let token = token.into();

        if token_id.trim().is_empty() {
            return Err(ProviderError::config(format!("{TOKEN_ID_ENV} must not be empty")));
        }
        if token.trim().is_empty() {
            return Err(ProviderError::config(format!("{TOKEN_ENV} must not be empty")));
        }

        Ok(Self { token_id, token })
    }

    /// Read the credential pair through a key lookup function
    ///
    /// The lookup receives [`TOKEN_ID_ENV`] and [`TOKEN_ENV`]. Missing keys
    /// are reported together so the operator can fix both at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_id = lookup(TOKEN_ID_ENV).filter(|v| !v.trim().is_empty());
        let token = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty());

        match (token_id, token) {
            (Some(token_id), Some(token)) => Self::new(token_id, token),
            (token_id, token) => {
                let missing: Vec<&str> = [
                    token_id.is_none().then_some(TOKEN_ID_ENV),
                    token.is_none().then_some(TOKEN_ENV),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(ProviderError::config(format!(
                    "Missing sipgate credentials: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Read the credential pair from the process environment
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Token id half of the pair
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Secret token half of the pair
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token_id", &self.token_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Configuration for a [`SipgateClient`](crate::client::SipgateClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Token pair used for basic auth
    pub credentials: Credentials,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Maximum time to wait for one API request
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration against the production API
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the client at a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Optional on-disk configuration, read when the environment is incomplete
///
/// ```toml
/// token_id = "token-ABC123"
/// token = "..."
/// api_url = "https://api.sipgate.com/v2"
/// ```
#[cfg(feature = "config-file")]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// Personal access token id
    pub token_id: Option<String>,
    /// Personal access token
    pub token: Option<String>,
    /// API base URL override
    pub api_url: Option<String>,
}

#[cfg(feature = "config-file")]
impl FileConfig {
    /// Parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| ProviderError::config(format!("Invalid config {}: {e}", path.display())))
    }

    /// Load the file at `path`, or at the default location when `None`
    ///
    /// A missing default file yields an empty configuration; an explicit
    /// path that does not exist is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ProviderError> {
        match path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Resolve an environment key against the file's values
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            TOKEN_ID_ENV => self.token_id.clone(),
            TOKEN_ENV => self.token.clone(),
            API_URL_ENV => self.api_url.clone(),
            _ => None,
        }
    }
}

/// Default config file location (`<config_dir>/sipgate-mcp/config.toml`)
#[cfg(feature = "config-file")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sipgate-mcp").join("config.toml"))
}
