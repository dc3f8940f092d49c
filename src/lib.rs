// ABOUTME: Async client library for the sipgate telephony REST API
// ABOUTME: Re-exports the TelephonyProvider trait, typed records, and the reqwest-based client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

//! # sipgate: typed telephony API client
//!
//! Presents the sipgate REST API v2 as a [`TelephonyProvider`](types::TelephonyProvider):
//! account info, phone numbers, call history, devices, SMS extensions,
//! user profiles, and SMS / click-to-dial call sessions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sipgate::{ClientConfig, Credentials, SipgateClient};
//! use sipgate::types::TelephonyProvider;
//!
//! # async fn example() -> Result<(), sipgate::types::ProviderError> {
//! let credentials = Credentials::from_env()?;
//! let client = SipgateClient::new(ClientConfig::new(credentials))?;
//! let account = client.account_info().await?;
//! println!("{:?}", account.company);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: `TelephonyProvider` trait, request types, history filter, errors
//! - [`records`]: Response records (account, numbers, history, devices, users)
//! - [`config`]: Credentials and client configuration
//! - [`client`]: reqwest-based `TelephonyProvider` implementation

/// Core types: provider trait, requests, filters, and errors
pub mod types;

/// Typed sipgate API response records
pub mod records;
/// Credentials and client configuration
pub mod config;
/// HTTP client for the sipgate REST API
pub mod client;

pub use client::SipgateClient;
pub use config::{ClientConfig, Credentials};
