// ABOUTME: Library surface of the sipgate MCP server for embedding and integration tests
// ABOUTME: Exposes the protocol types, request router, resources, tools, and transports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

//! # sipgate-mcp
//!
//! Model Context Protocol server exposing a
//! [`TelephonyProvider`](sipgate::types::TelephonyProvider) as four
//! read-only resources and seven tools.

/// JSON-RPC and MCP wire types
pub mod protocol;
/// Cached `sipgate://` resource resolution
pub mod resources;
/// JSON-RPC method routing
pub mod server;
/// Tool registry and handlers
pub mod tools;
/// Transport backends
pub mod transport;

pub use server::McpServer;
