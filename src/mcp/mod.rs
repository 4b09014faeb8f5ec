// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

/// MCP client that drives a server process over stdio.
mod client;
/// MCP server implementation over stdin/stdout.
mod server;
/// MCP type definitions and JSON-RPC messages.
mod types;

pub use client::{McpClient, RpcError};
pub use server::{McpServer, ResourceError, ResourceHandler, SERVER_NAME, ToolHandler};
pub use types::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, Implementation,
    InitializeParams, InitializeResult, ListResourceTemplatesResult, ListResourcesResult,
    ListToolsResult, METHOD_NOT_FOUND, Notification, PROTOCOL_VERSION, ReadResourceParams,
    ReadResourceResult, Request, RequestId, Resource, ResourceContents, ResourcesCapability,
    Response, ResponseError, ServerCapabilities, Tool, ToolContent, ToolsCapability,
};
