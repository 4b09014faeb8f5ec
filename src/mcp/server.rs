// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! MCP server implementation.

use anyhow::{Context, Result, anyhow};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

use super::types::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, Implementation,
    InitializeParams, InitializeResult, ListResourceTemplatesResult, ListResourcesResult,
    ListToolsResult, METHOD_NOT_FOUND, Notification, PROTOCOL_VERSION, ReadResourceParams,
    ReadResourceResult, Request, Resource, ResourcesCapability, Response, ServerCapabilities,
    Tool, ToolsCapability,
};

/// Name reported in the `initialize` handshake.
pub const SERVER_NAME: &str = "genshin-impact-guide";

const INSTRUCTIONS: &str = "Genshin Impact character guide. Use get_character_info, \
get_character_builds, get_team_compositions or create_build_guide with a character name \
(e.g. 'mavuika'), or read the genshin://characters, genshin://builds and genshin://teams \
resources for the raw tables.";

/// Trait for handling MCP tool calls.
pub trait ToolHandler: Send + Sync {
    /// Returns the list of available tools.
    fn list_tools(&self) -> Vec<Tool>;

    /// Handles a tool call and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be interpreted. The server
    /// reports it to the caller as a tool result with `isError` set.
    fn call_tool(&self, name: &str, arguments: Option<serde_json::Value>)
    -> Result<CallToolResult>;
}

/// Trait for serving MCP resources.
pub trait ResourceHandler: Send + Sync {
    /// Returns the list of available resources.
    fn list_resources(&self) -> Vec<Resource>;

    /// Reads a resource by URI.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] or [`ResourceError::InvalidUri`]
    /// for URIs the handler does not serve.
    fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError>;
}

/// Errors raised while reading a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource is registered under this URI.
    #[error("Unknown resource: {0}")]
    NotFound(String),
    /// The URI could not be parsed.
    #[error("Invalid resource URI '{uri}': {source}")]
    InvalidUri {
        /// The URI as submitted.
        uri: String,
        /// The parse failure.
        source: url::ParseError,
    },
    /// The resource exists but could not be rendered.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ResourceError {
    /// The JSON-RPC error code reported for this error.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::NotFound(_) | Self::InvalidUri { .. } => INVALID_PARAMS,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }
}

/// MCP server that communicates over line-delimited JSON-RPC.
pub struct McpServer<H: ToolHandler + ResourceHandler> {
    handler: H,
    initialized: bool,
}

impl<H: ToolHandler + ResourceHandler> McpServer<H> {
    /// Creates a server that dispatches to `handler`.
    pub const fn new(handler: H) -> Self {
        Self {
            handler,
            initialized: false,
        }
    }

    /// Runs the MCP server, reading from stdin and writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or stdout cannot be written.
    pub fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serves requests from `input` until it is exhausted, writing one
    /// response line per request to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn serve(&mut self, mut input: impl BufRead, mut output: impl Write) -> Result<()> {
        info!("MCP server starting, waiting for requests on stdin");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("Failed to read from stdin")?;
            if read == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(['\r', '\n']),
                Err(e) => {
                    warn!("Skipping line that is not valid UTF-8: {}", e);
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            trace!("Received: {}", line);

            match self.handle_message(line) {
                Ok(Some(response)) => write_response(&mut output, &response)?,
                Ok(None) => {
                    // Notification, no response needed
                }
                Err(e) => {
                    error!("Error handling message: {}", e);
                    if let Ok(req) = serde_json::from_str::<Request>(line) {
                        let response = Response::error(req.id, INTERNAL_ERROR, e.to_string());
                        write_response(&mut output, &response)?;
                    }
                }
            }
        }

        info!("MCP server shutting down (stdin closed)");
        Ok(())
    }

    fn handle_message(&mut self, line: &str) -> Result<Option<Response>> {
        if let Ok(request) = serde_json::from_str::<Request>(line) {
            let response = self.handle_request(request)?;
            return Ok(Some(response));
        }

        if let Ok(notification) = serde_json::from_str::<Notification>(line) {
            self.handle_notification(&notification);
            return Ok(None);
        }

        Err(anyhow!(
            "Failed to parse message as request or notification"
        ))
    }

    fn handle_request(&self, request: Request) -> Result<Response> {
        debug!("Handling request: {} (id={:?})", request.method, request.id);

        if !self.initialized && request.method != "initialize" && request.method != "ping" {
            debug!("Request {} arrived before initialization", request.method);
        }

        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            "resources/list" => self.handle_resources_list(request),
            "resources/read" => self.handle_resources_read(request),
            "resources/templates/list" => Ok(Response::success(
                request.id,
                ListResourceTemplatesResult::default(),
            )?),
            "ping" => Ok(Response::success(request.id, serde_json::json!({}))?),
            _ => {
                warn!("Unknown method: {}", request.method);
                Ok(Response::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    format!("Unknown method: {}", request.method),
                ))
            }
        }
    }

    fn handle_notification(&mut self, notification: &Notification) {
        debug!("Handling notification: {}", notification.method);

        match notification.method.as_str() {
            "notifications/initialized" => {
                info!("MCP client initialized");
                self.initialized = true;
            }
            "notifications/cancelled" => {
                debug!("Request cancelled");
            }
            _ => {
                debug!("Ignoring unknown notification: {}", notification.method);
            }
        }
    }

    fn handle_initialize(request: Request) -> Result<Response> {
        let params: InitializeParams = request
            .params
            .map(serde_json::from_value)
            .transpose()
            .context("Invalid initialize params")?
            .ok_or_else(|| anyhow!("Missing initialize params"))?;

        info!(
            "MCP client connecting: {} v{}",
            params.client_info.name,
            params.client_info.version.as_deref().unwrap_or("unknown")
        );
        info!("Protocol version: {}", params.protocol_version);

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
                resources: Some(ResourcesCapability {
                    subscribe: None,
                    list_changed: None,
                }),
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: Some(env!("GENSHIN_GUIDE_VERSION").to_string()),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };

        Ok(Response::success(request.id, result)?)
    }

    fn handle_tools_list(&self, request: Request) -> Result<Response> {
        let tools = self.handler.list_tools();
        debug!("Listing {} tools", tools.len());

        Ok(Response::success(request.id, ListToolsResult { tools })?)
    }

    fn handle_tools_call(&self, request: Request) -> Result<Response> {
        let params: CallToolParams = match request.params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return Ok(Response::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("Invalid tools/call params: {e}"),
                ));
            }
            None => {
                return Ok(Response::error(
                    request.id,
                    INVALID_PARAMS,
                    "Missing tools/call params",
                ));
            }
        };

        debug!("Calling tool: {}", params.name);

        match self.handler.call_tool(&params.name, params.arguments) {
            Ok(result) => Ok(Response::success(request.id, result)?),
            Err(e) => {
                error!("Tool call failed: {:#}", e);
                Ok(Response::success(
                    request.id,
                    CallToolResult::error(format!("{e:#}")),
                )?)
            }
        }
    }

    fn handle_resources_list(&self, request: Request) -> Result<Response> {
        let resources = self.handler.list_resources();
        debug!("Listing {} resources", resources.len());

        Ok(Response::success(
            request.id,
            ListResourcesResult { resources },
        )?)
    }

    fn handle_resources_read(&self, request: Request) -> Result<Response> {
        let params: Option<ReadResourceParams> = match request.params.map(serde_json::from_value)
        {
            None => None,
            Some(Ok(params)) => Some(params),
            Some(Err(e)) => {
                return Ok(Response::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("Invalid resources/read params: {e}"),
                ));
            }
        };
        let Some(params) = params else {
            return Ok(Response::error(
                request.id,
                INVALID_PARAMS,
                "Missing resources/read params",
            ));
        };

        debug!("Reading resource: {}", params.uri);

        match self.handler.read_resource(&params.uri) {
            Ok(result) => Ok(Response::success(request.id, result)?),
            Err(e) => {
                warn!("Resource read failed: {}", e);
                Ok(Response::error(request.id, e.code(), e.to_string()))
            }
        }
    }
}

fn write_response(output: &mut impl Write, response: &Response) -> Result<()> {
    let response_json = serde_json::to_string(response)?;
    trace!("Sending: {}", response_json);
    writeln!(output, "{response_json}")?;
    output.flush()?;
    Ok(())
}
