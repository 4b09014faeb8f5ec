// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! MCP client that spawns a server process and talks to it over stdio.
//!
//! Requests are strictly sequential: each call writes one request line and
//! waits for the response carrying the same id. Notifications and requests
//! initiated by the server in the meantime are skipped.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, trace, warn};

use super::types::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    ListResourcesResult, ListToolsResult, METHOD_NOT_FOUND, Notification, PROTOCOL_VERSION,
    ReadResourceParams, ReadResourceResult, Request, RequestId, Resource, Response, Tool,
};

/// Default timeout for a single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Grace period for the server to exit after stdin is closed.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A JSON-RPC error returned by the server.
#[derive(Debug, Clone, Error)]
#[error("server returned error {code}: {message}")]
pub struct RpcError {
    /// The JSON-RPC error code.
    pub code: i64,
    /// The error message.
    pub message: String,
}

/// Manages communication with an MCP server process.
pub struct McpClient {
    next_id: i64,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    child: Child,
}

impl McpClient {
    /// Spawns the server described by `command` with piped stdin/stdout.
    ///
    /// The caller decides the program, arguments and where stderr goes.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    pub fn spawn(mut command: Command) -> Result<Self> {
        let program = command.as_std().get_program().to_string_lossy().into_owned();
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn MCP server: {program}"))?;

        let stdin = child.stdin.take().context("stdin not captured")?;
        let stdout = child.stdout.take().context("stdout not captured")?;

        debug!("Spawned MCP server {}", program);

        Ok(Self {
            next_id: 0,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            child,
        })
    }

    /// Performs the `initialize` handshake and sends `notifications/initialized`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the handshake or the pipe breaks.
    pub async fn initialize(&mut self, name: &str, version: &str) -> Result<InitializeResult> {
        let params = InitializeParams {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: serde_json::json!({}),
            client_info: Implementation {
                name: name.to_string(),
                version: Some(version.to_string()),
            },
        };
        let result: InitializeResult = self.request("initialize", Some(params)).await?;
        self.notify(Notification::new("notifications/initialized"))
            .await?;
        Ok(result)
    }

    /// Lists the server's tools.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_tools(&mut self) -> Result<Vec<Tool>> {
        let result: ListToolsResult = self.request::<Value, _>("tools/list", None).await?;
        Ok(result.tools)
    }

    /// Lists the server's resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_resources(&mut self) -> Result<Vec<Resource>> {
        let result: ListResourcesResult =
            self.request::<Value, _>("resources/list", None).await?;
        Ok(result.resources)
    }

    /// Calls a tool by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. A tool result with `isError`
    /// set is returned as `Ok`.
    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<CallToolResult> {
        let params = CallToolParams {
            name: name.to_string(),
            arguments: Some(arguments),
        };
        self.request("tools/call", Some(params)).await
    }

    /// Reads a resource by URI.
    ///
    /// # Errors
    ///
    /// Returns an [`RpcError`] (inside `anyhow`) if the server rejects the URI.
    pub async fn read_resource(&mut self, uri: &str) -> Result<ReadResourceResult> {
        let params = ReadResourceParams {
            uri: uri.to_string(),
        };
        self.request("resources/read", Some(params)).await
    }

    /// Sends a request and waits for the response with timeout.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, broken pipe, a JSON-RPC error response or
    /// a result that does not deserialize into `R`.
    pub async fn request<P: Serialize, R: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Option<P>,
    ) -> Result<R> {
        let id = RequestId::Number(self.next_id);
        self.next_id += 1;

        let params = params.map(serde_json::to_value).transpose()?;
        let request = Request::new(id.clone(), method, params);
        self.write_line(&request).await?;

        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.read_response(&id))
            .await
            .map_err(|_| anyhow!("Timed out waiting for {method} response"))??;

        if let Some(error) = response.error {
            return Err(RpcError {
                code: error.code,
                message: error.message,
            }
            .into());
        }

        let result = response
            .result
            .ok_or_else(|| anyhow!("{method} response has neither result nor error"))?;
        serde_json::from_value(result).with_context(|| format!("Invalid {method} result"))
    }

    /// Sends a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the pipe is closed.
    pub async fn notify(&mut self, notification: Notification) -> Result<()> {
        self.write_line(&notification).await
    }

    /// Closes stdin and waits for the server to exit, killing it if it lingers.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting on the process fails.
    pub async fn shutdown(mut self) -> Result<()> {
        self.stdin.shutdown().await.ok();
        drop(self.stdin);

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, self.child.wait()).await {
            Ok(status) => {
                let status = status.context("Failed to wait for MCP server")?;
                debug!("MCP server exited with {}", status);
            }
            Err(_) => {
                warn!("MCP server did not exit after stdin closed, killing it");
                self.child.kill().await?;
            }
        }
        Ok(())
    }

    async fn write_line(&mut self, message: &impl Serialize) -> Result<()> {
        let mut line = serde_json::to_string(message)?;
        trace!("Sending: {}", line);
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .await
            .context("Failed to write to MCP server")?;
        self.stdin.flush().await?;
        Ok(())
    }

    async fn read_response(&mut self, id: &RequestId) -> Result<Response> {
        loop {
            let line = self
                .stdout
                .next_line()
                .await
                .context("Failed to read from MCP server")?
                .ok_or_else(|| anyhow!("MCP server closed its output"))?;

            if line.trim().is_empty() {
                continue;
            }
            trace!("Received: {}", line);

            let value: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Failed to parse JSON from server: {}", e);
                    continue;
                }
            };

            if let Some(method) = value.get("method").and_then(Value::as_str) {
                if let Some(server_id) = value.get("id") {
                    // Server-initiated request; refuse it so the server is not left waiting.
                    debug!("Refusing server request: {}", method);
                    let server_id: RequestId = serde_json::from_value(server_id.clone())
                        .unwrap_or(RequestId::Number(0));
                    let refusal = Response::error(
                        server_id,
                        METHOD_NOT_FOUND,
                        format!("Method '{method}' not supported by client"),
                    );
                    self.write_line(&refusal).await?;
                } else {
                    debug!("Ignoring server notification: {}", method);
                }
                continue;
            }

            let response: Response =
                serde_json::from_value(value).context("Malformed response from MCP server")?;
            if &response.id == id {
                return Ok(response);
            }
            warn!("Received response for unexpected request id: {:?}", response.id);
        }
    }
}
