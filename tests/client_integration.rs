// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Integration tests for the async MCP client against the real server.

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::process::Stdio;
use tokio::process::Command;

use genshin_guide::mcp::{INVALID_PARAMS, McpClient, RpcError};

async fn connect() -> Result<McpClient> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_genshin-guide"));
    command
        .env(
            "XDG_CONFIG_HOME",
            std::env::temp_dir().join("genshin-guide-tests"),
        )
        .env_remove("GENSHIN_GUIDE_CATALOG_FILE")
        .env_remove("GENSHIN_GUIDE_INCLUDE_TEAMS_DEFAULT")
        .stderr(Stdio::null());
    let mut client = McpClient::spawn(command)?;
    let init = client.initialize("client-integration", "1.0.0").await?;
    assert_eq!(init.server_info.name, "genshin-impact-guide");
    assert_eq!(init.protocol_version, "2024-11-05");
    Ok(client)
}

#[tokio::test]
async fn test_client_lists_capabilities() -> Result<()> {
    let mut client = connect().await?;

    let tools = client.list_tools().await?;
    assert_eq!(tools.len(), 4);
    assert!(tools.iter().any(|t| t.name == "create_build_guide"));

    let resources = client.list_resources().await?;
    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Genshin Impact Characters",
            "Character Builds",
            "Team Compositions"
        ]
    );

    client.shutdown().await
}

#[tokio::test]
async fn test_client_calls_tools() -> Result<()> {
    let mut client = connect().await?;

    let result = client
        .call_tool("get_character_info", json!({"character_name": "Nahida"}))
        .await?;
    assert!(result.is_error.is_none());
    let text = result.joined_text();
    assert!(text.contains("Dendro"), "Got: {text}");
    assert!(text.contains("Catalyst"));

    let result = client
        .call_tool(
            "get_character_builds",
            json!({"character_name": "mavuika", "role": "support"}),
        )
        .await?;
    let text = result.joined_text();
    assert!(text.contains("**Support Build:**"));
    assert!(!text.contains("**DPS Build:**"));

    let result = client
        .call_tool("get_character_builds", json!({"character_name": 42}))
        .await?;
    assert_eq!(result.is_error, Some(true));

    client.shutdown().await
}

#[tokio::test]
async fn test_client_reads_resources() -> Result<()> {
    let mut client = connect().await?;

    let result = client.read_resource("genshin://characters").await?;
    let contents = result.contents.first().context("No contents")?;
    assert_eq!(contents.mime_type.as_deref(), Some("application/json"));
    let characters: Map<String, Value> = serde_json::from_str(&contents.text)?;
    assert_eq!(characters.len(), 5);
    assert_eq!(characters["furina"]["element"], "Hydro");

    client.shutdown().await
}

#[tokio::test]
async fn test_client_surfaces_rpc_errors() -> Result<()> {
    let mut client = connect().await?;

    let err = client
        .read_resource("genshin://artifacts")
        .await
        .err()
        .context("Unknown resource should fail")?;
    let rpc = err
        .downcast_ref::<RpcError>()
        .context("Expected a JSON-RPC error")?;
    assert_eq!(rpc.code, INVALID_PARAMS);
    assert!(rpc.message.contains("genshin://artifacts"));

    // The session survives a rejected request
    let tools = client.list_tools().await?;
    assert_eq!(tools.len(), 4);

    client.shutdown().await
}
