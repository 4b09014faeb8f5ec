// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Client harness for the guide server.
//!
//! Spawns the server, walks through every resource and tool it advertises
//! for one character, and prints what comes back.

#![allow(clippy::print_stdout, reason = "CLI tool needs to output to stdout")]

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use std::process::Stdio;
use tracing_subscriber::EnvFilter;

use genshin_guide::adapter::{BUILDS_URI, CHARACTERS_URI, TEAMS_URI};
use genshin_guide::cli::{self, ColorConfig, ListingWidths};
use genshin_guide::mcp::{CallToolResult, McpClient};

/// Command-line arguments for the client harness.
#[derive(Parser, Debug)]
#[command(name = "genshin-guide-client")]
#[command(about = "Exercise a genshin-guide MCP server over stdio")]
#[command(version = env!("GENSHIN_GUIDE_VERSION"))]
struct Args {
    /// Server executable (default: genshin-guide next to this binary).
    #[arg(long)]
    server: Option<PathBuf>,

    /// Character to query.
    #[arg(long, default_value = "mavuika")]
    character: String,

    /// Disable colored output.
    #[arg(long)]
    nocolor: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("genshin_guide=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = match args.server {
        Some(path) => path,
        None => default_server_path()?,
    };
    let colors = ColorConfig::new(args.nocolor);

    let mut command = tokio::process::Command::new(&server);
    command.stderr(Stdio::null());
    let mut client = McpClient::spawn(command)?;

    let init = client
        .initialize("genshin-guide-client", env!("GENSHIN_GUIDE_VERSION"))
        .await?;

    println!(
        "{}",
        colors.heading(&format!(
            "Genshin Impact MCP Server Test ({} {})",
            init.server_info.name,
            init.server_info.version.as_deref().unwrap_or("unknown")
        ))
    );
    println!("{}", "=".repeat(50));

    let term_width = cli::terminal_width();

    println!("\n{}", colors.heading("Available Resources:"));
    let resources = client.list_resources().await?;
    let widths = ListingWidths::calculate(term_width, resources.iter().map(|r| r.name.as_str()));
    for resource in &resources {
        let description = resource.description.as_deref().unwrap_or("");
        println!(
            "  - {}  {}",
            colors.blue(&format!("{:<width$}", resource.name, width = widths.name)),
            colors.dim(&cli::truncate(description, widths.description))
        );
    }

    println!("\n{}", colors.heading("Available Tools:"));
    let tools = client.list_tools().await?;
    let widths = ListingWidths::calculate(term_width, tools.iter().map(|t| t.name.as_str()));
    for tool in &tools {
        let description = tool.description.as_deref().unwrap_or("");
        println!(
            "  - {}  {}",
            colors.green(&format!("{:<width$}", tool.name, width = widths.name)),
            colors.dim(&cli::truncate(description, widths.description))
        );
    }

    let name = args.character.as_str();
    let calls = [
        (
            "Character Information:",
            "get_character_info",
            json!({ "character_name": name }),
        ),
        (
            "Character Builds:",
            "get_character_builds",
            json!({ "character_name": name }),
        ),
        (
            "Team Compositions:",
            "get_team_compositions",
            json!({ "character_name": name }),
        ),
        (
            "Complete Build Guide:",
            "create_build_guide",
            json!({ "character_name": name, "include_teams": true }),
        ),
    ];
    for (heading, tool, arguments) in calls {
        println!("\n{}", colors.heading(heading));
        let result = client.call_tool(tool, arguments).await?;
        print_tool_result(&colors, &result);
    }

    for (heading, uri) in [
        ("Characters Database:", CHARACTERS_URI),
        ("Builds Database:", BUILDS_URI),
        ("Teams Database:", TEAMS_URI),
    ] {
        println!("\n{} {}", colors.heading(heading), colors.blue(uri));
        let result = client.read_resource(uri).await?;
        for contents in &result.contents {
            println!("{}", contents.text);
        }
        if uri == CHARACTERS_URI {
            let text = result
                .contents
                .first()
                .map(|c| c.text.as_str())
                .context("characters resource returned no contents")?;
            let characters: Map<String, Value> =
                serde_json::from_str(text).context("characters resource is not a JSON object")?;
            let keys: Vec<&str> = characters.keys().map(String::as_str).collect();
            println!("Available characters: {}", keys.join(", "));
        }
    }

    client.shutdown().await
}

fn print_tool_result(colors: &ColorConfig, result: &CallToolResult) {
    let text = result.joined_text();
    if result.is_error == Some(true) {
        println!("{}", colors.red(&text));
    } else {
        println!("{}", text.trim_end());
    }
}

/// Locates the `genshin-guide` executable installed beside this one.
fn default_server_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to determine current executable")?;
    let dir = exe
        .parent()
        .context("Current executable has no parent directory")?;
    Ok(dir.join(format!("genshin-guide{}", std::env::consts::EXE_SUFFIX)))
}
