// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Genshin Guide MCP server and CLI.
//!
//! Runs the MCP server on stdio by default. The query subcommands render the
//! same text the tools return, without going through the protocol.

#![allow(clippy::print_stdout, reason = "CLI tool needs to output to stdout")]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use genshin_guide::adapter::GuideHandler;
use genshin_guide::catalog::Catalog;
use genshin_guide::config::Config;
use genshin_guide::mcp::{McpServer, ResourceHandler};
use genshin_guide::query;

/// Command-line arguments for the guide server.
#[derive(Parser, Debug)]
#[command(name = "genshin-guide")]
#[command(about = "MCP server for Genshin Impact character builds and team compositions")]
#[command(version = env!("GENSHIN_GUIDE_VERSION"))]
struct Args {
    /// The subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON catalog replacing the built-in data. Overrides the config file.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

/// Subcommands supported by the guide server.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server on stdio (default if no subcommand given).
    Serve,

    /// Show a character sheet.
    Info {
        /// Character name (e.g. "mavuika").
        name: String,
    },

    /// Show recommended builds.
    Builds {
        /// Character name.
        name: String,

        /// Only show builds for this role (DPS, Support, Sub-DPS, Healer).
        #[arg(long)]
        role: Option<String>,
    },

    /// Show recommended team compositions.
    Teams {
        /// Character name.
        name: String,
    },

    /// Show the complete build guide.
    Guide {
        /// Character name.
        name: String,

        /// Include team compositions (default: `include_teams_default`).
        #[arg(long, conflicts_with = "no_teams")]
        teams: bool,

        /// Leave out team compositions.
        #[arg(long)]
        no_teams: bool,
    },

    /// Print a resource document (e.g. "genshin://characters").
    Export {
        /// Resource URI.
        uri: String,
    },
}

/// Entry point for the guide binary.
///
/// # Errors
///
/// Returns an error if configuration or the catalog cannot be loaded, or the
/// subcommand fails.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("genshin_guide=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(args.config.clone())?;
    if let Some(path) = args.catalog {
        config.catalog_file = Some(path);
    }
    let catalog = Arc::new(config.catalog()?);

    match args.command {
        None | Some(Command::Serve) => run_server(catalog, &config).await,
        Some(Command::Info { name }) => {
            print_text(&query::describe_character(&catalog, &name));
            Ok(())
        }
        Some(Command::Builds { name, role }) => {
            print_text(&query::list_builds(&catalog, &name, role.as_deref()));
            Ok(())
        }
        Some(Command::Teams { name }) => {
            print_text(&query::list_teams(&catalog, &name));
            Ok(())
        }
        Some(Command::Guide {
            name,
            teams,
            no_teams,
        }) => {
            let include_teams = teams || (config.include_teams_default && !no_teams);
            print_text(&query::build_guide(&catalog, &name, include_teams));
            Ok(())
        }
        Some(Command::Export { uri }) => run_export(catalog, &config, &uri),
    }
}

/// Runs the MCP server.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
async fn run_server(catalog: Arc<Catalog>, config: &Config) -> Result<()> {
    info!("Starting genshin-guide MCP server");
    info!(
        "Catalog: {} characters, {} with builds, {} with teams",
        catalog.characters.len(),
        catalog.builds.len(),
        catalog.teams.len()
    );

    let handler = GuideHandler::new(catalog, config.include_teams_default);
    let mut mcp_server = McpServer::new(handler);

    // Run in a blocking task since the MCP server uses synchronous I/O
    let mcp_task = tokio::task::spawn_blocking(move || mcp_server.run());

    tokio::select! {
        res = mcp_task => res?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
            Ok(())
        }
    }
}

/// Prints a resource document.
///
/// # Errors
///
/// Returns an error if the URI is unknown or malformed.
fn run_export(catalog: Arc<Catalog>, config: &Config, uri: &str) -> Result<()> {
    let handler = GuideHandler::new(catalog, config.include_teams_default);
    let result = handler.read_resource(uri)?;
    for contents in result.contents {
        println!("{}", contents.text);
    }
    Ok(())
}

fn print_text(text: &str) {
    println!("{}", text.trim_end());
}
