// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Genshin Guide is an MCP (Model Context Protocol) server for a small
//! Genshin Impact knowledge base.
//!
//! It exposes character sheets, build recommendations and team compositions
//! as MCP tools and resources over stdio, and ships a client that drives a
//! server process end to end.

/// Adapter registering catalog queries as MCP tools and resources.
pub mod adapter;
/// The static character, build and team tables.
pub mod catalog;
/// Command-line interface utilities.
pub mod cli;
/// Configuration handling.
pub mod config;
/// MCP server, client and type definitions.
pub mod mcp;
/// Text rendering of catalog queries.
pub mod query;
