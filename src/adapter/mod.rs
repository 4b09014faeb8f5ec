// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

/// Maps MCP tool calls and resource reads to catalog queries.
mod handler;
/// Name-keyed registration tables for tools and resources.
pub mod registry;

pub use handler::{
    BUILDS_URI, BuildsInput, CHARACTERS_URI, CharacterInput, GuideHandler, GuideInput,
    GuideState, ROLES, TEAMS_URI,
};
pub use registry::{ResourceRegistry, ToolRegistry};
