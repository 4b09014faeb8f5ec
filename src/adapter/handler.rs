// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Adapter that exposes catalog queries as MCP tools and resources.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::registry::{ResourceRegistry, ToolRegistry};
use crate::catalog::Catalog;
use crate::mcp::{
    CallToolResult, ReadResourceResult, Resource, ResourceContents, ResourceError,
    ResourceHandler, Tool, ToolHandler,
};
use crate::query;

/// URI of the aggregate character table.
pub const CHARACTERS_URI: &str = "genshin://characters";
/// URI of the aggregate build table.
pub const BUILDS_URI: &str = "genshin://builds";
/// URI of the aggregate team table.
pub const TEAMS_URI: &str = "genshin://teams";

const JSON_MIME: &str = "application/json";

/// Roles accepted by the `get_character_builds` filter.
pub const ROLES: [&str; 4] = ["DPS", "Support", "Sub-DPS", "Healer"];

/// State shared by every tool and resource handler.
#[derive(Debug, Clone)]
pub struct GuideState {
    /// The catalog all queries run against.
    pub catalog: Arc<Catalog>,
    /// Whether `create_build_guide` includes teams when the caller does not say.
    pub include_teams_default: bool,
}

/// Input for tools that only need a character.
#[derive(Debug, Deserialize)]
pub struct CharacterInput {
    /// Character name or identifier, any case.
    pub character_name: String,
}

/// Input for `get_character_builds`.
#[derive(Debug, Deserialize)]
pub struct BuildsInput {
    /// Character name or identifier, any case.
    pub character_name: String,
    /// Optional role filter, matched case-insensitively.
    #[serde(default)]
    pub role: Option<String>,
}

/// Input for `create_build_guide`.
#[derive(Debug, Deserialize)]
pub struct GuideInput {
    /// Character name or identifier, any case.
    pub character_name: String,
    /// Whether to append team compositions.
    #[serde(default)]
    pub include_teams: Option<bool>,
}

/// Handler wiring the guide tools and resources into an [`crate::mcp::McpServer`].
pub struct GuideHandler {
    state: GuideState,
    tools: ToolRegistry<GuideState>,
    resources: ResourceRegistry<GuideState>,
}

impl GuideHandler {
    /// Creates the handler and registers every tool and resource.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, include_teams_default: bool) -> Self {
        let mut tools = ToolRegistry::new();
        tools
            .register(
                "get_character_info",
                "Get detailed information about a specific character",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "character_name": {
                            "type": "string",
                            "description": "Name of the character (e.g., 'mavuika', 'neuvillette')"
                        }
                    },
                    "required": ["character_name"]
                }),
                handle_character_info,
            )
            .register(
                "get_character_builds",
                "Get optimal builds for a character",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "character_name": character_name_schema(),
                        "role": {
                            "type": "string",
                            "description": "Specific role (DPS, Support, etc.) - optional",
                            "enum": ROLES
                        }
                    },
                    "required": ["character_name"]
                }),
                handle_character_builds,
            )
            .register(
                "get_team_compositions",
                "Get recommended team compositions for a character",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "character_name": character_name_schema()
                    },
                    "required": ["character_name"]
                }),
                handle_team_compositions,
            )
            .register(
                "create_build_guide",
                "Create a comprehensive build guide for a character",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "character_name": character_name_schema(),
                        "include_teams": {
                            "type": "boolean",
                            "description": "Include team composition recommendations",
                            "default": include_teams_default
                        }
                    },
                    "required": ["character_name"]
                }),
                handle_build_guide,
            );

        let mut resources = ResourceRegistry::new();
        resources
            .register(
                CHARACTERS_URI,
                "Genshin Impact Characters",
                "Database of Genshin Impact characters with stats and information",
                JSON_MIME,
                render_characters,
            )
            .register(
                BUILDS_URI,
                "Character Builds",
                "Optimal builds and artifacts for characters",
                JSON_MIME,
                render_builds,
            )
            .register(
                TEAMS_URI,
                "Team Compositions",
                "Recommended team compositions for different characters",
                JSON_MIME,
                render_teams,
            );

        Self {
            state: GuideState {
                catalog,
                include_teams_default,
            },
            tools,
            resources,
        }
    }

    /// The catalog served by this handler.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }
}

impl ToolHandler for GuideHandler {
    fn list_tools(&self) -> Vec<Tool> {
        self.tools.tools()
    }

    fn call_tool(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<CallToolResult> {
        debug!("Dispatching tool {}", name);
        match self.tools.get(name) {
            Some(handler) => handler(&self.state, arguments),
            None => Ok(CallToolResult::text(format!("Unknown tool: {name}"))),
        }
    }
}

impl ResourceHandler for GuideHandler {
    fn list_resources(&self) -> Vec<Resource> {
        self.resources.resources()
    }

    fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let parsed = Url::parse(uri).map_err(|source| ResourceError::InvalidUri {
            uri: uri.to_string(),
            source,
        })?;

        let (resource, render) = self
            .resources
            .get(parsed.as_str())
            .ok_or_else(|| ResourceError::NotFound(uri.to_string()))?;

        let text = render(&self.state)
            .with_context(|| format!("Failed to render resource {}", resource.uri))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: resource.uri.clone(),
                mime_type: resource.mime_type.clone(),
                text,
            }],
        })
    }
}

fn character_name_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": "Name of the character"
    })
}

fn parse_input<T: DeserializeOwned>(arguments: Option<serde_json::Value>) -> Result<T> {
    let arguments = arguments.ok_or_else(|| anyhow!("Missing arguments"))?;
    serde_json::from_value(arguments).context("Invalid arguments")
}

fn handle_character_info(
    state: &GuideState,
    arguments: Option<serde_json::Value>,
) -> Result<CallToolResult> {
    let input: CharacterInput = parse_input(arguments)?;
    Ok(CallToolResult::text(query::describe_character(
        &state.catalog,
        &input.character_name,
    )))
}

fn handle_character_builds(
    state: &GuideState,
    arguments: Option<serde_json::Value>,
) -> Result<CallToolResult> {
    let input: BuildsInput = parse_input(arguments)?;
    Ok(CallToolResult::text(query::list_builds(
        &state.catalog,
        &input.character_name,
        input.role.as_deref(),
    )))
}

fn handle_team_compositions(
    state: &GuideState,
    arguments: Option<serde_json::Value>,
) -> Result<CallToolResult> {
    let input: CharacterInput = parse_input(arguments)?;
    Ok(CallToolResult::text(query::list_teams(
        &state.catalog,
        &input.character_name,
    )))
}

fn handle_build_guide(
    state: &GuideState,
    arguments: Option<serde_json::Value>,
) -> Result<CallToolResult> {
    let input: GuideInput = parse_input(arguments)?;
    let include_teams = input.include_teams.unwrap_or(state.include_teams_default);
    Ok(CallToolResult::text(query::build_guide(
        &state.catalog,
        &input.character_name,
        include_teams,
    )))
}

fn render_characters(state: &GuideState) -> Result<String> {
    Ok(serde_json::to_string_pretty(&state.catalog.characters)?)
}

fn render_builds(state: &GuideState) -> Result<String> {
    Ok(serde_json::to_string_pretty(&state.catalog.builds)?)
}

fn render_teams(state: &GuideState) -> Result<String> {
    Ok(serde_json::to_string_pretty(&state.catalog.teams)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn handler() -> GuideHandler {
        GuideHandler::new(Arc::new(Catalog::builtin()), true)
    }

    fn call(handler: &GuideHandler, name: &str, args: serde_json::Value) -> Result<String> {
        let result = handler.call_tool(name, Some(args))?;
        assert!(result.is_error.is_none());
        Ok(result.joined_text())
    }

    fn read_text(handler: &GuideHandler, uri: &str) -> Result<String> {
        let result = handler.read_resource(uri)?;
        let contents = result.contents.first().context("no contents")?;
        assert_eq!(contents.mime_type.as_deref(), Some(JSON_MIME));
        Ok(contents.text.clone())
    }

    #[test]
    fn test_list_tools() {
        let names: Vec<String> = handler().list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "get_character_info",
                "get_character_builds",
                "get_team_compositions",
                "create_build_guide",
            ]
        );
    }

    #[test]
    fn test_tool_schemas_require_character_name() {
        for tool in handler().list_tools() {
            assert_eq!(
                tool.input_schema["required"],
                serde_json::json!(["character_name"]),
                "{} schema",
                tool.name
            );
        }
    }

    #[test]
    fn test_builds_schema_declares_role_enum() -> Result<()> {
        let tools = handler().list_tools();
        let builds = tools
            .iter()
            .find(|t| t.name == "get_character_builds")
            .context("builds tool missing")?;
        assert_eq!(
            builds.input_schema["properties"]["role"]["enum"],
            serde_json::json!(["DPS", "Support", "Sub-DPS", "Healer"])
        );
        Ok(())
    }

    #[test]
    fn test_guide_schema_reflects_configured_default() -> Result<()> {
        let handler = GuideHandler::new(Arc::new(Catalog::builtin()), false);
        let tools = handler.list_tools();
        let guide = tools
            .iter()
            .find(|t| t.name == "create_build_guide")
            .context("guide tool missing")?;
        assert_eq!(
            guide.input_schema["properties"]["include_teams"]["default"],
            false
        );
        Ok(())
    }

    #[test]
    fn test_character_info() -> Result<()> {
        let text = call(
            &handler(),
            "get_character_info",
            serde_json::json!({ "character_name": "Mavuika" }),
        )?;
        assert!(text.contains("Pyro"));
        assert!(text.contains("Claymore"));
        Ok(())
    }

    #[test]
    fn test_character_info_not_found_is_not_an_error() -> Result<()> {
        let text = call(
            &handler(),
            "get_character_info",
            serde_json::json!({ "character_name": "Paimon" }),
        )?;
        assert_eq!(text, "Character 'Paimon' not found in database.");
        Ok(())
    }

    #[test]
    fn test_character_builds_with_role() -> Result<()> {
        let text = call(
            &handler(),
            "get_character_builds",
            serde_json::json!({ "character_name": "mavuika", "role": "Support" }),
        )?;
        assert!(text.contains("**Support Build:**"));
        assert!(!text.contains("**DPS Build:**"));
        Ok(())
    }

    #[test]
    fn test_team_compositions() -> Result<()> {
        let text = call(
            &handler(),
            "get_team_compositions",
            serde_json::json!({ "character_name": "mavuika" }),
        )?;
        assert!(text.contains("**Vape Team:**"));
        assert!(text.contains("**Mono Pyro:**"));
        Ok(())
    }

    #[test]
    fn test_build_guide_default_includes_teams() -> Result<()> {
        let text = call(
            &handler(),
            "create_build_guide",
            serde_json::json!({ "character_name": "kazuha" }),
        )?;
        assert!(text.contains("## Team Compositions"));
        Ok(())
    }

    #[test]
    fn test_build_guide_explicit_flag_overrides_default() -> Result<()> {
        let text = call(
            &handler(),
            "create_build_guide",
            serde_json::json!({ "character_name": "kazuha", "include_teams": false }),
        )?;
        assert!(!text.contains("## Team Compositions"));

        let handler = GuideHandler::new(Arc::new(Catalog::builtin()), false);
        let text = call(
            &handler,
            "create_build_guide",
            serde_json::json!({ "character_name": "kazuha" }),
        )?;
        assert!(!text.contains("## Team Compositions"));
        let text = call(
            &handler,
            "create_build_guide",
            serde_json::json!({ "character_name": "kazuha", "include_teams": true }),
        )?;
        assert!(text.contains("## Team Compositions"));
        Ok(())
    }

    #[test]
    fn test_unknown_tool_is_text() -> Result<()> {
        let result = handler().call_tool("summon_paimon", None)?;
        assert!(result.is_error.is_none());
        assert_eq!(result.joined_text(), "Unknown tool: summon_paimon");
        Ok(())
    }

    #[test]
    fn test_missing_arguments_is_error() {
        let handler = handler();
        assert!(handler.call_tool("get_character_info", None).is_err());
        assert!(
            handler
                .call_tool("get_character_info", Some(serde_json::json!({})))
                .is_err()
        );
        assert!(
            handler
                .call_tool(
                    "create_build_guide",
                    Some(serde_json::json!({ "character_name": "kazuha", "include_teams": "yes" }))
                )
                .is_err()
        );
    }

    #[test]
    fn test_list_resources() {
        let uris: Vec<String> = handler()
            .list_resources()
            .into_iter()
            .map(|r| r.uri)
            .collect();
        assert_eq!(uris, vec![CHARACTERS_URI, BUILDS_URI, TEAMS_URI]);
    }

    #[test]
    fn test_characters_resource_keys_match_catalog() -> Result<()> {
        let handler = handler();
        let text = read_text(&handler, CHARACTERS_URI)?;
        let decoded: BTreeMap<String, serde_json::Value> = serde_json::from_str(&text)?;

        let decoded_keys: BTreeSet<&String> = decoded.keys().collect();
        let catalog_keys: BTreeSet<&String> = handler.catalog().characters.keys().collect();
        assert_eq!(decoded_keys, catalog_keys);
        assert_eq!(decoded["mavuika"]["weapon_type"], "Claymore");
        assert_eq!(decoded["mavuika"]["rarity"], 5);
        Ok(())
    }

    #[test]
    fn test_builds_resource_shape() -> Result<()> {
        let text = read_text(&handler(), BUILDS_URI)?;
        let decoded: serde_json::Value = serde_json::from_str(&text)?;
        let mavuika = decoded["mavuika"].as_array().context("mavuika builds")?;
        assert_eq!(mavuika.len(), 2);
        assert_eq!(mavuika[0]["role"], "DPS");
        assert_eq!(mavuika[0]["main_stats"]["goblet"], "Pyro DMG%");
        assert_eq!(mavuika[0]["artifact_sets"][0], "Crimson Witch of Flames");
        assert!(decoded.get("nahida").is_none());
        Ok(())
    }

    #[test]
    fn test_teams_resource_shape() -> Result<()> {
        let text = read_text(&handler(), TEAMS_URI)?;
        let decoded: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(decoded["kazuha"][1]["name"], "Freeze Team");
        assert_eq!(
            decoded["kazuha"][1]["members"],
            serde_json::json!(["Kazuha", "Ayaka", "Mona", "Diona"])
        );
        Ok(())
    }

    #[test]
    fn test_resource_uri_scheme_is_case_insensitive() -> Result<()> {
        let text = read_text(&handler(), "GENSHIN://characters")?;
        assert!(text.contains("mavuika"));
        Ok(())
    }

    #[test]
    fn test_unknown_resource() {
        let result = handler().read_resource("genshin://weapons");
        assert!(matches!(result, Err(ResourceError::NotFound(ref uri)) if uri == "genshin://weapons"));
    }

    #[test]
    fn test_malformed_resource_uri() {
        let result = handler().read_resource("not a uri");
        assert!(matches!(result, Err(ResourceError::InvalidUri { .. })));
    }
}
