// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Name-keyed lookup tables binding tools and resources to handler functions.
//!
//! Listing preserves registration order. Registering a name twice replaces
//! the earlier entry in place.

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::mcp::{CallToolResult, Resource, Tool};

/// Handler invoked for a tool call with the shared state and raw arguments.
pub type ToolFn<S> = fn(&S, Option<Value>) -> Result<CallToolResult>;

/// Renderer producing the text of a resource from the shared state.
pub type ResourceFn<S> = fn(&S) -> Result<String>;

struct ToolEntry<S> {
    tool: Tool,
    handler: ToolFn<S>,
}

/// Registered tools, dispatched by name.
pub struct ToolRegistry<S> {
    entries: Vec<ToolEntry<S>>,
    index: HashMap<String, usize>,
}

impl<S> Default for ToolRegistry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S> ToolRegistry<S> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `handler`, advertising `description` and `input_schema`.
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        input_schema: Value,
        handler: ToolFn<S>,
    ) -> &mut Self {
        let entry = ToolEntry {
            tool: Tool {
                name: name.to_string(),
                description: Some(description.to_string()),
                input_schema,
            },
            handler,
        };
        if let Some(&slot) = self.index.get(name) {
            warn!("Tool {} registered twice, replacing", name);
            self.entries[slot] = entry;
        } else {
            self.index.insert(name.to_string(), self.entries.len());
            self.entries.push(entry);
        }
        self
    }

    /// Tool definitions in registration order.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool.clone()).collect()
    }

    /// Looks up the handler for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ToolFn<S>> {
        self.index
            .get(name)
            .and_then(|&slot| self.entries.get(slot))
            .map(|e| e.handler)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct ResourceEntry<S> {
    resource: Resource,
    render: ResourceFn<S>,
}

/// Registered resources, dispatched by URI.
pub struct ResourceRegistry<S> {
    entries: Vec<ResourceEntry<S>>,
    index: HashMap<String, usize>,
}

impl<S> Default for ResourceRegistry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S> ResourceRegistry<S> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `uri` to `render`.
    pub fn register(
        &mut self,
        uri: &str,
        name: &str,
        description: &str,
        mime_type: &str,
        render: ResourceFn<S>,
    ) -> &mut Self {
        let entry = ResourceEntry {
            resource: Resource {
                uri: uri.to_string(),
                name: name.to_string(),
                description: Some(description.to_string()),
                mime_type: Some(mime_type.to_string()),
            },
            render,
        };
        if let Some(&slot) = self.index.get(uri) {
            warn!("Resource {} registered twice, replacing", uri);
            self.entries[slot] = entry;
        } else {
            self.index.insert(uri.to_string(), self.entries.len());
            self.entries.push(entry);
        }
        self
    }

    /// Resource definitions in registration order.
    #[must_use]
    pub fn resources(&self) -> Vec<Resource> {
        self.entries.iter().map(|e| e.resource.clone()).collect()
    }

    /// Looks up the definition and renderer for `uri`.
    #[must_use]
    pub fn get(&self, uri: &str) -> Option<(&Resource, ResourceFn<S>)> {
        self.index
            .get(uri)
            .and_then(|&slot| self.entries.get(slot))
            .map(|e| (&e.resource, e.render))
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no resources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn echo(prefix: &String, _args: Option<Value>) -> Result<CallToolResult> {
        Ok(CallToolResult::text(format!("{prefix}: echo")))
    }

    fn shout(prefix: &String, _args: Option<Value>) -> Result<CallToolResult> {
        Ok(CallToolResult::text(format!("{prefix}: SHOUT")))
    }

    fn render(prefix: &String) -> Result<String> {
        Ok(format!("{{\"prefix\": \"{prefix}\"}}"))
    }

    #[test]
    fn test_tools_listed_in_registration_order() {
        let mut registry = ToolRegistry::<String>::new();
        registry
            .register("zeta", "last alphabetically", serde_json::json!({}), echo)
            .register("alpha", "first alphabetically", serde_json::json!({}), shout);

        let names: Vec<String> = registry.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_tool_dispatch_by_name() -> Result<()> {
        let mut registry = ToolRegistry::<String>::new();
        registry.register("echo", "", serde_json::json!({}), echo);
        registry.register("shout", "", serde_json::json!({}), shout);

        let handler = registry.get("shout").context("shout not registered")?;
        let result = handler(&"state".to_string(), None)?;
        assert_eq!(result.joined_text(), "state: SHOUT");
        assert!(registry.get("whisper").is_none());
        Ok(())
    }

    #[test]
    fn test_duplicate_tool_replaces_in_place() -> Result<()> {
        let mut registry = ToolRegistry::<String>::new();
        registry.register("a", "old", serde_json::json!({}), echo);
        registry.register("b", "", serde_json::json!({}), echo);
        registry.register("a", "new", serde_json::json!({}), shout);

        let tools = registry.tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].description.as_deref(), Some("new"));
        let handler = registry.get("a").context("a not registered")?;
        assert_eq!(handler(&"s".to_string(), None)?.joined_text(), "s: SHOUT");
        Ok(())
    }

    #[test]
    fn test_resource_lookup() -> Result<()> {
        let mut registry = ResourceRegistry::<String>::new();
        assert!(registry.is_empty());
        registry.register("test://a", "A", "first", "application/json", render);

        let (resource, render) = registry.get("test://a").context("resource missing")?;
        assert_eq!(resource.name, "A");
        assert_eq!(resource.mime_type.as_deref(), Some("application/json"));
        assert_eq!(render(&"x".to_string())?, r#"{"prefix": "x"}"#);
        assert!(registry.get("test://b").is_none());
        Ok(())
    }
}
