// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

use crate::catalog::Catalog;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON catalog replacing the built-in tables
    #[serde(default)]
    pub catalog_file: Option<PathBuf>,

    /// Whether build guides include team compositions when the caller does
    /// not say (default: true)
    #[serde(default = "default_include_teams")]
    pub include_teams_default: bool,
}

const fn default_include_teams() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            include_teams_default: default_include_teams(),
        }
    }
}

impl Config {
    /// Load configuration from standard paths or a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or holds invalid values.
    pub fn load(explicit_file: Option<PathBuf>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // 1. Start with defaults
        builder = builder.set_default("include_teams_default", default_include_teams())?;

        // 2. Load from user config directory (~/.config/genshin-guide/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("genshin-guide").join("config.toml");
            if config_path.exists() {
                builder = builder.add_source(config::File::from(config_path));
            }
        }

        // 3. Load from explicit file if provided
        if let Some(path) = explicit_file {
            builder = builder.add_source(config::File::from(path));
        }

        // 4. Load from environment variables (GENSHIN_GUIDE_CATALOG_FILE, etc.)
        builder = builder.add_source(config::Environment::with_prefix("GENSHIN_GUIDE"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Builds the catalog this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_file {
            Some(path) => {
                info!("Loading catalog from {}", path.display());
                Catalog::from_path(path)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))
            }
            None => Ok(Catalog::builtin()),
        }
    }
}
