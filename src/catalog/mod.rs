// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Static catalog of characters, builds and team compositions.
//!
//! The catalog is built once at startup, either from the built-in tables or
//! from a JSON file, and is never mutated afterwards. Every table is keyed by
//! the lowercase character identifier (e.g. `"mavuika"`).

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// A playable character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name (e.g. "Mavuika").
    pub name: String,
    /// Elemental vision (e.g. "Pyro").
    pub element: String,
    /// Weapon class (e.g. "Claymore").
    pub weapon_type: String,
    /// Star rarity.
    pub rarity: u8,
    /// Free-form role summary (e.g. "DPS/Support").
    pub role: String,
    /// Short description.
    pub description: String,
}

/// Recommended main stat for each variable artifact slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainStats {
    /// Sands of Eon.
    pub sands: String,
    /// Goblet of Eonothem.
    pub goblet: String,
    /// Circlet of Logos.
    pub circlet: String,
}

impl MainStats {
    /// Slot name and recommended stat pairs, in in-game slot order.
    pub fn slots(&self) -> [(&'static str, &str); 3] {
        [
            ("Sands", self.sands.as_str()),
            ("Goblet", self.goblet.as_str()),
            ("Circlet", self.circlet.as_str()),
        ]
    }
}

/// A recommended equipment configuration for one role.
///
/// Every list is ordered by priority; the first entry is the best choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Role label (e.g. "DPS", "Support").
    pub role: String,
    /// Main stat per artifact slot.
    pub main_stats: MainStats,
    /// Artifact sets.
    pub artifact_sets: Vec<String>,
    /// Weapons.
    pub weapons: Vec<String>,
    /// Substats to roll for.
    pub substats_priority: Vec<String>,
    /// Talents to level.
    pub talent_priority: Vec<String>,
}

/// A named team recommended around a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamComposition {
    /// Team archetype name (e.g. "Vape Team").
    pub name: String,
    /// Member display names. Not checked against the character table.
    pub members: Vec<String>,
}

/// Errors raised while constructing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The catalog file is not a valid catalog document.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        /// Path of the catalog file.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// A table key is not lowercase, so case-insensitive lookups could never hit it.
    #[error("{table} key '{key}' must be lowercase")]
    KeyNotLowercase {
        /// Which table holds the key.
        table: &'static str,
        /// The offending key.
        key: String,
    },
}

/// The immutable knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Characters by identifier.
    #[serde(default)]
    pub characters: BTreeMap<String, Character>,
    /// Builds by character identifier.
    #[serde(default)]
    pub builds: BTreeMap<String, Vec<Build>>,
    /// Team compositions by character identifier.
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<TeamComposition>>,
}

impl Catalog {
    /// Returns the built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Loads a catalog from a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a catalog
    /// document, or contains a key that is not lowercase.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;
        let catalog: Self = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: display,
            source,
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks that every table is keyed by lowercase identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::KeyNotLowercase`] for the first offending key.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let tables = [
            ("characters", keys(&self.characters)),
            ("builds", keys(&self.builds)),
            ("teams", keys(&self.teams)),
        ];
        for (table, table_keys) in tables {
            if let Some(key) = table_keys.into_iter().find(|k| k.to_lowercase() != **k) {
                return Err(CatalogError::KeyNotLowercase {
                    table,
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Looks up a character by identifier.
    #[must_use]
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    /// Looks up the builds recorded for a character.
    #[must_use]
    pub fn builds_for(&self, id: &str) -> Option<&[Build]> {
        self.builds.get(id).map(Vec::as_slice)
    }

    /// Looks up the team compositions recorded for a character.
    #[must_use]
    pub fn teams_for(&self, id: &str) -> Option<&[TeamComposition]> {
        self.teams.get(id).map(Vec::as_slice)
    }
}

fn keys<V>(table: &BTreeMap<String, V>) -> Vec<&String> {
    table.keys().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    #[test]
    fn test_builtin_is_valid() -> Result<()> {
        let catalog = Catalog::builtin();
        catalog.validate()?;
        assert_eq!(catalog.characters.len(), 5);
        Ok(())
    }

    #[test]
    fn test_builtin_lookup() {
        let catalog = Catalog::builtin();
        let mavuika = catalog.character("mavuika");
        assert_eq!(mavuika.map(|c| c.element.as_str()), Some("Pyro"));
        assert_eq!(catalog.builds_for("mavuika").map(<[Build]>::len), Some(2));
        assert_eq!(catalog.teams_for("kazuha").map(<[TeamComposition]>::len), Some(2));
        // Nahida and Furina have character data only.
        assert!(catalog.builds_for("nahida").is_none());
        assert!(catalog.teams_for("furina").is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = Catalog::builtin();
        assert!(catalog.character("Mavuika").is_none());
    }

    #[test]
    fn test_builtin_preserves_priority_order() {
        let catalog = Catalog::builtin();
        let dps = catalog
            .builds_for("mavuika")
            .and_then(|builds| builds.first())
            .map(|b| b.weapons.clone());
        assert_eq!(
            dps,
            Some(vec![
                "Wolf's Gravestone".to_string(),
                "Serpent Spine".to_string(),
                "Prototype Archaic".to_string(),
            ])
        );
    }

    #[test]
    fn test_validate_rejects_uppercase_key() {
        let mut catalog = Catalog::builtin();
        if let Some(teams) = catalog.teams.remove("kazuha") {
            catalog.teams.insert("Kazuha".to_string(), teams);
        }
        let err = catalog.validate();
        assert!(matches!(
            err,
            Err(CatalogError::KeyNotLowercase { table: "teams", ref key }) if key == "Kazuha"
        ));
    }

    #[test]
    fn test_from_path_round_trips_builtin() -> Result<()> {
        let builtin = Catalog::builtin();
        let mut file = tempfile::NamedTempFile::new()?;
        serde_json::to_writer(&mut file, &builtin)?;
        file.flush()?;

        let loaded = Catalog::from_path(file.path())?;
        assert_eq!(loaded, builtin);
        Ok(())
    }

    #[test]
    fn test_from_path_partial_document() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{"characters": {{"bennett": {{
                "name": "Bennett", "element": "Pyro", "weapon_type": "Sword",
                "rarity": 4, "role": "Support", "description": "Healer and ATK buffer"
            }}}}}}"#
        )?;
        file.flush()?;

        let loaded = Catalog::from_path(file.path())?;
        assert_eq!(loaded.characters.len(), 1);
        assert!(loaded.builds.is_empty());
        assert!(loaded.teams.is_empty());
        Ok(())
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = Catalog::from_path(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_from_path_invalid_json() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "not json")?;
        file.flush()?;

        let result = Catalog::from_path(file.path());
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
        Ok(())
    }
}
