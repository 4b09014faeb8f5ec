// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Read-only queries over the catalog, rendered as text for tool results.
//!
//! Identifiers and role filters are matched case-insensitively. A missing
//! character is not an error: each query renders an explanatory message that
//! echoes the name exactly as the caller submitted it. Priority lists are
//! rendered in their stored order.

use std::fmt::Write;

use crate::catalog::{Build, Catalog, Character, TeamComposition};

/// Normalizes a caller-supplied identifier to a catalog key.
#[must_use]
pub fn normalize_id(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Renders the character sheet for `name`.
#[must_use]
pub fn describe_character(catalog: &Catalog, name: &str) -> String {
    let Some(character) = catalog.character(&normalize_id(name)) else {
        return format!("Character '{name}' not found in database.");
    };

    let mut output = String::new();
    let _ = writeln!(output, "**{}**", character.name);
    let _ = writeln!(output, "- Element: {}", character.element);
    let _ = writeln!(output, "- Weapon Type: {}", character.weapon_type);
    let _ = writeln!(output, "- Rarity: {}★", character.rarity);
    let _ = writeln!(output, "- Role: {}", character.role);
    let _ = writeln!(output, "- Description: {}", character.description);
    output
}

/// Renders the builds recorded for `name`, optionally restricted to one role.
#[must_use]
pub fn list_builds(catalog: &Catalog, name: &str, role_filter: Option<&str>) -> String {
    let id = normalize_id(name);
    let Some(builds) = catalog.builds_for(&id) else {
        return format!("No builds found for '{name}'.");
    };

    // A blank role means no filter.
    let role_filter = role_filter.map(str::trim).filter(|r| !r.is_empty());
    let selected: Vec<&Build> = builds
        .iter()
        .filter(|b| role_filter.is_none_or(|role| b.role.eq_ignore_ascii_case(role)))
        .collect();

    let mut output = format!("**Build Guide for {}**\n\n", display_name(catalog, &id));
    if selected.is_empty()
        && let Some(role) = role_filter
    {
        let _ = writeln!(output, "No {role} builds found.");
        return output;
    }

    for build in selected {
        let _ = writeln!(output, "**{} Build:**", build.role);
        let _ = writeln!(output, "- Main Stats: {}", format_main_stats(build));
        let _ = writeln!(output, "- Artifact Sets: {}", build.artifact_sets.join(", "));
        let _ = writeln!(output, "- Weapons: {}", build.weapons.join(", "));
        let _ = writeln!(
            output,
            "- Substat Priority: {}",
            build.substats_priority.join(" > ")
        );
        let _ = writeln!(
            output,
            "- Talent Priority: {}",
            build.talent_priority.join(" > ")
        );
        output.push('\n');
    }
    output
}

/// Renders the team compositions recorded for `name`.
#[must_use]
pub fn list_teams(catalog: &Catalog, name: &str) -> String {
    let id = normalize_id(name);
    let Some(teams) = catalog.teams_for(&id) else {
        return format!("No team compositions found for '{name}'.");
    };

    let mut output = format!("**Team Compositions for {}**\n\n", display_name(catalog, &id));
    for team in teams {
        let _ = writeln!(output, "**{}:**", team.name);
        let _ = writeln!(output, "- {}", format_members(team));
        output.push('\n');
    }
    output
}

/// Renders a complete markdown guide: overview, builds and optionally teams.
///
/// Only the character table decides whether a guide exists; build and team
/// sections are simply omitted when the character has none.
#[must_use]
pub fn build_guide(catalog: &Catalog, name: &str, include_teams: bool) -> String {
    let id = normalize_id(name);
    let Some(character) = catalog.character(&id) else {
        return format!("Character '{name}' not found.");
    };

    let mut output = format!("# Complete Build Guide for {}\n\n", character.name);
    write_overview(&mut output, character);

    if let Some(builds) = catalog.builds_for(&id) {
        output.push_str("## Recommended Builds\n\n");
        for build in builds {
            let _ = writeln!(output, "### {} Build", build.role);
            let _ = writeln!(output, "**Main Stats:** {}", format_main_stats(build));
            let _ = writeln!(
                output,
                "**Artifact Sets:** {}",
                build.artifact_sets.join(", ")
            );
            let _ = writeln!(output, "**Weapons:** {}", build.weapons.join(", "));
            let _ = writeln!(
                output,
                "**Substat Priority:** {}",
                build.substats_priority.join(" > ")
            );
            let _ = writeln!(
                output,
                "**Talent Priority:** {}",
                build.talent_priority.join(" > ")
            );
            output.push('\n');
        }
    }

    if include_teams && let Some(teams) = catalog.teams_for(&id) {
        output.push_str("## Team Compositions\n\n");
        for team in teams {
            let _ = writeln!(output, "**{}:** {}", team.name, format_members(team));
        }
    }

    output
}

fn write_overview(output: &mut String, character: &Character) {
    output.push_str("**Character Overview:**\n");
    let _ = writeln!(output, "- Element: {}", character.element);
    let _ = writeln!(output, "- Weapon: {}", character.weapon_type);
    let _ = writeln!(output, "- Rarity: {}★", character.rarity);
    let _ = writeln!(output, "- Role: {}", character.role);
    let _ = writeln!(output, "- Description: {}", character.description);
    output.push('\n');
}

fn format_main_stats(build: &Build) -> String {
    build
        .main_stats
        .slots()
        .iter()
        .map(|(slot, stat)| format!("{slot}: {stat}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_members(team: &TeamComposition) -> String {
    team.members.join(" | ")
}

/// Display name for headers: the character's own name when known, otherwise
/// the identifier in title case.
fn display_name(catalog: &Catalog, id: &str) -> String {
    catalog
        .character(id)
        .map_or_else(|| title_case(id), |c| c.name.clone())
}

fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = !c.is_alphabetic();
    }
    result
}
