// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! Built-in catalog data.

use std::collections::BTreeMap;

use super::{Build, Catalog, Character, MainStats, TeamComposition};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn character(
    name: &str,
    element: &str,
    weapon_type: &str,
    rarity: u8,
    role: &str,
    description: &str,
) -> Character {
    Character {
        name: name.to_string(),
        element: element.to_string(),
        weapon_type: weapon_type.to_string(),
        rarity,
        role: role.to_string(),
        description: description.to_string(),
    }
}

fn main_stats(sands: &str, goblet: &str, circlet: &str) -> MainStats {
    MainStats {
        sands: sands.to_string(),
        goblet: goblet.to_string(),
        circlet: circlet.to_string(),
    }
}

fn team(name: &str, members: &[&str]) -> TeamComposition {
    TeamComposition {
        name: name.to_string(),
        members: strings(members),
    }
}

fn characters() -> BTreeMap<String, Character> {
    [
        (
            "mavuika",
            character(
                "Mavuika",
                "Pyro",
                "Claymore",
                5,
                "DPS/Support",
                "The Pyro Archon with powerful elemental abilities",
            ),
        ),
        (
            "neuvillette",
            character(
                "Neuvillette",
                "Hydro",
                "Catalyst",
                5,
                "DPS",
                "Hydro DPS with charge attack focus",
            ),
        ),
        (
            "kazuha",
            character(
                "Kazuha",
                "Anemo",
                "Sword",
                5,
                "Support",
                "Anemo support with crowd control and elemental damage bonus",
            ),
        ),
        (
            "nahida",
            character(
                "Nahida",
                "Dendro",
                "Catalyst",
                5,
                "Support/DPS",
                "Dendro Archon with reaction-based abilities",
            ),
        ),
        (
            "furina",
            character(
                "Furina",
                "Hydro",
                "Sword",
                5,
                "Support",
                "Hydro support with summoning abilities",
            ),
        ),
    ]
    .into_iter()
    .map(|(id, c)| (id.to_string(), c))
    .collect()
}

fn builds() -> BTreeMap<String, Vec<Build>> {
    let mavuika = vec![
        Build {
            role: "DPS".to_string(),
            main_stats: main_stats("ATK%", "Pyro DMG%", "CRIT Rate/DMG"),
            artifact_sets: strings(&["Crimson Witch of Flames", "Gilded Dreams"]),
            weapons: strings(&["Wolf's Gravestone", "Serpent Spine", "Prototype Archaic"]),
            substats_priority: strings(&["CRIT Rate", "CRIT DMG", "ATK%", "Energy Recharge"]),
            talent_priority: strings(&["Elemental Skill", "Elemental Burst", "Normal Attack"]),
        },
        Build {
            role: "Support".to_string(),
            main_stats: main_stats("Energy Recharge", "Pyro DMG%", "CRIT Rate"),
            artifact_sets: strings(&["Noblesse Oblige", "Emblem of Severed Fate"]),
            weapons: strings(&["Favonius Greatsword", "Sacrificial Greatsword"]),
            substats_priority: strings(&["Energy Recharge", "CRIT Rate", "ATK%", "CRIT DMG"]),
            talent_priority: strings(&["Elemental Burst", "Elemental Skill", "Normal Attack"]),
        },
    ];

    let neuvillette = vec![Build {
        role: "DPS".to_string(),
        main_stats: main_stats("HP%", "Hydro DMG%", "CRIT Rate/DMG"),
        artifact_sets: strings(&["Heart of Depth", "Marechaussee Hunter"]),
        weapons: strings(&[
            "Lost Prayer to the Sacred Winds",
            "The Widsith",
            "Prototype Amber",
        ]),
        substats_priority: strings(&["CRIT Rate", "CRIT DMG", "HP%", "Energy Recharge"]),
        talent_priority: strings(&["Normal Attack", "Elemental Skill", "Elemental Burst"]),
    }];

    let kazuha = vec![Build {
        role: "Support".to_string(),
        main_stats: main_stats(
            "Energy Recharge/Elemental Mastery",
            "Elemental Mastery",
            "Elemental Mastery",
        ),
        artifact_sets: strings(&["Viridescent Venerer", "Instructor"]),
        weapons: strings(&["Freedom-Sworn", "Iron Sting", "Sacrificial Sword"]),
        substats_priority: strings(&[
            "Elemental Mastery",
            "Energy Recharge",
            "ATK%",
            "CRIT Rate",
        ]),
        talent_priority: strings(&["Elemental Burst", "Elemental Skill", "Normal Attack"]),
    }];

    BTreeMap::from([
        ("mavuika".to_string(), mavuika),
        ("neuvillette".to_string(), neuvillette),
        ("kazuha".to_string(), kazuha),
    ])
}

fn teams() -> BTreeMap<String, Vec<TeamComposition>> {
    BTreeMap::from([
        (
            "mavuika".to_string(),
            vec![
                team("Vape Team", &["Mavuika", "Xingqiu", "Bennett", "Kazuha"]),
                team("Melt Team", &["Mavuika", "Rosaria", "Kaeya", "Bennett"]),
                team("Mono Pyro", &["Mavuika", "Bennett", "Xiangling", "Kazuha"]),
            ],
        ),
        (
            "neuvillette".to_string(),
            vec![
                team("Hydro Team", &["Neuvillette", "Furina", "Kazuha", "Baizhu"]),
                team("Hypercarry", &["Neuvillette", "Zhongli", "Kazuha", "Bennett"]),
            ],
        ),
        (
            "kazuha".to_string(),
            vec![
                team("National Team", &["Kazuha", "Xiangling", "Xingqiu", "Bennett"]),
                team("Freeze Team", &["Kazuha", "Ayaka", "Mona", "Diona"]),
            ],
        ),
    ])
}

pub(super) fn catalog() -> Catalog {
    Catalog {
        characters: characters(),
        builds: builds(),
        teams: teams(),
    }
}
