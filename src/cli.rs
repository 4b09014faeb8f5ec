// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mark Wells <contact@markwells.dev>

//! CLI utilities for terminal output formatting and colors.

use crossterm::tty::IsTty;
use std::io::stdout;

/// Configuration for color output
#[derive(Debug, Clone)]
pub struct ColorConfig {
    pub enabled: bool,
}

impl ColorConfig {
    /// Create a new `ColorConfig`, auto-detecting TTY unless nocolor is true
    #[must_use]
    pub fn new(nocolor: bool) -> Self {
        Self {
            enabled: !nocolor && stdout().is_tty(),
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    /// Green (tool names)
    #[must_use]
    pub fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }

    /// Blue (resource URIs)
    #[must_use]
    pub fn blue(&self, s: &str) -> String {
        self.paint("34", s)
    }

    /// Red (errors)
    #[must_use]
    pub fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }

    /// Bold cyan (section headings)
    #[must_use]
    pub fn heading(&self, s: &str) -> String {
        self.paint("1;36", s)
    }

    /// Dim (descriptions)
    #[must_use]
    pub fn dim(&self, s: &str) -> String {
        self.paint("2", s)
    }
}

/// Get the terminal width, defaulting to 80 if unable to detect
#[must_use]
pub fn terminal_width() -> usize {
    crossterm::terminal::size().map_or(80, |(w, _)| usize::from(w))
}

/// Truncate a string to `max_len` characters, adding "..." if truncated
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if max_len <= 3 {
        return ".".repeat(max_len.min(3));
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Column widths for "name  description" capability listings
#[derive(Debug, PartialEq, Eq)]
pub struct ListingWidths {
    pub name: usize,
    pub description: usize,
}

impl ListingWidths {
    /// Size the name column to the longest name and give the rest of the
    /// terminal to the description, never narrower than its minimum.
    #[must_use]
    pub fn calculate<'a>(term_width: usize, names: impl IntoIterator<Item = &'a str>) -> Self {
        let indent = 4; // "  - "
        let gap = 2;
        let min_description = 20;

        let name = names
            .into_iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0);
        let description = term_width
            .saturating_sub(indent + name + gap)
            .max(min_description);

        Self { name, description }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("test", 4), "test");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("abcdefghij", 7), "abcd...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("5★ Pyro Archon", 20), "5★ Pyro Archon");
        assert_eq!(truncate("★★★★★★", 5), "★★...");
    }

    #[test]
    fn test_truncate_edge_cases() {
        assert_eq!(truncate("hello", 3), "...");
        assert_eq!(truncate("hello", 2), "..");
        assert_eq!(truncate("hello", 1), ".");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_color_config_disabled() {
        let config = ColorConfig::new(true);
        assert!(!config.enabled);
        assert_eq!(config.green("test"), "test");
        assert_eq!(config.blue("test"), "test");
        assert_eq!(config.red("test"), "test");
        assert_eq!(config.heading("test"), "test");
        assert_eq!(config.dim("test"), "test");
    }

    #[test]
    fn test_color_config_enabled() {
        let config = ColorConfig { enabled: true };
        assert_eq!(config.red("x"), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn test_listing_widths() {
        let widths = ListingWidths::calculate(80, ["get_character_info", "create_build_guide"]);
        assert_eq!(widths.name, 18);
        assert_eq!(widths.description, 80 - 4 - 18 - 2);
    }

    #[test]
    fn test_listing_widths_narrow_terminal() {
        let widths = ListingWidths::calculate(30, ["get_character_builds"]);
        assert_eq!(widths.name, 20);
        assert_eq!(widths.description, 20);
    }
}
