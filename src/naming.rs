//! Centralized filename parsing for the NNN-name convention.
//!
//! Every content entry type (section files, gallery directories, project
//! directories, screenshots) follows the same naming pattern: an optional
//! numeric prefix (`NNN-`) followed by a name. This module provides a single
//! parsing function that extracts both parts consistently.
//!
//! ## Display Titles
//!
//! Dashes in the name portion are converted to spaces for display. This
//! applies uniformly to all entry types:
//! - `020-Weather-Dashboard/` → "Weather Dashboard" (project title)
//! - `010-about.md` → "about" (section title fallback)
//! - `001-cover.png` → "cover" (screenshot title)

/// Result of parsing a numbered entry name like `020-Weather-Dashboard`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Weather-Dashboard`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// Handles these patterns:
/// - `"020-Weather-Dashboard"` → number=Some(20), name="Weather-Dashboard", display_title="Weather Dashboard"
/// - `"010-about"` → number=Some(10), name="about", display_title="about"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"001-"` → number=Some(1), name="", display_title=""
/// - `"cover"` → number=None, name="cover", display_title="cover"
/// - `"wip-experiments"` → number=None, name="wip-experiments", display_title="wip experiments"
pub fn parse_entry_name(name: &str) -> ParsedName {
    // Try splitting on first dash
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            let raw = &name[dash_pos + 1..];
            return ParsedName {
                number: Some(num),
                name: raw.to_string(),
                display_title: raw.replace('-', " "),
            };
        }
    }
    // Check if the entire string is a pure number (no dash)
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    // No number prefix
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}
