//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (section, project) is its semantic identity, title and
//! positional index, with filesystem paths shown as secondary context via
//! indented `Source:` lines. This makes the output readable as a content
//! inventory while still letting users trace data back to specific files.
//!
//! # Entity Display Contract
//!
//! Every entity follows a consistent two-level pattern across all stages:
//!
//! 1. **Header line**: positional index + title (+ optional detail like project count)
//! 2. **Context lines**: indented `Source:`, `Category:`, variant status, etc.
//!
//! Shared helpers ([`entity_header`], [`indent`]) enforce this pattern so
//! scan, process, and generate output look consistent for the same entities.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Sections
//! 001 About Me
//!     Markdown: 3 lines
//! 002 projects (3 projects)
//!     Categories: Web Apps, General
//!     001 Weather Dashboard
//!         Category: Web Apps
//!         Source: 020-projects/010-Weather-Dashboard/001-cover.png
//!
//! Site
//!     Name: Ada Lovelace
//!     Email: ada@example.com
//! ```
//!
//! ## Process
//!
//! Streams one block per gallery as rendering progresses:
//!
//! ```text
//! projects (3 projects)
//!     001 Weather Dashboard
//!         Source: 020-projects/010-Weather-Dashboard/001-cover.png
//!         card: rendered
//!         retina: cached
//! ```
//!
//! ## Generate
//!
//! ```text
//! Site
//!     index.html (5 sections)
//!     Cards: 4 copied
//!     Assets: 2 copied
//!     Output: dist
//! ```
//!
//! # Design: Format vs Print
//!
//! Each stage has a pure `format_*` function returning `Vec<String>` (unit
//! testable, no side effects) and a thin `print_*` wrapper that joins and
//! prints. Tests target the format functions.

use std::path::Path;

use crate::generate::GenerateResult;
use crate::process::{ProcessEvent, VariantStatus};
use crate::types::{SectionKind, SiteManifest, gallery_categories};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Zero-padded 3-digit positional index: 1 -> "001".
fn format_index(index: usize) -> String {
    format!("{:0>3}", index)
}

/// Four spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for an entity: index + title + optional detail.
///
/// `entity_header(1, "projects", Some("3 projects"))` ->
/// `"001 projects (3 projects)"`.
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{} {} ({})", format_index(index), title, detail),
        None => format!("{} {}", format_index(index), title),
    }
}

/// "1 project", "3 projects".
fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Truncate display text to `max` characters, appending "..." when cut.
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

fn status_word(status: &VariantStatus) -> &'static str {
    match status {
        VariantStatus::Cached => "cached",
        VariantStatus::Copied => "copied",
        VariantStatus::Rendered => "rendered",
    }
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Format the scan stage's content inventory.
pub fn format_scan_output(manifest: &SiteManifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Sections".to_string());
    for (i, section) in manifest.sections.iter().enumerate() {
        match &section.kind {
            SectionKind::Prose { body } => {
                lines.push(entity_header(i + 1, &section.title, None));
                lines.push(format!(
                    "{}Markdown: {}",
                    indent(1),
                    count_noun(body.lines().count(), "line")
                ));
            }
            SectionKind::Gallery { projects, .. } => {
                lines.push(entity_header(
                    i + 1,
                    &section.title,
                    Some(&count_noun(projects.len(), "project")),
                ));
                let categories = gallery_categories(projects);
                if !categories.is_empty() {
                    let labels: Vec<&str> =
                        categories.iter().map(|c| c.label.as_str()).collect();
                    lines.push(format!("{}Categories: {}", indent(1), labels.join(", ")));
                }
                for (j, project) in projects.iter().enumerate() {
                    lines.push(format!(
                        "{}{}",
                        indent(1),
                        entity_header(j + 1, &project.title, None)
                    ));
                    lines.push(format!(
                        "{}Category: {}",
                        indent(2),
                        project.category_label
                    ));
                    if !project.tags.is_empty() {
                        lines.push(format!(
                            "{}Tags: {}",
                            indent(2),
                            project.tags.join(", ")
                        ));
                    }
                    match &project.screenshot {
                        Some(shot) => {
                            lines.push(format!(
                                "{}Source: {}",
                                indent(2),
                                shot.source_path
                            ));
                        }
                        None => lines.push(format!("{}(no screenshot)", indent(2))),
                    }
                    if let Some(blurb) = &project.blurb {
                        lines.push(format!(
                            "{}Blurb: {}",
                            indent(2),
                            truncate_text(blurb, 60)
                        ));
                    }
                }
            }
        }
    }

    lines.push(String::new());
    lines.push("Site".to_string());
    lines.push(format!("{}Name: {}", indent(1), manifest.config.site.name));
    if !manifest.config.site.role.is_empty() {
        lines.push(format!("{}Role: {}", indent(1), manifest.config.site.role));
    }
    lines.push(format!("{}Email: {}", indent(1), manifest.config.site.email));

    lines
}

pub fn print_scan_output(manifest: &SiteManifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Process
// ---------------------------------------------------------------------------

/// Format a single process progress event.
///
/// Called from the printer thread as events arrive, so output streams while
/// rendering is still running.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::GalleryStarted {
            title,
            project_count,
        } => {
            vec![format!(
                "{} ({})",
                title,
                count_noun(*project_count, "project")
            )]
        }
        ProcessEvent::ProjectProcessed {
            index,
            title,
            source_path,
            variants,
        } => {
            let mut lines = vec![format!(
                "{}{}",
                indent(1),
                entity_header(*index, title, None)
            )];
            match source_path {
                Some(path) => {
                    lines.push(format!("{}Source: {}", indent(2), path));
                    for variant in variants {
                        lines.push(format!(
                            "{}{}: {}",
                            indent(2),
                            variant.label,
                            status_word(&variant.status)
                        ));
                    }
                }
                None => lines.push(format!("{}(no screenshot)", indent(2))),
            }
            lines
        }
    }
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

/// Format the generate stage summary.
pub fn format_generate_output(
    manifest: &SiteManifest,
    result: &GenerateResult,
    output_dir: &Path,
) -> Vec<String> {
    // Hero and contact are synthesized around the content sections
    let section_count = manifest.sections.len() + 2;
    vec![
        "Site".to_string(),
        format!(
            "{}index.html ({})",
            indent(1),
            count_noun(section_count, "section")
        ),
        format!("{}Cards: {} copied", indent(1), result.cards_copied),
        format!("{}Assets: {} copied", indent(1), result.assets_copied),
        format!("{}Output: {}", indent(1), output_dir.display()),
    ]
}

pub fn print_generate_output(
    manifest: &SiteManifest,
    result: &GenerateResult,
    output_dir: &Path,
) {
    for line in format_generate_output(manifest, result, output_dir) {
        println!("{}", line);
    }
}
