//! Shared test utilities for the foliogen test suite.
//!
//! Provides a canonical content fixture plus lookup helpers that work with
//! scan-phase data structures (`SiteManifest`, `Section`, `Project`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = content_fixture();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let about = find_section(&manifest, "about");
//! assert_eq!(about.title, "About Me");
//!
//! let weather = find_project(&manifest, "Weather Dashboard");
//! assert_eq!(weather.category, "web-apps");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Project, Section, SectionKind, SiteManifest};

// =========================================================================
// Fixture setup
// =========================================================================

/// Build the canonical content tree in a temp directory and return it.
///
/// The tree exercises every discovery path: prose sections with and without
/// headings, a gallery with categorized/uncategorized projects, markdown and
/// plain-text blurbs, numbered screenshots, a skipped unnumbered directory,
/// and an assets directory.
///
/// ```text
/// config.toml
/// 010-about.md                  # heading + body
/// 020-projects/
///   010-Weather-Dashboard/      # full metadata, md blurb, two screenshots
///   020-Task-Tracker/           # txt blurb, no screenshot
///   030-Palette-Party/          # no metadata at all
/// 030-writing.md                # no heading
/// wip-experiments/              # unnumbered, skipped
/// assets/favicon.svg
/// ```
pub fn content_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        &root.join("config.toml"),
        r#"[site]
name = "Ada Lovelace"
role = "Systems Programmer"
tagline = "I make machines do the math."
email = "ada@example.com"
location = "London"

[[site.links]]
label = "GitHub"
url = "https://github.com/ada"
"#,
    );

    write(
        &root.join("010-about.md"),
        "# About Me\n\nI build small, fast tools and write about how they work.\n",
    );

    let weather = root.join("020-projects").join("010-Weather-Dashboard");
    fs::create_dir_all(&weather).unwrap();
    write(
        &weather.join("project.toml"),
        r#"category = "Web Apps"
tags = ["React", "APIs"]
source_url = "https://github.com/ada/weather"
demo_url = "https://weather.example.com"
"#,
    );
    write(
        &weather.join("description.md"),
        "Realtime forecasts with **hourly** detail.\n",
    );
    write(&weather.join("001-cover.png"), "fake png bytes");
    write(&weather.join("002-detail.png"), "fake png bytes");

    let tracker = root.join("020-projects").join("020-Task-Tracker");
    fs::create_dir_all(&tracker).unwrap();
    write(&tracker.join("description.txt"), "A fast terminal task list.\n");

    let palette = root.join("020-projects").join("030-Palette-Party");
    fs::create_dir_all(&palette).unwrap();
    write(&palette.join("001-swatches.png"), "fake png bytes");

    write(
        &root.join("030-writing.md"),
        "Notes on systems programming, parsers, and the occasional detour.\n",
    );

    let wip = root.join("wip-experiments");
    fs::create_dir_all(&wip).unwrap();
    write(&wip.join("001-secret.png"), "fake png bytes");

    let assets = root.join("assets");
    fs::create_dir_all(&assets).unwrap();
    write(&assets.join("favicon.svg"), "<svg></svg>");

    tmp
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Write a small decodable PNG for stages that read real pixels.
///
/// Scan never decodes images, so most fixtures use fake bytes; process and
/// generate tests swap in real ones via this helper.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Find a section by slug. Panics if not found.
pub fn find_section<'a>(manifest: &'a SiteManifest, slug: &str) -> &'a Section {
    manifest
        .sections
        .iter()
        .find(|s| s.slug == slug)
        .unwrap_or_else(|| {
            let slugs = section_slugs(manifest);
            panic!("section '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a gallery section's projects by slug. Panics if the section is
/// missing or is not a gallery.
pub fn find_gallery<'a>(manifest: &'a SiteManifest, slug: &str) -> &'a [Project] {
    match &find_section(manifest, slug).kind {
        SectionKind::Gallery { projects, .. } => projects,
        SectionKind::Prose { .. } => panic!("section '{slug}' is prose, not a gallery"),
    }
}

/// Find a project by title across all galleries. Panics if not found.
pub fn find_project<'a>(manifest: &'a SiteManifest, title: &str) -> &'a Project {
    let all: Vec<&Project> = manifest
        .sections
        .iter()
        .filter_map(|s| match &s.kind {
            SectionKind::Gallery { projects, .. } => Some(projects.iter()),
            SectionKind::Prose { .. } => None,
        })
        .flatten()
        .collect();
    all.iter()
        .find(|p| p.title == title)
        .copied()
        .unwrap_or_else(|| {
            let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
            panic!("project '{title}' not found. Available: {titles:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All section slugs in page order.
pub fn section_slugs(manifest: &SiteManifest) -> Vec<&str> {
    manifest.sections.iter().map(|s| s.slug.as_str()).collect()
}

/// All section nav labels in page order.
pub fn nav_labels(manifest: &SiteManifest) -> Vec<&str> {
    manifest
        .sections
        .iter()
        .map(|s| s.nav_label.as_str())
        .collect()
}
