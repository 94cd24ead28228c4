//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the foliogen build pipeline. Scans the content root to discover
//! page sections and projects, producing a structured manifest that subsequent
//! stages consume.
//!
//! ## Directory Structure
//!
//! Foliogen expects a specific directory layout:
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── 010-about.md                 # Prose section (numbered = on the page)
//! ├── 020-projects/                # Gallery section (dir of project dirs)
//! │   ├── config.toml              # Gallery config override (optional)
//! │   ├── 010-Weather-Dashboard/   # Project
//! │   │   ├── project.toml         # Category, tags, links (optional)
//! │   │   ├── description.md       # Card blurb (optional)
//! │   │   └── 001-cover.png        # Card image (lowest number wins)
//! │   └── 020-Task-Tracker/
//! │       └── project.toml
//! ├── 030-writing.md               # Another prose section
//! ├── wip-experiments/             # Unnumbered = not rendered
//! └── assets/                      # Copied verbatim to the output root
//! ```
//!
//! ## Naming Conventions
//!
//! - **Numbered entries** (`NNN-name`): Become page sections, sorted by number
//! - **Unnumbered root entries**: Skipped entirely (drafts live here)
//! - **Numbered project directories**: Sorted by number within their gallery;
//!   unnumbered projects sort after numbered ones
//! - **Screenshot 001**: Automatically becomes the project's card image
//!
//! The page itself always opens with a hero section (`#home`) and closes with
//! a contact section (`#contact`), both built from config; scanned sections
//! fill the space between, so those two slugs are reserved.
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - No mixed content (a gallery cannot contain both loose images and
//!   project directories)
//! - No duplicate project numbers within a gallery, and no duplicate
//!   screenshot numbers within a project
//! - Every gallery must contain at least one project
//! - Section slugs must be unique and must not collide with the reserved
//!   `home`/`contact` anchors

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{self, CardsConfig};
use crate::contract;
use crate::imaging::supported_input_extensions;
use crate::metadata;
use crate::naming::{ParsedName, parse_entry_name};
use crate::types::{Project, Screenshot, Section, SectionKind, SiteManifest};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid project.toml in {1}: {0}")]
    ProjectMeta(toml::de::Error, PathBuf),
    #[error("Gallery contains both loose images and project directories: {0}")]
    MixedContent(PathBuf),
    #[error("Duplicate number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Gallery contains no project directories: {0}")]
    EmptyGallery(PathBuf),
    #[error("Duplicate section slug: {0}")]
    DuplicateSlug(String),
    #[error("Section slug {0:?} is reserved for a structural section")]
    ReservedSlug(String),
    #[error("Duplicate project slug {0:?} in {1}")]
    DuplicateProjectSlug(String, PathBuf),
}

/// Names that never count as content entries.
const SKIP_NAMES: &[&str] = &[
    "config.toml",
    "project.toml",
    "description.md",
    "description.txt",
    "assets",
    "processed",
    "dist",
    "manifest.json",
];

pub fn scan(root: &Path) -> Result<SiteManifest, ScanError> {
    // The root-merged value doubles as the base layer for gallery overlays.
    let root_value = match config::load_raw_config(root)? {
        Some(overlay) => config::merge_toml(config::stock_defaults_value(), overlay),
        None => config::stock_defaults_value(),
    };
    let site_config = config::resolve_config(root_value.clone(), None)?;

    let mut sections = Vec::new();
    for entry in sorted_entries(root)? {
        if entry.is_file() && has_extension(&entry, "md") {
            // Parse the stem so the extension never leaks into the slug.
            let stem = entry
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let parsed = parse_entry_name(&stem);
            // Unnumbered root entries are drafts; skip them.
            let Some(number) = parsed.number else {
                continue;
            };
            sections.push(parse_prose_section(&entry, number, &parsed, &stem)?);
        } else if entry.is_dir() {
            let name = entry_name(&entry);
            let parsed = parse_entry_name(&name);
            let Some(number) = parsed.number else {
                continue;
            };
            let (cards, projects) = build_gallery(&entry, root, &root_value)?;
            sections.push(Section {
                slug: section_slug(&parsed.name, &name),
                title: parsed.display_title.clone(),
                nav_label: parsed.display_title,
                sort_key: number,
                kind: SectionKind::Gallery { cards, projects },
            });
        }
    }

    sections.sort_by(|a, b| (a.sort_key, &a.slug).cmp(&(b.sort_key, &b.slug)));
    check_slugs(&sections)?;

    Ok(SiteManifest {
        config: site_config,
        sections,
    })
}

/// Anchor slug for a section: the sanitized name part, falling back to the
/// whole entry name when the name part sanitizes to nothing (`010-`).
fn section_slug(name_part: &str, entry_name: &str) -> String {
    let slug = metadata::sanitize_slug(name_part);
    if slug.is_empty() {
        metadata::sanitize_slug(entry_name)
    } else {
        slug
    }
}

fn check_slugs(sections: &[Section]) -> Result<(), ScanError> {
    let mut seen = Vec::new();
    for section in sections {
        if section.slug == contract::HERO_SLUG || section.slug == contract::CONTACT_SLUG {
            return Err(ScanError::ReservedSlug(section.slug.clone()));
        }
        if seen.contains(&section.slug.as_str()) {
            return Err(ScanError::DuplicateSlug(section.slug.clone()));
        }
        seen.push(&section.slug);
    }
    Ok(())
}

/// Parse a numbered markdown file into a prose section.
///
/// The title comes from the first `# heading`; the heading line is removed
/// from the body so the renderer's own section heading is the only one.
/// Without a heading, the display title from the filename is used.
fn parse_prose_section(
    path: &Path,
    number: u32,
    parsed: &ParsedName,
    stem: &str,
) -> Result<Section, ScanError> {
    let content = fs::read_to_string(path)?;

    let mut lines: Vec<&str> = content.lines().collect();
    let title = match lines.iter().position(|line| line.starts_with("# ")) {
        Some(pos) => {
            let title = lines[pos].trim_start_matches("# ").trim().to_string();
            lines.remove(pos);
            title
        }
        None => parsed.display_title.clone(),
    };
    let body = lines.join("\n").trim().to_string();

    Ok(Section {
        slug: section_slug(&parsed.name, stem),
        title,
        nav_label: parsed.display_title.clone(),
        sort_key: number,
        kind: SectionKind::Prose { body },
    })
}

/// Build a gallery section from a numbered directory of project directories.
///
/// The gallery may carry its own `config.toml`; it is merged over the
/// root-merged config and only the resolved `[cards]` settings are kept.
fn build_gallery(
    path: &Path,
    root: &Path,
    root_value: &toml::Value,
) -> Result<(CardsConfig, Vec<Project>), ScanError> {
    let overlay = config::load_raw_config(path)?;
    let cards = config::resolve_config(root_value.clone(), overlay)?.cards;

    let entries = sorted_entries(path)?;
    let images: Vec<&PathBuf> = entries.iter().filter(|e| is_image(e)).collect();
    let subdirs: Vec<&PathBuf> = entries.iter().filter(|e| e.is_dir()).collect();

    if !images.is_empty() && !subdirs.is_empty() {
        return Err(ScanError::MixedContent(path.to_path_buf()));
    }
    if subdirs.is_empty() {
        return Err(ScanError::EmptyGallery(path.to_path_buf()));
    }

    // Dedupe by number; unnumbered projects sort after numbered ones,
    // preserving name order.
    let mut numbered: BTreeMap<u32, &PathBuf> = BTreeMap::new();
    let mut unnumbered_counter = 0u32;
    for dir in subdirs {
        let name = entry_name(dir);
        match parse_entry_name(&name).number {
            Some(num) => {
                if numbered.contains_key(&num) {
                    return Err(ScanError::DuplicateNumber(num, path.to_path_buf()));
                }
                numbered.insert(num, dir);
            }
            None => {
                let high_num = 1_000_000 + unnumbered_counter;
                unnumbered_counter += 1;
                numbered.insert(high_num, dir);
            }
        }
    }

    let mut projects = Vec::with_capacity(numbered.len());
    for (&sort_key, dir) in &numbered {
        projects.push(build_project(dir, root, sort_key)?);
    }
    check_project_slugs(&projects, path)?;
    Ok((cards, projects))
}

/// Card filenames derive from the project slug, so two projects with the
/// same slug in one gallery would overwrite each other's cards.
fn check_project_slugs(projects: &[Project], gallery: &Path) -> Result<(), ScanError> {
    let mut seen = Vec::new();
    for project in projects {
        if seen.contains(&project.slug.as_str()) {
            return Err(ScanError::DuplicateProjectSlug(
                project.slug.clone(),
                gallery.to_path_buf(),
            ));
        }
        seen.push(&project.slug);
    }
    Ok(())
}

/// Declared project metadata (`project.toml`). All keys optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProjectMeta {
    title: Option<String>,
    category: Option<String>,
    summary: Option<String>,
    tags: Vec<String>,
    source_url: Option<String>,
    demo_url: Option<String>,
}

fn load_project_meta(dir: &Path) -> Result<ProjectMeta, ScanError> {
    let path = dir.join("project.toml");
    if !path.exists() {
        return Ok(ProjectMeta::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ScanError::ProjectMeta(e, path))
}

fn build_project(dir: &Path, root: &Path, sort_key: u32) -> Result<Project, ScanError> {
    let dir_name = entry_name(dir);
    let parsed = parse_entry_name(&dir_name);
    let meta = load_project_meta(dir)?;

    // Declared metadata wins over the filename convention.
    let title = metadata::resolve(&[meta.title.as_deref(), Some(&parsed.display_title)])
        .unwrap_or_else(|| dir_name.clone());
    let category_label =
        metadata::resolve(&[meta.category.as_deref()]).unwrap_or_else(|| "General".to_string());
    let category = metadata::sanitize_slug(&category_label);

    let (blurb, blurb_markdown) = match metadata::resolve(&[meta.summary.as_deref()]) {
        Some(summary) => (Some(summary), false),
        None => match metadata::read_blurb(dir) {
            Some(b) => (Some(b.text), b.markdown),
            None => (None, false),
        },
    };

    let screenshot = find_screenshot(dir, root)?;

    Ok(Project {
        slug: section_slug(&parsed.name, &dir_name),
        title,
        category,
        category_label,
        tags: meta.tags,
        blurb,
        blurb_markdown,
        source_url: meta.source_url,
        demo_url: meta.demo_url,
        screenshot,
        sort_key,
    })
}

/// Pick the project's card image: the lowest-numbered screenshot in the
/// project directory (001 by convention), or the first by name when none
/// are numbered. Projects without any image get a placeholder card.
fn find_screenshot(dir: &Path, root: &Path) -> Result<Option<Screenshot>, ScanError> {
    let entries = sorted_entries(dir)?;
    let mut numbered: BTreeMap<u32, &PathBuf> = BTreeMap::new();
    let mut unnumbered_counter = 0u32;
    for entry in entries.iter().filter(|e| is_image(e)) {
        let name = entry_name(entry);
        let stem = Path::new(&name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        match parse_entry_name(&stem).number {
            Some(num) => {
                if numbered.contains_key(&num) {
                    return Err(ScanError::DuplicateNumber(num, dir.to_path_buf()));
                }
                numbered.insert(num, entry);
            }
            None => {
                let high_num = 1_000_000 + unnumbered_counter;
                unnumbered_counter += 1;
                numbered.insert(high_num, entry);
            }
        }
    }

    Ok(numbered.values().next().map(|path| {
        let rel = path.strip_prefix(root).unwrap_or(path);
        Screenshot {
            source_path: rel.to_string_lossy().replace('\\', "/"),
            filename: entry_name(path),
            dimensions: None,
            card: None,
        }
    }))
}

fn sorted_entries(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = entry_name(p);
            !name.starts_with('.') && !SKIP_NAMES.contains(&name.as_str())
        })
        .collect();
    entries.sort();
    Ok(entries)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Screenshots are admitted by extension; the list comes from the imaging
/// backend so scan only accepts what process can actually decode.
fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    supported_input_extensions().contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{content_fixture, find_gallery, find_project, find_section};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_sections_in_number_order() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let slugs: Vec<&str> = manifest.sections.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["about", "projects", "writing"]);
    }

    #[test]
    fn section_kinds_match_entry_types() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        assert!(matches!(
            find_section(&manifest, "about").kind,
            SectionKind::Prose { .. }
        ));
        assert!(matches!(
            find_section(&manifest, "projects").kind,
            SectionKind::Gallery { .. }
        ));
    }

    #[test]
    fn prose_title_from_first_heading() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let about = find_section(&manifest, "about");
        assert_eq!(about.title, "About Me");
        // Nav label stays the filename-derived form
        assert_eq!(about.nav_label, "about");
    }

    #[test]
    fn prose_body_has_heading_stripped() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let SectionKind::Prose { body } = &find_section(&manifest, "about").kind else {
            panic!("about should be prose");
        };
        assert!(!body.contains("# About Me"));
        assert!(body.contains("small, fast tools"));
    }

    #[test]
    fn prose_title_falls_back_to_filename() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        // 030-writing.md has no heading
        let writing = find_section(&manifest, "writing");
        assert_eq!(writing.title, "writing");
    }

    #[test]
    fn gallery_projects_sorted_by_number() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let projects = find_gallery(&manifest, "projects");
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Weather Dashboard", "Task Tracker", "Palette Party"]
        );
    }

    #[test]
    fn project_category_from_declared_metadata() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let weather = find_project(&manifest, "Weather Dashboard");
        assert_eq!(weather.category, "web-apps");
        assert_eq!(weather.category_label, "Web Apps");
        assert_eq!(weather.tags, vec!["React", "APIs"]);
        assert_eq!(
            weather.source_url.as_deref(),
            Some("https://github.com/ada/weather")
        );
    }

    #[test]
    fn project_without_metadata_gets_general_category() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let palette = find_project(&manifest, "Palette Party");
        assert_eq!(palette.category, "general");
        assert_eq!(palette.category_label, "General");
        assert!(palette.tags.is_empty());
    }

    #[test]
    fn markdown_blurb_preferred_and_flagged() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let weather = find_project(&manifest, "Weather Dashboard");
        assert!(weather.blurb.as_deref().unwrap().contains("**hourly**"));
        assert!(weather.blurb_markdown);

        let tracker = find_project(&manifest, "Task Tracker");
        assert_eq!(tracker.blurb.as_deref(), Some("A fast terminal task list."));
        assert!(!tracker.blurb_markdown);
    }

    #[test]
    fn declared_summary_beats_sidecar() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("020-work").join("010-Thing");
        fs::create_dir_all(&project).unwrap();
        fs::write(
            project.join("project.toml"),
            "summary = \"Declared summary.\"\n",
        )
        .unwrap();
        fs::write(project.join("description.md"), "Sidecar blurb.").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let thing = find_project(&manifest, "Thing");
        assert_eq!(thing.blurb.as_deref(), Some("Declared summary."));
        assert!(!thing.blurb_markdown);
    }

    #[test]
    fn declared_title_beats_dirname() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("020-work").join("010-thing");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("project.toml"), "title = \"The Real Name\"\n").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let projects = find_gallery(&manifest, "work");
        assert_eq!(projects[0].title, "The Real Name");
        // Slug still comes from the directory name
        assert_eq!(projects[0].slug, "thing");
    }

    #[test]
    fn screenshot_is_lowest_numbered_image() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let weather = find_project(&manifest, "Weather Dashboard");
        let shot = weather.screenshot.as_ref().unwrap();
        assert!(shot.source_path.contains("001-cover"));
        assert!(!shot.source_path.starts_with('/'));
        assert_eq!(shot.dimensions, None);
        assert!(shot.card.is_none());
    }

    #[test]
    fn project_without_screenshot_is_allowed() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        let tracker = find_project(&manifest, "Task Tracker");
        assert!(tracker.screenshot.is_none());
    }

    #[test]
    fn unnumbered_root_entries_are_skipped() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        assert!(
            manifest
                .sections
                .iter()
                .all(|s| s.slug != "wip-experiments")
        );
    }

    #[test]
    fn unnumbered_projects_sort_last() {
        let tmp = TempDir::new().unwrap();
        let gallery = tmp.path().join("020-work");
        fs::create_dir_all(gallery.join("zeta")).unwrap();
        fs::create_dir_all(gallery.join("010-Alpha")).unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let projects = find_gallery(&manifest, "work");
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "zeta"]);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn mixed_content_is_error() {
        let tmp = TempDir::new().unwrap();
        let gallery = tmp.path().join("020-work");
        fs::create_dir_all(gallery.join("010-Thing")).unwrap();
        fs::write(gallery.join("stray.png"), "fake image").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::MixedContent(_))));
    }

    #[test]
    fn empty_gallery_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("020-work")).unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::EmptyGallery(_))));
    }

    #[test]
    fn duplicate_project_number_is_error() {
        let tmp = TempDir::new().unwrap();
        let gallery = tmp.path().join("020-work");
        fs::create_dir_all(gallery.join("010-First")).unwrap();
        fs::create_dir_all(gallery.join("010-Second")).unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateNumber(10, _))));
    }

    #[test]
    fn duplicate_screenshot_number_is_error() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("020-work").join("010-Thing");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("001-a.png"), "fake image").unwrap();
        fs::write(project.join("001-b.png"), "fake image").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateNumber(1, _))));
    }

    #[test]
    fn duplicate_section_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("010-about.md"), "# A").unwrap();
        let gallery = tmp.path().join("020-about");
        fs::create_dir_all(gallery.join("010-Thing")).unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateSlug(s)) if s == "about"));
    }

    #[test]
    fn reserved_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("040-contact.md"), "# Reach Me").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::ReservedSlug(s)) if s == "contact"));
    }

    #[test]
    fn duplicate_project_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        let gallery = tmp.path().join("020-work");
        // Different numbers, but both names sanitize to "app"
        fs::create_dir_all(gallery.join("010-App!")).unwrap();
        fs::create_dir_all(gallery.join("020-App?")).unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateProjectSlug(s, _)) if s == "app"));
    }

    #[test]
    fn invalid_project_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("020-work").join("010-Thing");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("project.toml"), "not toml [[[").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::ProjectMeta(_, _))));
    }

    #[test]
    fn unknown_project_key_is_error() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("020-work").join("010-Thing");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("project.toml"), "categry = \"Web\"\n").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::ProjectMeta(_, _))));
    }

    // =========================================================================
    // Config integration tests
    // =========================================================================

    #[test]
    fn config_loaded_from_root() {
        let tmp = content_fixture();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.config.site.name, "Ada Lovelace");
        assert_eq!(manifest.config.site.email, "ada@example.com");
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("010-about.md"), "# Hi").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.name, "Your Name");
        assert_eq!(manifest.config.cards.quality, 82);
    }

    #[test]
    fn gallery_config_overrides_cards() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[cards]\nquality = 85\n").unwrap();

        let overridden = tmp.path().join("020-work");
        fs::create_dir_all(overridden.join("010-Thing")).unwrap();
        fs::write(overridden.join("config.toml"), "[cards]\nquality = 70\n").unwrap();

        let plain = tmp.path().join("030-more");
        fs::create_dir_all(plain.join("010-Other")).unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let SectionKind::Gallery { cards, .. } = &find_section(&manifest, "work").kind else {
            panic!("work should be a gallery");
        };
        assert_eq!(cards.quality, 70);
        // Root value still applies where the gallery doesn't override
        assert_eq!(cards.width, 640);

        let SectionKind::Gallery { cards, .. } = &find_section(&manifest, "more").kind else {
            panic!("more should be a gallery");
        };
        assert_eq!(cards.quality, 85);
    }

    #[test]
    fn invalid_gallery_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let gallery = tmp.path().join("020-work");
        fs::create_dir_all(gallery.join("010-Thing")).unwrap();
        fs::write(gallery.join("config.toml"), "[cards]\nquality = 300\n").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::Config(_))));
    }
}
