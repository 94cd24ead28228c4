//! Project metadata resolution.
//!
//! Each project can carry metadata (title, category, blurb) from two
//! independent sources:
//!
//! ## Filesystem sources
//!
//! - **Title**: Derived from the directory name via the `NNN-name` convention.
//!   `010-Weather-Dashboard/` becomes "Weather Dashboard". Simple, requires no
//!   tooling, and consistent with section and screenshot naming.
//!
//! - **Blurb**: Read from a sidecar file inside the project directory.
//!   `description.md` is preferred and rendered as markdown; `description.txt`
//!   is the plain-text fallback. Same pattern as section bodies: text files,
//!   no special format.
//!
//! ## Declared sources (`project.toml`)
//!
//! A project's `project.toml` may declare `title`, `category`, and `summary`
//! explicitly. Declared values represent deliberate curation (the author typed
//! them on purpose) and win over mechanical filename extraction.
//!
//! ## Resolution priority
//!
//! Each field is resolved independently. The first non-empty value wins:
//!
//! - **Title**: `project.toml` title → directory-name title
//! - **Category**: `project.toml` category → `"General"`
//! - **Blurb**: `project.toml` summary → `description.md` → `description.txt`
//!
//! ## Slug sanitization
//!
//! Resolved names end up in anchors and filter keys (section ids, category
//! data attributes), so they are sanitized for safe use: non-URL-safe
//! characters replaced with dashes, consecutive dashes collapsed, truncated to
//! a reasonable length. This keeps fragment links and `data-category` values
//! well-formed no matter what the author typed.

use std::path::Path;

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value. This is the core merge operation used for
/// title and category resolution.
///
/// ```text
/// title:    resolve(&[declared_title,    dirname_title])
/// category: resolve(&[declared_category]).unwrap_or(default)
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// A project blurb read from a sidecar file.
#[derive(Debug, Clone, PartialEq)]
pub struct Blurb {
    /// Trimmed file contents.
    pub text: String,
    /// True when the source was `description.md` and should be rendered
    /// as markdown; false for plain `description.txt`.
    pub markdown: bool,
}

/// Read a project's blurb sidecar.
///
/// Given a project directory, looks for `description.md` first, then
/// `description.txt`, and returns the trimmed contents of the first one
/// that exists and is non-empty.
pub fn read_blurb(project_dir: &Path) -> Option<Blurb> {
    for (filename, markdown) in [("description.md", true), ("description.txt", false)] {
        let text = std::fs::read_to_string(project_dir.join(filename))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(text) = text {
            return Some(Blurb { text, markdown });
        }
    }
    None
}

const MAX_SLUG_LEN: usize = 80;

/// Sanitize a name for use in anchors, filter keys, and filenames.
///
/// - Lowercases ASCII letters
/// - Replaces non-alphanumeric characters (except dashes) with dashes
/// - Collapses consecutive dashes into one
/// - Strips leading and trailing dashes
/// - Truncates to `MAX_SLUG_LEN` characters (breaks at last dash before limit)
pub fn sanitize_slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive dashes
    let mut collapsed = String::with_capacity(slug.len());
    let mut prev_dash = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    // Strip leading/trailing dashes
    let trimmed = collapsed.trim_matches('-');

    // Truncate at word boundary (last dash before limit)
    if trimmed.len() <= MAX_SLUG_LEN {
        trimmed.to_string()
    } else {
        let truncated = &trimmed[..MAX_SLUG_LEN];
        match truncated.rfind('-') {
            Some(pos) => truncated[..pos].to_string(),
            None => truncated.to_string(),
        }
    }
}
