//! Shared types used across all pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → process →
//! generate); every stage reads and writes the same definitions, so the
//! manifest written by one stage deserializes unchanged in the next.

use serde::{Deserialize, Serialize};

use crate::config::{CardsConfig, SiteConfig};

/// The site manifest: everything scan learned about the content root,
/// enriched by process with image dimensions and card paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteManifest {
    /// Resolved configuration (stock defaults + root `config.toml`).
    pub config: SiteConfig,
    /// Page sections between hero and contact, in number order.
    pub sections: Vec<Section>,
}

/// One section of the single page, sourced from a numbered content entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Anchor id (`NNN-name` name part, sanitized). Unique across the page;
    /// `home` and `contact` are reserved for the structural sections.
    pub slug: String,
    /// Heading text: first `# heading` for prose, display title otherwise.
    pub title: String,
    /// Navigation label (display title from the filename).
    pub nav_label: String,
    /// Sort key from the number prefix.
    pub sort_key: u32,
    /// What the section contains.
    pub kind: SectionKind,
}

/// Section payload: markdown prose or a gallery of projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionKind {
    /// A numbered `.md` file. Body is raw markdown (title heading stripped).
    Prose { body: String },
    /// A numbered directory of project subdirectories. Card settings are
    /// resolved through the config cascade (stock → root → gallery).
    Gallery {
        cards: CardsConfig,
        projects: Vec<Project>,
    },
}

/// A project card in a gallery section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Anchor-safe identifier, unique within the gallery.
    pub slug: String,
    /// Display title (`project.toml` title, else directory name).
    pub title: String,
    /// Filter key: sanitized category (`data-category` value).
    pub category: String,
    /// Human-readable category label (filter button text).
    pub category_label: String,
    /// Technology tags shown on the card.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Card blurb, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    /// True when `blurb` is markdown (from `description.md`).
    #[serde(default)]
    pub blurb_markdown: bool,
    /// Link to the source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Link to a live demo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    /// Card image, if the project directory holds a screenshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Screenshot>,
    /// Sort key from the number prefix (unnumbered projects sort last).
    pub sort_key: u32,
}

/// A project screenshot. Scan records the source; process fills in
/// dimensions and the encoded card set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshot {
    /// Path to the original file, relative to the content root.
    pub source_path: String,
    /// Original filename (for output naming).
    pub filename: String,
    /// Source pixel dimensions, filled in by process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    /// Encoded card images, filled in by process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardSet>,
}

/// Encoded card images for one screenshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSet {
    /// 1× JPEG, relative to the processed/output root.
    pub base: String,
    /// 2× JPEG when the source was large enough for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retina: Option<String>,
    /// Rendered dimensions of the 1× image.
    pub width: u32,
    pub height: u32,
}

/// A gallery filter category: key (`data-category`/`data-filter` value)
/// plus the label shown on the filter button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
}

/// Collect the distinct categories of a gallery, in order of first
/// appearance. The filter bar renders these after the `all` button.
pub fn gallery_categories(projects: &[Project]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    for project in projects {
        if !categories.iter().any(|c| c.key == project.category) {
            categories.push(Category {
                key: project.category.clone(),
                label: project.category_label.clone(),
            });
        }
    }
    categories
}
