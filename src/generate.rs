//! HTML site generation.
//!
//! Stage 3 of the foliogen build pipeline. Takes the processed manifest and
//! renders the final single-page site.
//!
//! ## Generated Page
//!
//! One `index.html` holding the whole portfolio:
//!
//! - **Header**: brand link, section nav, theme toggle, menu toggle + panel
//! - **Hero** (`#home`): name, role, typewriter tagline, parallax visual
//! - **Prose sections**: markdown content converted to HTML
//! - **Gallery sections**: category filter bar + project cards with
//!   deferred-loading screenshots (monogram placeholder when absent)
//! - **Contact** (`#contact`): email/links plus the validated form
//! - **Footer**, back-to-top control, embedded behavior config JSON,
//!   inline page script
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html             # The whole site
//! ├── assets/                # content/assets/ copied verbatim
//! │   └── favicon.svg
//! └── projects/              # Processed cards (copied, one dir per gallery)
//!     ├── weather-dashboard-card.jpg
//!     └── weather-dashboard-card@2x.jpg
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (color/theme custom properties injected
//!   from config ahead of it)
//! - `static/site.js`: The page script (nav, scroll, form, reveal, gallery
//!   filter, theme)
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. The ids
//! and names the page script relies on come from the [`contract`] module,
//! and the rendered document is checked against [`contract::missing_markers`]
//! before being written, so a template regression fails the build instead of
//! silently disabling a behavior.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::behavior;
use crate::config::{self, SiteConfig};
use crate::contract;
use crate::types::{Project, Section, SectionKind, SiteManifest, gallery_categories};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Rendered page is missing required markup: {0}")]
    ContractViolation(String),
}

/// Counts reported back to the CLI.
pub struct GenerateResult {
    pub cards_copied: usize,
    pub assets_copied: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

pub fn generate(
    manifest_path: &Path,
    processed_dir: &Path,
    output_dir: &Path,
    source_root: &Path,
) -> Result<GenerateResult, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: SiteManifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    // Copy processed cards (manifests excluded) and content assets
    let cards_copied = if processed_dir.is_dir() {
        copy_tree(processed_dir, output_dir, true)?
    } else {
        0
    };
    let assets_dir = source_root.join("assets");
    let assets_copied = if assets_dir.is_dir() {
        copy_tree(&assets_dir, &output_dir.join("assets"), false)?
    } else {
        0
    };

    let favicon = find_favicon(output_dir);
    let html = render_page(&manifest, favicon.as_deref()).into_string();

    let missing = contract::missing_markers(&html);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|m| m.what).collect();
        return Err(GenerateError::ContractViolation(names.join(", ")));
    }

    fs::write(output_dir.join("index.html"), html)?;
    Ok(GenerateResult {
        cards_copied,
        assets_copied,
    })
}

/// Copy a directory tree, returning the number of files copied.
///
/// With `skip_json` set, `.json` files (the stage manifests and the cache
/// manifest) stay behind.
fn copy_tree(src: &Path, dst: &Path, skip_json: bool) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if skip_json && entry.path().extension().is_some_and(|e| e == "json") {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let dst_path = dst.join(rel);
        if let Some(parent) = dst_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dst_path)?;
        copied += 1;
    }
    Ok(copied)
}

/// Pick a favicon link target if the copied assets carry one.
fn find_favicon(output_dir: &Path) -> Option<String> {
    for name in ["favicon.svg", "favicon.ico", "favicon.png"] {
        if output_dir.join("assets").join(name).is_file() {
            return Some(format!("assets/{name}"));
        }
    }
    None
}

/// Tiny head script applying the persisted theme before first paint.
///
/// Runs before the stylesheet so a dark-theme visitor never sees a light
/// flash. Storage access can throw in locked-down contexts; that falls back
/// to the light default.
fn theme_bootstrap() -> String {
    format!(
        "(function(){{try{{if(localStorage.getItem({key:?})===\"dark\")\
document.documentElement.setAttribute(\"data-theme\",\"dark\");}}catch(e){{}}}})();",
        key = behavior::THEME_STORAGE_KEY
    )
}

fn assemble_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    )
}

/// Convert markdown to HTML the way prose sections and blurbs need it.
fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// First letter of a display name, for placeholder monograms.
fn monogram(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

/// Nav entries in page order: hero, content sections, contact.
fn nav_entries(manifest: &SiteManifest) -> Vec<(String, String)> {
    let mut entries = vec![(contract::HERO_SLUG.to_string(), "home".to_string())];
    for section in &manifest.sections {
        entries.push((section.slug.clone(), section.nav_label.clone()));
    }
    entries.push((contract::CONTACT_SLUG.to_string(), "contact".to_string()));
    entries
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Render the complete document.
pub fn render_page(manifest: &SiteManifest, favicon: Option<&str>) -> Markup {
    let site = &manifest.config.site;
    let css = assemble_css(&manifest.config);
    let behavior_json =
        behavior::client_config_json(&manifest.config.behavior).to_string();
    let entries = nav_entries(manifest);

    let title = if site.role.is_empty() {
        site.name.clone()
    } else {
        format!("{} | {}", site.name, site.role)
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content=(site.tagline);
                title { (title) }
                @if let Some(icon) = favicon {
                    link rel="icon" href=(icon);
                }
                script { (PreEscaped(theme_bootstrap())) }
                style { (PreEscaped(css)) }
                noscript {
                    // Content must not stay invisible without the script
                    style { ".reveal{opacity:1;transform:none}" }
                }
            }
            body {
                a.skip-link href={ "#" (contract::HERO_SLUG) } { "Skip to content" }
                (site_header(site.name.as_str(), &entries))
                (menu_panel(&entries))
                main {
                    (hero_section(manifest))
                    @for section in &manifest.sections {
                        (content_section(section))
                    }
                    (contact_section(manifest))
                }
                (site_footer(site.name.as_str()))
                button id=(contract::BACK_TO_TOP_ID) type="button" aria-label="Back to top" {
                    "↑"
                }
                script type="application/json" id=(contract::CONFIG_ID) {
                    (PreEscaped(behavior_json))
                }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

// ============================================================================
// Components
// ============================================================================

fn site_header(name: &str, entries: &[(String, String)]) -> Markup {
    html! {
        header class="site-header" {
            div.header-inner {
                a.brand href={ "#" (contract::HERO_SLUG) } { (name) }
                nav class="site-nav" aria-label="Sections" {
                    ul.nav-links {
                        @for (slug, label) in entries {
                            li {
                                a.nav-link href={ "#" (slug) } data-section=(slug) {
                                    (label)
                                }
                            }
                        }
                    }
                }
                button id=(contract::THEME_TOGGLE_ID) type="button" aria-label="Switch color theme" {
                    span.icon-sun aria-hidden="true" { "☀" }
                    span.icon-moon aria-hidden="true" { "☾" }
                }
                button id=(contract::NAV_TOGGLE_ID) type="button" aria-label="Menu"
                    aria-expanded="false" aria-controls=(contract::MENU_ID) {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
            }
        }
    }
}

/// Slide-out panel the menu toggle controls; duplicates the section links
/// for small screens.
fn menu_panel(entries: &[(String, String)]) -> Markup {
    html! {
        nav id=(contract::MENU_ID) class="site-menu" aria-label="Menu" {
            ul {
                @for (slug, label) in entries {
                    li {
                        a.menu-link href={ "#" (slug) } data-section=(slug) { (label) }
                    }
                }
            }
        }
    }
}

fn hero_section(manifest: &SiteManifest) -> Markup {
    let site = &manifest.config.site;
    html! {
        section id=(contract::HERO_SLUG) class="hero section" {
            div.hero-inner {
                h1.hero-name { (site.name) }
                @if !site.role.is_empty() {
                    p.hero-role { (site.role) }
                }
                p id=(contract::TAGLINE_ID) class="hero-tagline" data-text=(site.tagline) {
                    (site.tagline)
                }
                @if !site.summary.is_empty() {
                    p.hero-summary { (site.summary) }
                }
                div.hero-actions {
                    a.button href={ "#" (contract::CONTACT_SLUG) } { "Get in touch" }
                }
            }
            div id=(contract::HERO_VISUAL_ID) class="hero-visual" aria-hidden="true" {
                span.monogram { (monogram(&site.name)) }
            }
        }
    }
}

fn content_section(section: &Section) -> Markup {
    match &section.kind {
        SectionKind::Prose { body } => html! {
            section id=(section.slug) class="prose-section section" {
                div.section-inner {
                    h2.section-title.reveal { (section.title) }
                    div.prose.reveal { (PreEscaped(markdown_to_html(body))) }
                }
            }
        },
        SectionKind::Gallery { projects, .. } => html! {
            section id=(section.slug) class="gallery-section section" {
                div.section-inner {
                    h2.section-title.reveal { (section.title) }
                    @let categories = gallery_categories(projects);
                    @if categories.len() > 1 {
                        div.filter-bar role="group" aria-label="Filter projects" {
                            button.filter-btn.active type="button"
                                data-filter=(behavior::FILTER_ALL) { "All" }
                            @for category in &categories {
                                button.filter-btn type="button" data-filter=(category.key) {
                                    (category.label)
                                }
                            }
                        }
                    }
                    div.project-grid {
                        @for project in projects {
                            (project_card(project))
                        }
                    }
                }
            }
        },
    }
}

fn project_card(project: &Project) -> Markup {
    let card = project
        .screenshot
        .as_ref()
        .and_then(|shot| shot.card.as_ref());
    let alt = format!("{} screenshot", project.title);

    html! {
        article.project-card.reveal data-category=(project.category) {
            div.card-media {
                @if let Some(card) = card {
                    @let srcset = card
                        .retina
                        .as_ref()
                        .map(|retina| format!("{} 1x, {} 2x", card.base, retina));
                    img.card-image data-src=(card.base) data-srcset=[srcset.as_deref()]
                        width=(card.width) height=(card.height) alt=(alt) decoding="async";
                    noscript {
                        img src=(card.base) width=(card.width) height=(card.height)
                            alt=(alt) loading="lazy";
                    }
                } @else {
                    div.card-placeholder aria-hidden="true" {
                        span { (monogram(&project.title)) }
                    }
                }
            }
            div.card-body {
                h3.card-title { (project.title) }
                span.card-category { (project.category_label) }
                @if let Some(blurb) = &project.blurb {
                    @if project.blurb_markdown {
                        div.card-blurb { (PreEscaped(markdown_to_html(blurb))) }
                    } @else {
                        p.card-blurb { (blurb) }
                    }
                }
                @if !project.tags.is_empty() {
                    ul.card-tags {
                        @for tag in &project.tags {
                            li { (tag) }
                        }
                    }
                }
                @if project.source_url.is_some() || project.demo_url.is_some() {
                    div.card-links {
                        @if let Some(url) = &project.source_url {
                            a href=(url) target="_blank" rel="noopener" { "Source" }
                        }
                        @if let Some(url) = &project.demo_url {
                            a href=(url) target="_blank" rel="noopener" { "Live demo" }
                        }
                    }
                }
            }
        }
    }
}

fn contact_section(manifest: &SiteManifest) -> Markup {
    let site = &manifest.config.site;
    html! {
        section id=(contract::CONTACT_SLUG) class="contact-section section" {
            div.section-inner {
                h2.section-title.reveal { "Get in Touch" }
                div.contact-layout.reveal {
                    div.contact-details {
                        p.contact-pitch {
                            "Have a question, a project, or just want to say hello?"
                        }
                        a.contact-email href={ "mailto:" (site.email) } { (site.email) }
                        @if !site.location.is_empty() {
                            p.contact-location { (site.location) }
                        }
                        @if !site.links.is_empty() {
                            ul.social-links {
                                @for link in &site.links {
                                    li {
                                        a href=(link.url) target="_blank" rel="noopener" {
                                            (link.label)
                                        }
                                    }
                                }
                            }
                        }
                    }
                    form id=(contract::FORM_ID) class="contact-form" novalidate {
                        div.form-field {
                            label for="contact-name" { "Name" }
                            input id="contact-name" name="name" type="text" autocomplete="name";
                        }
                        div.form-field {
                            label for="contact-email" { "Email" }
                            input id="contact-email" name="email" type="email" autocomplete="email";
                        }
                        div.form-field {
                            label for="contact-subject" { "Subject" }
                            input id="contact-subject" name="subject" type="text";
                        }
                        div.form-field {
                            label for="contact-message" { "Message" }
                            textarea id="contact-message" name="message" rows="6" {}
                        }
                        button id=(contract::SUBMIT_ID) type="submit" { "Send Message" }
                        p id=(contract::FORM_STATUS_ID) role="status" aria-live="polite" {}
                    }
                }
            }
        }
    }
}

fn site_footer(name: &str) -> Markup {
    html! {
        footer.site-footer {
            p { "Designed and built by " (name) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
