//! The markup/script contract.
//!
//! The page script finds its elements by the ids, classes, and data
//! attributes listed here. Both sides of that interface are generated from
//! this module: the templates use these constants when rendering, and
//! [`missing_markers`] checks the rendered document for every required
//! marker so a missing element fails the build instead of silently
//! disabling a behavior.
//!
//! Feature roots that legitimately depend on content (gallery grids, filter
//! bars, reveal elements, deferred-source images) are not listed here; the
//! script treats their absence as the feature being off for this site.

/// Menu toggle button (hamburger).
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
/// The slide-out menu panel the toggle controls.
pub const MENU_ID: &str = "site-menu";
/// Theme toggle button.
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
/// Back-to-top button.
pub const BACK_TO_TOP_ID: &str = "back-to-top";
/// Contact form element.
pub const FORM_ID: &str = "contact-form";
/// Contact form submit button.
pub const SUBMIT_ID: &str = "contact-submit";
/// Live region announcing submission results.
pub const FORM_STATUS_ID: &str = "form-status";
/// Embedded behavior-config JSON element.
pub const CONFIG_ID: &str = "folio-config";
/// Hero tagline element the typewriter retypes.
pub const TAGLINE_ID: &str = "hero-tagline";
/// Hero media element the parallax offsets.
pub const HERO_VISUAL_ID: &str = "hero-visual";

/// Anchor of the structural hero section.
pub const HERO_SLUG: &str = "home";
/// Anchor of the structural contact section.
pub const CONTACT_SLUG: &str = "contact";

/// One required marker: a human name for error messages plus the literal
/// substring the rendered document must contain.
#[derive(Debug, Clone)]
pub struct Marker {
    pub what: &'static str,
    pub needle: String,
}

impl Marker {
    fn id(what: &'static str, id: &str) -> Self {
        Self {
            what,
            needle: format!(r#"id="{id}""#),
        }
    }

    fn class(what: &'static str, class: &str) -> Self {
        Self {
            what,
            needle: format!(r#"class="{class}""#),
        }
    }

    fn field(what: &'static str, name: &str) -> Self {
        Self {
            what,
            needle: format!(r#"name="{name}""#),
        }
    }
}

/// Every marker the page script requires unconditionally.
pub fn required_markers() -> Vec<Marker> {
    vec![
        Marker::class("site header", "site-header"),
        Marker::class("section nav", "site-nav"),
        Marker::id("menu toggle", NAV_TOGGLE_ID),
        Marker::id("menu panel", MENU_ID),
        Marker::id("theme toggle", THEME_TOGGLE_ID),
        Marker::id("back-to-top control", BACK_TO_TOP_ID),
        Marker::id("hero section", HERO_SLUG),
        Marker::id("hero tagline", TAGLINE_ID),
        Marker::id("hero visual", HERO_VISUAL_ID),
        Marker::id("contact section", CONTACT_SLUG),
        Marker::id("contact form", FORM_ID),
        Marker::field("name field", "name"),
        Marker::field("email field", "email"),
        Marker::field("subject field", "subject"),
        Marker::field("message field", "message"),
        Marker::id("submit button", SUBMIT_ID),
        Marker::id("form status region", FORM_STATUS_ID),
        Marker::id("behavior config", CONFIG_ID),
    ]
}

/// Check a rendered document against the contract.
///
/// Returns the markers the document is missing; empty means the page
/// satisfies the script's requirements.
pub fn missing_markers(html: &str) -> Vec<Marker> {
    required_markers()
        .into_iter()
        .filter(|marker| !html.contains(&marker.needle))
        .collect()
}
