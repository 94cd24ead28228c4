//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. Configuration
//! is hierarchical: stock defaults are overridden by the root config file, and
//! a gallery directory may override card settings for its own projects.
//!
//! ## Config File Location
//!
//! Place `config.toml` in the content root and/or any gallery directory:
//!
//! ```text
//! content/
//! ├── config.toml              # Root config (overrides stock defaults)
//! ├── 010-about.md
//! └── 020-projects/
//!     ├── config.toml          # Gallery config (overrides root; [cards] only
//!     │                        # is meaningful here)
//!     ├── 010-Weather-Dashboard/
//!     └── 020-Task-Tracker/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Your Name"        # Hero heading and page title
//! role = "Software Developer"
//! tagline = "I build things for the web."  # Typed out in the hero
//! summary = ""              # Hero paragraph
//! email = "you@example.com" # Shown in the contact section
//! location = ""             # Shown in the contact section when set
//!
//! [[site.links]]            # Footer/contact links, in order
//! label = "GitHub"
//! url = "https://github.com/you"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f6f8fa"       # Cards, header, form fields
//! text = "#1f2328"
//! text_muted = "#59636e"
//! border = "#d1d9e0"
//! accent = "#0969da"        # Links, buttons, active states
//! accent_hover = "#0550ae"
//!
//! [colors.dark]
//! background = "#0d1117"
//! surface = "#151b23"
//! text = "#f0f6fc"
//! text_muted = "#9198a1"
//! border = "#3d444d"
//! accent = "#4493f8"
//! accent_hover = "#79c0ff"
//!
//! [theme]
//! max_width = "72rem"       # Content column width
//! card_gap = "1.5rem"       # Gap between project cards
//! radius = "0.75rem"        # Corner radius for cards and fields
//!
//! [theme.section_pad_y]
//! size = "8vw"              # Preferred vertical section padding
//! min = "3rem"              # Minimum vertical section padding
//! max = "6rem"              # Maximum vertical section padding
//!
//! [behavior]
//! back_to_top_px = 500      # Show back-to-top strictly past this scroll
//! header_offset_px = 80     # Fixed header height for scroll offsets
//! section_min_fraction = 0.3 # Visibility needed to qualify as active
//! scroll_throttle_ms = 100
//! reveal_threshold = 0.1
//! reveal_margin_px = 50
//! submit_delay_ms = 1500
//! banner_duration_ms = 5000
//! filter_fade_ms = 300
//! typewriter_start_ms = 500
//! typewriter_char_ms = 70
//! parallax_factor = 0.35
//! tap_breakpoint_px = 768
//!
//! [cards]
//! aspect_ratio = [3, 2]     # width:height ratio for card images
//! width = 640               # 1x card width in pixels (2x derived)
//! quality = 82              # JPEG quality (0-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! # Only override the accent color
//! [colors.light]
//! accent = "#bc4c00"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Who the portfolio is about (hero and contact content).
    pub site: IdentityConfig,
    /// Color schemes for light and dark themes.
    pub colors: ColorConfig,
    /// Theme/layout settings (column width, card spacing, radii).
    pub theme: ThemeConfig,
    /// Tuning constants consumed by the page script.
    pub behavior: BehaviorConfig,
    /// Card image settings (aspect ratio, width, quality).
    pub cards: CardsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.site.email.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.email must not be empty".into(),
            ));
        }
        if self.cards.quality > 100 {
            return Err(ConfigError::Validation("cards.quality must be 0-100".into()));
        }
        if self.cards.aspect_ratio[0] == 0 || self.cards.aspect_ratio[1] == 0 {
            return Err(ConfigError::Validation(
                "cards.aspect_ratio values must be non-zero".into(),
            ));
        }
        if self.cards.width == 0 {
            return Err(ConfigError::Validation("cards.width must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.behavior.section_min_fraction)
            || self.behavior.section_min_fraction == 0.0
        {
            return Err(ConfigError::Validation(
                "behavior.section_min_fraction must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.behavior.reveal_threshold) {
            return Err(ConfigError::Validation(
                "behavior.reveal_threshold must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.behavior.parallax_factor) {
            return Err(ConfigError::Validation(
                "behavior.parallax_factor must be in [0, 1]".into(),
            ));
        }
        if self.behavior.banner_duration_ms == 0 {
            return Err(ConfigError::Validation(
                "behavior.banner_duration_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Identity and contact content (`[site]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Display name, used in the hero heading and the page title.
    pub name: String,
    /// Role line shown under the name.
    pub role: String,
    /// Line typed out character-by-character in the hero.
    pub tagline: String,
    /// Hero paragraph. Empty string renders nothing.
    pub summary: String,
    /// Contact email shown in the contact section.
    pub email: String,
    /// Location shown in the contact section. Empty string renders nothing.
    pub location: String,
    /// External profile links, rendered in declared order.
    pub links: Vec<SocialLink>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            role: "Software Developer".to_string(),
            tagline: "I build things for the web.".to_string(),
            summary: String::new(),
            email: "you@example.com".to_string(),
            location: String::new(),
            links: Vec::new(),
        }
    }
}

/// One external profile link (`[[site.links]]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Card image settings (`[cards]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    /// Aspect ratio as `[width, height]`, e.g. `[3, 2]` for landscape cards.
    pub aspect_ratio: [u32; 2],
    /// 1× card width in pixels. The 2× variant doubles this when the
    /// source screenshot is large enough.
    pub width: u32,
    /// JPEG encoding quality (0 = worst, 100 = best).
    pub quality: u32,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: [3, 2],
            width: 640,
            quality: 82,
        }
    }
}

/// Tuning constants for the page script (`[behavior]`).
///
/// These are embedded in the generated page as JSON and read by the script
/// at startup, so the numbers live in exactly one place. Defaults match the
/// documented site behavior; override with care.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Back-to-top becomes visible strictly past this scroll position.
    /// At exactly this value it stays hidden.
    pub back_to_top_px: u32,
    /// Fixed header height; in-page scrolls stop this far above the target.
    pub header_offset_px: u32,
    /// Minimum visible fraction for a section to qualify as active.
    pub section_min_fraction: f64,
    /// Scroll handler throttle interval.
    pub scroll_throttle_ms: u32,
    /// IntersectionObserver threshold for reveal-on-scroll.
    pub reveal_threshold: f64,
    /// Bottom root margin for reveal-on-scroll, in pixels (applied negative).
    pub reveal_margin_px: u32,
    /// Artificial delay before the simulated form submission resolves.
    pub submit_delay_ms: u32,
    /// How long the success banner stays up before auto-dismissing.
    pub banner_duration_ms: u32,
    /// Duration of each phase of the filter fade (out, then in).
    pub filter_fade_ms: u32,
    /// Delay before the hero typewriter starts.
    pub typewriter_start_ms: u32,
    /// Delay between typed characters.
    pub typewriter_char_ms: u32,
    /// Hero parallax displacement as a fraction of scroll position.
    pub parallax_factor: f64,
    /// Viewport width below which cards use tap-toggle instead of hover.
    pub tap_breakpoint_px: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            back_to_top_px: 500,
            header_offset_px: 80,
            section_min_fraction: 0.3,
            scroll_throttle_ms: 100,
            reveal_threshold: 0.1,
            reveal_margin_px: 50,
            submit_delay_ms: 1500,
            banner_duration_ms: 5000,
            filter_fade_ms: 300,
            typewriter_start_ms: 500,
            typewriter_char_ms: 70,
            parallax_factor: 0.35,
            tap_breakpoint_px: 768,
        }
    }
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
///
/// - `size`: the preferred/fluid value, typically viewport-relative (e.g. `"8vw"`)
/// - `min`: the minimum bound (e.g. `"3rem"`)
/// - `max`: the maximum bound (e.g. `"6rem"`)
///
/// Generates `clamp(min, size, max)` in the output CSS.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"8vw"`).
    pub size: String,
    /// Minimum bound (e.g. `"3rem"`).
    pub min: String,
    /// Maximum bound (e.g. `"6rem"`).
    pub max: String,
}

impl ClampSize {
    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

/// Theme/layout settings (`[theme]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Content column max width (CSS value).
    pub max_width: String,
    /// Gap between project cards in the gallery grid (CSS value).
    pub card_gap: String,
    /// Corner radius for cards, buttons, and form fields (CSS value).
    pub radius: String,
    /// Vertical padding of each page section.
    pub section_pad_y: ClampSize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            max_width: "72rem".to_string(),
            card_gap: "1.5rem".to_string(),
            radius: "0.75rem".to_string(),
            section_pad_y: ClampSize {
                size: "8vw".to_string(),
                min: "3rem".to_string(),
                max: "6rem".to_string(),
            },
        }
    }
}

/// Color configuration for light and dark themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light theme color scheme (the default theme).
    pub light: ColorScheme,
    /// Dark theme color scheme (`data-theme="dark"`).
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Raised-surface color (cards, header, form fields).
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (nav, captions, tags).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Accent color (links, buttons, active nav, focus rings).
    pub accent: String,
    /// Accent hover color.
    pub accent_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f6f8fa".to_string(),
            text: "#1f2328".to_string(),
            text_muted: "#59636e".to_string(),
            border: "#d1d9e0".to_string(),
            accent: "#0969da".to_string(),
            accent_hover: "#0550ae".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0d1117".to_string(),
            surface: "#151b23".to_string(),
            text: "#f0f6fc".to_string(),
            text_muted: "#9198a1".to_string(),
            border: "#3d444d".to_string(),
            accent: "#4493f8".to_string(),
            accent_hover: "#79c0ff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// Used to resolve a fully-merged config at any point in the directory hierarchy.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Foliogen Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config files can be placed at two levels:
#   content/config.toml               -> root (overrides stock defaults)
#   content/020-projects/config.toml  -> gallery (overrides root; only the
#                                        [cards] section is meaningful here)
#
# Each level only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Identity - hero and contact content
# ---------------------------------------------------------------------------
[site]
name = "Your Name"
role = "Software Developer"

# Typed out character-by-character in the hero.
tagline = "I build things for the web."

# Hero paragraph. Leave empty to render nothing.
summary = ""

email = "you@example.com"

# Shown in the contact section when set.
location = ""

# External profile links, rendered in order. Repeat the block per link.
# [[site.links]]
# label = "GitHub"
# url = "https://github.com/you"

# ---------------------------------------------------------------------------
# Colors - Light theme (the default)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f6f8fa"       # Cards, header, form fields
text = "#1f2328"
text_muted = "#59636e"    # Nav, captions, tags
border = "#d1d9e0"
accent = "#0969da"        # Links, buttons, active states
accent_hover = "#0550ae"

# ---------------------------------------------------------------------------
# Colors - Dark theme (data-theme="dark")
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0d1117"
surface = "#151b23"
text = "#f0f6fc"
text_muted = "#9198a1"
border = "#3d444d"
accent = "#4493f8"
accent_hover = "#79c0ff"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Content column max width (CSS value).
max_width = "72rem"

# Gap between project cards in the gallery grid (CSS value).
card_gap = "1.5rem"

# Corner radius for cards, buttons, and form fields (CSS value).
radius = "0.75rem"

# Vertical section padding, as CSS clamp(min, size, max).
[theme.section_pad_y]
size = "8vw"
min = "3rem"
max = "6rem"

# ---------------------------------------------------------------------------
# Behavior - constants the page script reads
# ---------------------------------------------------------------------------
[behavior]
# Back-to-top becomes visible strictly past this scroll position (px).
back_to_top_px = 500

# Fixed header height; in-page scrolls stop this far above the target (px).
header_offset_px = 80

# Minimum visible fraction for a section to count as active (0-1).
section_min_fraction = 0.3

# Scroll handler throttle interval (ms).
scroll_throttle_ms = 100

# Reveal-on-scroll: visibility threshold (0-1) and bottom margin (px).
reveal_threshold = 0.1
reveal_margin_px = 50

# Simulated form submission: busy delay, then banner lifetime (ms).
submit_delay_ms = 1500
banner_duration_ms = 5000

# Duration of each phase of the gallery filter fade (ms).
filter_fade_ms = 300

# Hero typewriter: start delay and per-character delay (ms).
typewriter_start_ms = 500
typewriter_char_ms = 70

# Hero parallax displacement as a fraction of scroll position (0-1).
parallax_factor = 0.35

# Viewport width below which cards use tap-toggle instead of hover (px).
tap_breakpoint_px = 768

# ---------------------------------------------------------------------------
# Card images
# ---------------------------------------------------------------------------
[cards]
# Aspect ratio as [width, height] for card image crops.
# Common choices: [3, 2] for landscape, [16, 9] for wide, [1, 1] for square.
aspect_ratio = [3, 2]

# 1x card width in pixels. A 2x variant is produced when the source is
# large enough.
width = 640

# JPEG encoding quality (0 = worst, 100 = best).
quality = 82

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
///
/// Light values go on `:root` (the default theme); dark values are scoped to
/// the `data-theme="dark"` document attribute so the theme toggle, not the
/// OS preference, decides which set applies.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-accent-hover: {light_accent_hover};
}}

[data-theme="dark"] {{
    --color-bg: {dark_bg};
    --color-surface: {dark_surface};
    --color-text: {dark_text};
    --color-text-muted: {dark_text_muted};
    --color-border: {dark_border};
    --color-accent: {dark_accent};
    --color-accent-hover: {dark_accent_hover};
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_accent_hover = colors.light.accent_hover,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_accent_hover = colors.dark.accent_hover,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --max-width: {max_width};
    --card-gap: {card_gap};
    --radius: {radius};
    --section-pad-y: {section_pad_y};
}}"#,
        max_width = theme.max_width,
        card_gap = theme.card_gap,
        radius = theme.radius,
        section_pad_y = theme.section_pad_y.to_css(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0d1117");
    }

    #[test]
    fn default_config_has_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "Your Name");
        assert_eq!(config.site.email, "you@example.com");
        assert!(config.site.links.is_empty());
    }

    #[test]
    fn default_config_has_card_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.cards.aspect_ratio, [3, 2]);
        assert_eq!(config.cards.width, 640);
        assert_eq!(config.cards.quality, 82);
        assert_eq!(config.theme.section_pad_y.to_css(), "clamp(3rem, 8vw, 6rem)");
    }

    #[test]
    fn default_behavior_matches_documented_site_behavior() {
        let b = BehaviorConfig::default();
        assert_eq!(b.back_to_top_px, 500);
        assert_eq!(b.header_offset_px, 80);
        assert_eq!(b.section_min_fraction, 0.3);
        assert_eq!(b.reveal_threshold, 0.1);
        assert_eq!(b.reveal_margin_px, 50);
        assert_eq!(b.banner_duration_ms, 5000);
        assert_eq!(b.tap_breakpoint_px, 768);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.light.background, "#fafafa");
        // Default values preserved
        assert_eq!(config.colors.light.text, "#1f2328");
        assert_eq!(config.colors.dark.background, "#0d1117");
        // Card settings should be defaults
        assert_eq!(config.cards.width, 640);
    }

    #[test]
    fn parse_card_settings() {
        let toml = r##"
[cards]
aspect_ratio = [1, 1]
width = 480
quality = 70
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.cards.aspect_ratio, [1, 1]);
        assert_eq!(config.cards.width, 480);
        assert_eq!(config.cards.quality, 70);
        // Unspecified defaults preserved
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn parse_identity_with_links() {
        let toml = r##"
[site]
name = "Ada Lovelace"
role = "Systems Engineer"

[[site.links]]
label = "GitHub"
url = "https://github.com/ada"

[[site.links]]
label = "Mastodon"
url = "https://example.social/@ada"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.name, "Ada Lovelace");
        assert_eq!(config.site.links.len(), 2);
        assert_eq!(config.site.links[0].label, "GitHub");
        assert_eq!(config.site.links[1].url, "https://example.social/@ada");
        // Unset identity fields keep defaults
        assert_eq!(config.site.email, "you@example.com");
    }

    #[test]
    fn parse_behavior_overrides() {
        let toml = r#"
[behavior]
back_to_top_px = 300
submit_delay_ms = 0
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.behavior.back_to_top_px, 300);
        assert_eq!(config.behavior.submit_delay_ms, 0);
        // Unset behavior keys keep defaults
        assert_eq!(config.behavior.header_offset_px, 80);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0d1117");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        fs::write(
            &config_path,
            r##"
[colors.light]
background = "#123456"
text = "#abcdef"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.colors.light.background, "#123456");
        assert_eq!(config.colors.light.text, "#abcdef");
        // Unspecified values should be defaults
        assert_eq!(config.colors.dark.background, "#0d1117");
    }

    #[test]
    fn load_config_full_palette() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        fs::write(
            &config_path,
            r##"
[colors.light]
background = "#fff"
surface = "#f5f5f5"
text = "#000"
text_muted = "#666"
border = "#ccc"
accent = "#00f"
accent_hover = "#008"

[colors.dark]
background = "#111"
surface = "#1a1a1a"
text = "#eee"
text_muted = "#888"
border = "#444"
accent = "#88f"
accent_hover = "#aaf"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();

        // Light theme
        assert_eq!(config.colors.light.background, "#fff");
        assert_eq!(config.colors.light.text, "#000");
        assert_eq!(config.colors.light.accent, "#00f");

        // Dark theme
        assert_eq!(config.colors.dark.background, "#111");
        assert_eq!(config.colors.dark.text, "#eee");
        assert_eq!(config.colors.dark.accent, "#88f");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn generate_css_includes_all_variables() {
        let colors = ColorConfig::default();
        let css = generate_color_css(&colors);

        // Check all CSS variables are present
        assert!(css.contains("--color-bg:"));
        assert!(css.contains("--color-surface:"));
        assert!(css.contains("--color-text:"));
        assert!(css.contains("--color-text-muted:"));
        assert!(css.contains("--color-border:"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("--color-accent-hover:"));
    }

    #[test]
    fn generate_css_scopes_dark_to_theme_attribute() {
        let colors = ColorConfig::default();
        let css = generate_color_css(&colors);

        assert!(css.contains(r#"[data-theme="dark"]"#));
        // Attribute theming, not OS preference
        assert!(!css.contains("prefers-color-scheme"));
    }

    #[test]
    fn color_scheme_default_is_light() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.background, "#ffffff");
    }

    #[test]
    fn clamp_size_to_css() {
        let size = ClampSize {
            size: "8vw".to_string(),
            min: "3rem".to_string(),
            max: "6rem".to_string(),
        };
        assert_eq!(size.to_css(), "clamp(3rem, 8vw, 6rem)");
    }

    #[test]
    fn generate_theme_css_includes_layout_variables() {
        let theme = ThemeConfig::default();
        let css = generate_theme_css(&theme);
        assert!(css.contains("--max-width: 72rem"));
        assert!(css.contains("--card-gap: 1.5rem"));
        assert!(css.contains("--radius: 0.75rem"));
        assert!(css.contains("--section-pad-y: clamp(3rem, 8vw, 6rem)"));
    }

    #[test]
    fn parse_theme_layout_values() {
        let toml = r#"
[theme]
max_width = "64rem"
card_gap = "1rem"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.max_width, "64rem");
        assert_eq!(config.theme.card_gap, "1rem");
        // Unset layout keys keep defaults
        assert_eq!(config.theme.radius, "0.75rem");
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn default_processing_config() {
        let config = ProcessingConfig::default();
        assert_eq!(config.max_processes, None);
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let threads = effective_threads(&config);
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let threads = effective_threads(&config);
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn parse_processing_config() {
        let toml = r#"
[processing]
max_processes = 4
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.processing.max_processes, Some(4));
    }

    #[test]
    fn parse_config_without_processing_uses_default() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.processing.max_processes, None);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"quality = 82"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"quality = 70"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("quality").unwrap().as_integer(), Some(70));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[cards]
width = 640
quality = 82
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[cards]
quality = 70
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let cards = merged.get("cards").unwrap();
        assert_eq!(cards.get("quality").unwrap().as_integer(), Some(70));
        // width preserved from base
        assert_eq!(cards.get("width").unwrap().as_integer(), Some(640));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn merge_toml_three_layers() {
        let stock: toml::Value = toml::from_str(
            r#"
[cards]
quality = 82
width = 640
"#,
        )
        .unwrap();
        let root: toml::Value = toml::from_str(
            r#"
[cards]
quality = 85
"#,
        )
        .unwrap();
        let gallery: toml::Value = toml::from_str(
            r#"
[cards]
quality = 70
"#,
        )
        .unwrap();

        let merged = merge_toml(merge_toml(stock, root), gallery);
        let cards = merged.get("cards").unwrap();
        assert_eq!(cards.get("quality").unwrap().as_integer(), Some(70));
        // width preserved from stock
        assert_eq!(cards.get("width").unwrap().as_integer(), Some(640));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[cards]
qualty = 82
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[cardz]
quality = 82
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r##"
[colors.light]
bg = "#fff"
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[cards]
qualty = 82
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_quality_boundary_ok() {
        let mut config = SiteConfig::default();
        config.cards.quality = 100;
        assert!(config.validate().is_ok());

        config.cards.quality = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_quality_too_high() {
        let mut config = SiteConfig::default();
        config.cards.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn validate_aspect_ratio_zero() {
        let mut config = SiteConfig::default();
        config.cards.aspect_ratio = [0, 2];
        assert!(config.validate().is_err());

        config.cards.aspect_ratio = [3, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_card_width_zero() {
        let mut config = SiteConfig::default();
        config.cards.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_name_rejected() {
        let mut config = SiteConfig::default();
        config.site.name = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.name"));
    }

    #[test]
    fn validate_section_fraction_bounds() {
        let mut config = SiteConfig::default();
        config.behavior.section_min_fraction = 0.0;
        assert!(config.validate().is_err());

        config.behavior.section_min_fraction = 1.0;
        assert!(config.validate().is_ok());

        config.behavior.section_min_fraction = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_banner_duration_nonzero() {
        let mut config = SiteConfig::default();
        config.behavior.banner_duration_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[cards]
quality = 200
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_raw_config(tmp.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_raw_config_returns_value_when_file_exists() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[cards]
quality = 85
"#,
        )
        .unwrap();

        let result = load_raw_config(tmp.path()).unwrap();
        assert!(result.is_some());
        let val = result.unwrap();
        assert_eq!(
            val.get("cards")
                .unwrap()
                .get("quality")
                .unwrap()
                .as_integer(),
            Some(85)
        );
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let base = stock_defaults_value();
        let config = resolve_config(base, None).unwrap();
        assert_eq!(config.cards.quality, 82);
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[cards]
quality = 70
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.cards.quality, 70);
        // Other fields preserved from defaults
        assert_eq!(config.cards.width, 640);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[cards]
quality = 200
"#,
        )
        .unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: SiteConfig = toml::from_str(content).unwrap();
        assert_eq!(config.cards.quality, 82);
        assert_eq!(config.cards.width, 640);
        assert_eq!(config.cards.aspect_ratio, [3, 2]);
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0d1117");
        assert_eq!(config.behavior.back_to_top_px, 500);
        assert_eq!(config.site.name, "Your Name");
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[colors.light]"));
        assert!(content.contains("[colors.dark]"));
        assert!(content.contains("[theme]"));
        assert!(content.contains("[theme.section_pad_y]"));
        assert!(content.contains("[behavior]"));
        assert!(content.contains("[cards]"));
        assert!(content.contains("[processing]"));
    }

    // =========================================================================
    // stock_defaults_value tests
    // =========================================================================

    #[test]
    fn stock_defaults_value_is_table() {
        let val = stock_defaults_value();
        assert!(val.is_table());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.get("site").is_some());
        assert!(val.get("colors").is_some());
        assert!(val.get("theme").is_some());
        assert!(val.get("behavior").is_some());
        assert!(val.get("cards").is_some());
        assert!(val.get("processing").is_some());
    }
}
