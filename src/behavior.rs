//! Client behavior model.
//!
//! The generated page ships a script whose every tuning constant and decision
//! rule is defined here, on the Rust side. The constants travel as a JSON
//! object embedded in the page (see [`client_config_json`]); the decision
//! rules (what counts as a valid email, which section is active, when the
//! back-to-top control shows) are implemented as pure functions so the exact
//! semantics are pinned by fast unit tests, with browser tests covering the
//! wiring end to end.
//!
//! Keeping the model here means the script never hard-codes a number or a
//! pattern: changing `[behavior]` in `config.toml` changes the page, and a
//! rule change happens in exactly one place.

use serde_json::{Value, json};

use crate::config::BehaviorConfig;

/// Local storage key for the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Email shape pattern: `local@domain.tld`, no whitespace, exactly one `@`,
/// at least one dot in the domain with characters on both sides. A shape
/// check, not address validation; the form has no transport behind it.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Serialize the behavior config for the page script.
///
/// Keys are camelCase to read naturally on the consuming side. The email
/// pattern rides along so script and model share one definition.
pub fn client_config_json(behavior: &BehaviorConfig) -> Value {
    json!({
        "backToTopPx": behavior.back_to_top_px,
        "headerOffsetPx": behavior.header_offset_px,
        "sectionMinFraction": behavior.section_min_fraction,
        "scrollThrottleMs": behavior.scroll_throttle_ms,
        "revealThreshold": behavior.reveal_threshold,
        "revealMarginPx": behavior.reveal_margin_px,
        "submitDelayMs": behavior.submit_delay_ms,
        "bannerDurationMs": behavior.banner_duration_ms,
        "filterFadeMs": behavior.filter_fade_ms,
        "typewriterStartMs": behavior.typewriter_start_ms,
        "typewriterCharMs": behavior.typewriter_char_ms,
        "parallaxFactor": behavior.parallax_factor,
        "tapBreakpointPx": behavior.tap_breakpoint_px,
        "emailPattern": EMAIL_PATTERN,
    })
}

// =============================================================================
// Scroll
// =============================================================================

/// Whether the back-to-top control is shown at a given scroll position.
///
/// Strictly greater than the threshold: at exactly `threshold_px` the
/// control stays hidden.
pub fn back_to_top_visible(scroll_y: u32, threshold_px: u32) -> bool {
    scroll_y > threshold_px
}

// =============================================================================
// Active section
// =============================================================================

/// How much of a section is visible, as seen by the scroll handler.
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    /// The section's anchor id.
    pub slug: &'a str,
    /// Fraction of the section's height inside the viewport (0.0 to 1.0).
    pub fraction: f64,
}

/// Fraction of a section visible in the viewport.
///
/// `top` is the section's position relative to the viewport top (negative
/// when scrolled past), `height` the section's full height, and
/// `viewport_height` the window height. The result is the visible overlap
/// divided by the section height, clamped to [0, 1].
pub fn visible_fraction(top: f64, height: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }
    let visible_top = top.max(0.0);
    let visible_bottom = (top + height).min(viewport_height);
    ((visible_bottom - visible_top) / height).clamp(0.0, 1.0)
}

/// Pick the active section: among sections at or above the minimum visible
/// fraction, the one with the greatest visible fraction wins. Exact ties go
/// to the earlier section in document order. Returns `None` when no section
/// qualifies (the caller keeps its previous state).
pub fn resolve_active_section<'a>(
    views: &[SectionView<'a>],
    min_fraction: f64,
) -> Option<&'a str> {
    let mut best: Option<SectionView<'a>> = None;
    for view in views {
        if view.fraction < min_fraction {
            continue;
        }
        // Strict comparison keeps the earlier section on ties.
        if best.is_none_or(|b| view.fraction > b.fraction) {
            best = Some(*view);
        }
    }
    best.map(|v| v.slug)
}

// =============================================================================
// Contact form
// =============================================================================

/// The contact form's fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    /// The field's `name` attribute in the markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }

    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Empty or whitespace-only.
    Required,
    /// Non-empty but not email-shaped.
    InvalidEmail,
}

/// A contact form submission as the script sees it.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormSubmission {
    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }
}

/// Check a string against [`EMAIL_PATTERN`] without a regex engine.
///
/// Matches the pattern exactly: one `@` with a non-empty local part, no
/// whitespace anywhere, and a dot in the domain that is neither its first
/// nor its last character.
pub fn email_shape_ok(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Validate one field the way the blur handler does.
pub fn validate_field(field: FormField, value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    if field == FormField::Email && !email_shape_ok(trimmed) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Validate a whole submission the way the submit handler does.
///
/// Returns every failing field with its reason, in display order. An empty
/// result means the submission proceeds.
pub fn validate_submission(submission: &FormSubmission) -> Vec<(FormField, FieldError)> {
    FormField::ALL
        .iter()
        .filter_map(|&field| {
            validate_field(field, submission.value(field))
                .err()
                .map(|e| (field, e))
        })
        .collect()
}

// =============================================================================
// Gallery filter
// =============================================================================

/// The filter key that matches every card.
pub const FILTER_ALL: &str = "all";

/// Whether a card with the given category stays visible under a filter.
pub fn card_matches(filter: &str, category: &str) -> bool {
    filter == FILTER_ALL || filter == category
}

// =============================================================================
// Reveal-on-scroll
// =============================================================================

/// Per-element reveal state. Elements start `Pending` and move to
/// `Revealed` on first sufficient visibility; `Revealed` is terminal, and
/// the script unobserves the element on the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Pending,
    Revealed,
}

impl RevealState {
    /// Advance on an intersection. Returns true only on the
    /// pending-to-revealed transition.
    pub fn advance(&mut self) -> bool {
        match self {
            RevealState::Pending => {
                *self = RevealState::Revealed;
                true
            }
            RevealState::Revealed => false,
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// The persisted theme preference. Exactly two values exist; anything else
/// read from storage resolves to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The value stored under [`THEME_STORAGE_KEY`] and set as the
    /// document's `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Interpret a stored value. Absent or unrecognized values mean light.
    pub fn from_stored(stored: Option<&str>) -> Self {
        match stored {
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    /// The other preference (what the toggle switches to).
    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}
