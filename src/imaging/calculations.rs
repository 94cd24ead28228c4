//! Pure calculation functions for card dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate card dimensions from aspect ratio and target width.
///
/// # Arguments
/// * `aspect` - Target aspect ratio as `[width, height]`
/// * `width` - Card width in pixels
///
/// # Returns
/// * `(width, height)` - Final card dimensions
///
/// # Examples
/// ```
/// # use foliogen::imaging::card_dimensions;
/// // 3:2 card at 640px wide → 640x427
/// assert_eq!(card_dimensions([3, 2], 640), (640, 427));
///
/// // 16:9 card at 1280px wide → 1280x720
/// assert_eq!(card_dimensions([16, 9], 1280), (1280, 720));
/// ```
pub fn card_dimensions(aspect: [u32; 2], width: u32) -> (u32, u32) {
    let [aspect_w, aspect_h] = aspect;
    let height = (width as f64 * aspect_h as f64 / aspect_w as f64).round() as u32;
    (width, height)
}

/// A planned set of card renders for one screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPlan {
    /// Base (1x) dimensions, always rendered.
    pub base: (u32, u32),
    /// Retina (2x) dimensions, rendered only when the source covers them.
    pub retina: Option<(u32, u32)>,
}

/// Decide which card variants to render for a screenshot.
///
/// The base card is always rendered (small sources are upscaled to fill).
/// The 2x variant is rendered only when the source covers it in both
/// dimensions; upscaling a screenshot to fake retina density would just
/// ship blur at four times the bytes.
///
/// # Arguments
/// * `source` - Original screenshot dimensions (width, height)
/// * `aspect` - Target aspect ratio as `[width, height]`
/// * `width` - Card width in pixels
pub fn plan_card(source: (u32, u32), aspect: [u32; 2], width: u32) -> CardPlan {
    let base = card_dimensions(aspect, width);
    let retina_dims = (base.0 * 2, base.1 * 2);
    let retina = if source.0 >= retina_dims.0 && source.1 >= retina_dims.1 {
        Some(retina_dims)
    } else {
        None
    };
    CardPlan { base, retina }
}
