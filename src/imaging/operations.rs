//! Card planning built on top of the backend trait.
//!
//! The process stage asks this module what to render (variant filenames
//! and pixel dimensions) and then drives the backend itself, so cache
//! decisions stay out of the imaging layer.

use std::path::Path;

use super::backend::{BackendError, ImageBackend};
use super::calculations::plan_card;
use super::params::{Quality, Sharpening};
use crate::config::CardsConfig;

pub type Result<T> = std::result::Result<T, BackendError>;

/// Render settings for a gallery's cards, resolved from config.
#[derive(Debug, Clone)]
pub struct CardConfig {
    pub aspect: [u32; 2],
    pub width: u32,
    pub quality: Quality,
    pub sharpening: Option<Sharpening>,
}

impl From<&CardsConfig> for CardConfig {
    fn from(cards: &CardsConfig) -> Self {
        CardConfig {
            aspect: cards.aspect_ratio,
            width: cards.width,
            quality: Quality::new(cards.quality),
            sharpening: Some(Sharpening::light()),
        }
    }
}

/// One card file to produce: its name and pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPlan {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// The full set of card files for one screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSetPlan {
    pub base: VariantPlan,
    /// Present only when the source covers 2x in both dimensions.
    pub retina: Option<VariantPlan>,
}

/// Read source dimensions via the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Plan the card variants for a screenshot.
///
/// The base card is always planned, even for sources smaller than the
/// card size (they get upscaled rather than breaking the grid). The
/// retina variant is planned only when the source genuinely covers it.
pub fn plan_card_set(
    filename_stem: &str,
    source_dims: (u32, u32),
    config: &CardConfig,
) -> CardSetPlan {
    let plan = plan_card(source_dims, config.aspect, config.width);

    CardSetPlan {
        base: VariantPlan {
            filename: format!("{filename_stem}-card.jpg"),
            width: plan.base.0,
            height: plan.base.1,
        },
        retina: plan.retina.map(|(w, h)| VariantPlan {
            filename: format!("{filename_stem}-card@2x.jpg"),
            width: w,
            height: h,
        }),
    }
}
