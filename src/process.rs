//! Card rendering from project screenshots.
//!
//! Stage 2 of the foliogen build pipeline. Takes the manifest from the scan
//! stage and renders every project screenshot into its card image set,
//! filling in the screenshot dimensions and card paths the generate stage
//! needs for `width`/`height` attributes and `srcset` markup.
//!
//! ## Output Structure
//!
//! ```text
//! processed/
//! ├── manifest.json                      # Updated manifest with card paths
//! ├── .cache-manifest.json               # Render cache (content-addressed)
//! └── projects/                          # One directory per gallery slug
//!     ├── weather-dashboard-card.jpg     # Base card (config width)
//!     ├── weather-dashboard-card@2x.jpg  # Retina variant (when source covers it)
//!     └── palette-party-card.jpg
//! ```
//!
//! ## Parallel Processing
//!
//! Projects within a gallery are rendered in parallel using
//! [rayon](https://docs.rs/rayon). Progress events stream through an
//! optional channel so the caller can print as work completes instead of
//! waiting for the stage to finish.
//!
//! ## Caching
//!
//! Each card variant is keyed by source content hash + render parameter
//! hash (see [`cache`](crate::cache)). Unchanged screenshots are skipped;
//! renamed projects get their cards copied instead of re-rendered.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::Sender;
use thiserror::Error;

use crate::cache::{self, CacheManifest, CacheStats};
use crate::imaging::{
    BackendError, CardConfig, CardParams, ImageBackend, RustBackend, get_dimensions,
    plan_card_set,
};
use crate::types::{CardSet, SectionKind, SiteManifest};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source screenshot not found: {0}")]
    SourceNotFound(PathBuf),
}

/// How a card variant was produced this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantStatus {
    /// Output already on disk with matching content + params.
    Cached,
    /// Content matched under an old path; file copied to the new location.
    Copied,
    /// Rendered from the source screenshot.
    Rendered,
}

/// One card variant's label and status, for progress display.
#[derive(Debug, Clone)]
pub struct VariantInfo {
    pub label: String,
    pub status: VariantStatus,
}

/// Progress events streamed while processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    GalleryStarted {
        title: String,
        project_count: usize,
    },
    ProjectProcessed {
        /// 1-based position within the gallery.
        index: usize,
        title: String,
        /// None for projects without a screenshot.
        source_path: Option<String>,
        variants: Vec<VariantInfo>,
    },
}

/// Result of a process run: the filled-in manifest plus cache stats.
pub struct ProcessResult {
    pub manifest: SiteManifest,
    pub cache_stats: CacheStats,
}

pub fn process(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(
        &backend,
        manifest_path,
        source_root,
        output_dir,
        use_cache,
        events,
    )
}

/// Process screenshots using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let mut manifest: SiteManifest = serde_json::from_str(&manifest_content)?;

    std::fs::create_dir_all(output_dir)?;

    let cache = Mutex::new(if use_cache {
        CacheManifest::load(output_dir)
    } else {
        CacheManifest::empty()
    });
    let stats = Mutex::new(CacheStats::default());

    for section in &mut manifest.sections {
        let SectionKind::Gallery { cards, projects } = &mut section.kind else {
            continue;
        };
        send_event(
            &events,
            ProcessEvent::GalleryStarted {
                title: section.title.clone(),
                project_count: projects.len(),
            },
        );

        let card_config = CardConfig::from(&*cards);
        let gallery_dir = output_dir.join(&section.slug);
        std::fs::create_dir_all(&gallery_dir)?;

        // One result per project, in gallery order (rayon's collect
        // preserves input order even though work interleaves).
        let results: Vec<(Option<(u32, u32)>, Option<CardSet>)> = projects
            .par_iter()
            .enumerate()
            .map(|(i, project)| {
                let Some(screenshot) = &project.screenshot else {
                    send_event(
                        &events,
                        ProcessEvent::ProjectProcessed {
                            index: i + 1,
                            title: project.title.clone(),
                            source_path: None,
                            variants: Vec::new(),
                        },
                    );
                    return Ok((None, None));
                };

                let source = source_root.join(&screenshot.source_path);
                if !source.exists() {
                    return Err(ProcessError::SourceNotFound(source));
                }

                let dims = get_dimensions(backend, &source)?;
                let (card_set, variants) = render_card_set(
                    backend,
                    &cache,
                    &stats,
                    &source,
                    output_dir,
                    &section.slug,
                    &project.slug,
                    dims,
                    &card_config,
                )?;

                send_event(
                    &events,
                    ProcessEvent::ProjectProcessed {
                        index: i + 1,
                        title: project.title.clone(),
                        source_path: Some(screenshot.source_path.clone()),
                        variants,
                    },
                );
                Ok((Some(dims), Some(card_set)))
            })
            .collect::<Result<Vec<_>, ProcessError>>()?;

        for (project, (dims, card)) in projects.iter_mut().zip(results) {
            if let Some(screenshot) = &mut project.screenshot {
                screenshot.dimensions = dims;
                screenshot.card = card;
            }
        }
    }

    let cache = cache.into_inner().unwrap();
    cache.save(output_dir)?;

    Ok(ProcessResult {
        manifest,
        cache_stats: stats.into_inner().unwrap(),
    })
}

fn send_event(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // Receiver may have hung up; progress display is best-effort
        let _ = tx.send(event);
    }
}

/// Render (or reuse) the card variants for one screenshot.
#[allow(clippy::too_many_arguments)]
fn render_card_set(
    backend: &impl ImageBackend,
    cache: &Mutex<CacheManifest>,
    stats: &Mutex<CacheStats>,
    source: &Path,
    output_dir: &Path,
    gallery_slug: &str,
    project_slug: &str,
    source_dims: (u32, u32),
    config: &CardConfig,
) -> Result<(CardSet, Vec<VariantInfo>), ProcessError> {
    let plan = plan_card_set(project_slug, source_dims, config);
    let source_hash = cache::hash_file(source)?;
    let mut variants = Vec::new();

    let base_rel = format!("{}/{}", gallery_slug, plan.base.filename);
    let status = render_variant(
        backend,
        cache,
        source,
        &source_hash,
        output_dir,
        &base_rel,
        plan.base.width,
        plan.base.height,
        config,
    )?;
    record_status(stats, &status);
    variants.push(VariantInfo {
        label: "card".to_string(),
        status,
    });

    let retina = match &plan.retina {
        Some(retina_plan) => {
            let retina_rel = format!("{}/{}", gallery_slug, retina_plan.filename);
            let status = render_variant(
                backend,
                cache,
                source,
                &source_hash,
                output_dir,
                &retina_rel,
                retina_plan.width,
                retina_plan.height,
                config,
            )?;
            record_status(stats, &status);
            variants.push(VariantInfo {
                label: "retina".to_string(),
                status,
            });
            Some(retina_rel)
        }
        None => None,
    };

    Ok((
        CardSet {
            base: base_rel,
            retina,
            width: plan.base.width,
            height: plan.base.height,
        },
        variants,
    ))
}

/// Render a single variant, consulting the cache first.
#[allow(clippy::too_many_arguments)]
fn render_variant(
    backend: &impl ImageBackend,
    cache: &Mutex<CacheManifest>,
    source: &Path,
    source_hash: &str,
    output_dir: &Path,
    rel_path: &str,
    width: u32,
    height: u32,
    config: &CardConfig,
) -> Result<VariantStatus, ProcessError> {
    let params_hash = cache::hash_card_params(
        width,
        height,
        config.quality.value(),
        config.sharpening.map(|s| (s.sigma, s.threshold)),
    );

    let cached = cache
        .lock()
        .unwrap()
        .find_cached(source_hash, &params_hash, output_dir);

    let status = match cached {
        Some(stored) if stored == rel_path => VariantStatus::Cached,
        Some(stored) => {
            // Content unchanged but the project moved; copy instead of render
            std::fs::copy(output_dir.join(&stored), output_dir.join(rel_path))?;
            VariantStatus::Copied
        }
        None => {
            backend.render_card(&CardParams {
                source: source.to_path_buf(),
                output: output_dir.join(rel_path),
                width,
                height,
                quality: config.quality,
                sharpening: config.sharpening,
            })?;
            VariantStatus::Rendered
        }
    };

    cache.lock().unwrap().insert(
        rel_path.to_string(),
        source_hash.to_string(),
        params_hash,
    );
    Ok(status)
}

fn record_status(stats: &Mutex<CacheStats>, status: &VariantStatus) {
    let mut stats = stats.lock().unwrap();
    match status {
        VariantStatus::Cached => stats.hit(),
        VariantStatus::Copied => stats.copy(),
        VariantStatus::Rendered => stats.miss(),
    }
}
