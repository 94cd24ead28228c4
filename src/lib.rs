//! # Foliogen
//!
//! A static site generator for single-page developer portfolios. Your
//! filesystem is the page: numbered markdown files become prose sections,
//! numbered directories become project galleries, and a hero plus a contact
//! section are synthesized from `config.toml`.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Foliogen processes content through three independent stages, each producing
//! a JSON manifest that the next stage consumes:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Process   manifest  →  processed/       (screenshot → card images)
//! 3. Generate  manifest  →  dist/            (final HTML page)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each manifest is human-readable JSON you can inspect.
//! - **Incremental builds**: skip stages whose inputs haven't changed.
//! - **Testability**: each stage is a pure function from manifest to manifest,
//!   so unit tests can exercise pipeline logic without touching the filesystem
//!   or encoding images.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the content directory, extracts metadata, produces the scan manifest |
//! | [`process`] | Stage 2: renders card images (1x and 2x) from project screenshots |
//! | [`generate`] | Stage 3: renders the final HTML page from the process manifest using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS variable generation |
//! | [`types`] | Shared types serialized between stages (`SiteManifest`, `Section`, `Project`) |
//! | [`naming`] | `NNN-name` filename convention parser used by all entry types |
//! | [`metadata`] | Project metadata resolution: `project.toml`, `description.md`, name fallback |
//! | [`imaging`] | Pure-Rust card planning and rendering behind the `ImageBackend` trait |
//! | [`cache`] | Content-addressed card cache keyed on source bytes and render params |
//! | [`behavior`] | Runtime behavior of the generated page: thresholds, validation, filtering |
//! | [`contract`] | Element ids and attribute needles the page script binds to |
//! | [`output`] | CLI output formatting: tree-based display of pipeline results |
//!
//! # Design Decisions
//!
//! ## One Page, Synthesized Ends
//!
//! The output is a single `index.html`. Scanned sections land between a hero
//! section built from `[identity]` config and a contact section built from the
//! same block, so every site gets the `#home` and `#contact` anchors without
//! any content files. Anchor navigation, section highlighting, and the back to
//! top control all assume this shape.
//!
//! ## The Markup Contract
//!
//! The generated page carries a static script that wires up navigation, theme
//! switching, the contact form, and gallery filtering. Element ids and
//! behavior thresholds live in [`contract`] and [`behavior`] on the Rust side
//! and are injected into the page as a JSON config block, so the script never
//! hardcodes a value the generator also knows. After rendering,
//! [`contract::missing_markers`] verifies every hook the script binds to is
//! present; a template regression fails the build instead of silently
//! producing a dead page.
//!
//! ## JPEG Cards
//!
//! Card images are encoded as JPEG at a configurable quality. The pure-Rust
//! encoder stack only supports lossless WebP, which would make the quality
//! setting meaningless, so WebP is accepted as an input format but never
//! written. Retina (2x) variants are only rendered when the screenshot is
//! large enough to supply real pixels for them.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions, not stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Pure-Rust Imaging (No ImageMagick)
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, unsharp
//! mask, JPEG encoding). This eliminates system dependencies entirely: no
//! `apt install`, no Homebrew, no version conflicts. A user can download a
//! single binary and it just works, on any machine, indefinitely.
//!
//! ## NNN-Prefix Ordering
//!
//! Sections, projects, and screenshots use a numeric prefix (`010-`, `020-`,
//! etc.) for explicit ordering, parsed by [`naming::parse_entry_name`]. Root
//! entries without a prefix are skipped entirely, which is where drafts live.
//! The filesystem is the source of truth; no database, no front-matter, no
//! separate ordering file.
//!
//! # The Output
//!
//! The generated site is one HTML file with inlined CSS and vanilla
//! JavaScript, a set of card images, and whatever lives in `assets/`. It can
//! be dropped on any file server. No Node, no PHP, no database.

pub mod behavior;
pub mod cache;
pub mod config;
pub mod contract;
pub mod generate;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
