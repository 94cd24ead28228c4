//! Card image processing, pure Rust with no external binaries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Card crop** | `resize_to_fill` + `unsharpen` |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Card planning on top of calculations + config

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::card_dimensions;
pub use rust_backend::{RustBackend, supported_input_extensions};
#[cfg(test)]
pub use backend::Dimensions;
pub use operations::{CardConfig, CardSetPlan, VariantPlan, get_dimensions, plan_card_set};
pub use params::{CardParams, Quality, Sharpening};
