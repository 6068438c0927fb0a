//! Core raster types shared by the `distmap-*` crates.
//!
//! The crate is deliberately small: a borrowed 8-bit view for input masks,
//! owned 8- and 16-bit buffers, and logger setup. It has no notion of
//! distances or weights; those live in `distmap-chamfer`.

mod image;
mod logger;

pub use image::{DistanceImage, GrayImage, GrayImageView, ImageError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
