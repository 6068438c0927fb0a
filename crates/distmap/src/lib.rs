//! High-level facade crate for the `distmap-*` workspace.
//!
//! This crate provides:
//! - re-exports of the raster types (`distmap-core`) and the chamfer
//!   distance transform (`distmap-chamfer`),
//! - JSON configuration and report types for batch runs,
//! - (feature `image`) adapters from `image::GrayImage` masks to distance maps
//!   and back to 16-bit `image` buffers,
//! - (feature `cli`) the `distmap` command line tool.
//!
//! ## Quickstart
//!
//! ```no_run
//! use distmap::raster;
//! use distmap::{ChamferWeights, DistanceMapParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mask = image::open("cells.png")?.to_luma8();
//! let params = DistanceMapParams::new(ChamferWeights::BORGEFORS, true);
//! let map = raster::distance_map_image(&mask, &params)?;
//! println!("max distance: {}", map.max_distance);
//! raster::to_luma16(&map)?.save("cells_distmap.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `distmap::core`: raster views and owned buffers, logger setup.
//! - `distmap::chamfer`: weights, presets, transform, scans, progress.
//! - `distmap::io`: JSON config and report.
//! - `distmap::raster` (feature `image`): `image` crate adapters.

pub use distmap_chamfer as chamfer;
pub use distmap_core as core;

pub use distmap_chamfer::{
    ChamferDistanceTransform, ChamferPreset, ChamferWeights, DistanceMap, DistanceMapError,
    DistanceMapParams, UNREACHABLE,
};

pub mod io;

#[cfg(feature = "image")]
pub mod raster;
