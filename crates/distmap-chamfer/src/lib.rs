//! Chamfer distance transform over binary masks.
//!
//! For every foreground pixel of a [`BinaryMask`] the transform estimates the
//! distance to the nearest background pixel using a 3x3 chamfer mask with an
//! orthogonal and a diagonal step cost. The map is computed in one forward and
//! one backward raster scan over a 16-bit buffer.
//!
//! ```
//! use distmap_chamfer::{BinaryMask, ChamferDistanceTransform, ChamferWeights};
//! use distmap_core::GrayImageView;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pixels = [
//!     255, 255, 255,
//!     255,   0, 255,
//!     255, 255, 255,
//! ];
//! let mask = BinaryMask::new(GrayImageView::new(3, 3, &pixels)?)?;
//! let dt = ChamferDistanceTransform::new(ChamferWeights::BORGEFORS, false)?;
//! let map = dt.distance_map(&mask)?;
//! assert_eq!(map.image.data, vec![4, 3, 4, 3, 0, 3, 4, 3, 4]);
//! assert_eq!(map.max_distance, 4);
//! # Ok(())
//! # }
//! ```
//!
//! Foreground pixels with no background pixel anywhere in the raster keep the
//! [`UNREACHABLE`] sentinel; they are counted in [`DistanceMap::unreachable`]
//! and left out of [`DistanceMap::max_distance`].

mod error;
mod mask;
mod params;
mod progress;
mod result;
pub mod scan;
mod transform;
mod weights;

pub use error::DistanceMapError;
pub use mask::{BinaryMask, DEFAULT_FOREGROUND_LABEL};
pub use params::DistanceMapParams;
pub use progress::{CancelToken, FnProgress, NoProgress, ProgressObserver, ScanPhase};
pub use result::DistanceMap;
pub use scan::UNREACHABLE;
pub use transform::{distance_map, distance_map_from_view, ChamferDistanceTransform};
pub use weights::{ChamferPreset, ChamferWeights};
