use distmap_core::{DistanceImage, ImageError};

use crate::ScanPhase;

/// Errors returned by the chamfer distance transform.
#[derive(thiserror::Error, Debug)]
pub enum DistanceMapError {
    #[error("chamfer weights must be > 0 (orthogonal={orthogonal}, diagonal={diagonal})")]
    InvalidWeights { orthogonal: u16, diagonal: u16 },
    #[error("expected exactly two chamfer weights, got {got}")]
    InvalidWeightCount { got: usize },
    #[error("cannot parse chamfer weights from {0:?}")]
    InvalidWeightSpec(String),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("buffer is {got_width}x{got_height}, mask is {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    /// The computation was cancelled between two rows.
    ///
    /// `partial` is a valid but not fully relaxed buffer: every value is an
    /// upper bound of the final distance.
    #[error("distance map cancelled during {phase} after {rows_done} rows")]
    Cancelled {
        phase: ScanPhase,
        rows_done: usize,
        partial: Box<DistanceImage>,
    },
}
