use distmap_core::{DistanceImage, GrayImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::progress::RowHook;
use crate::scan::{
    backward_scan_hooked, forward_scan_hooked, foreground_extent, normalize_in_place, seed_buffer,
    Interrupted,
};
use crate::{
    BinaryMask, CancelToken, ChamferWeights, DistanceMap, DistanceMapError, DistanceMapParams,
    NoProgress, ProgressObserver, ScanPhase,
};

/// Two-pass 3x3 chamfer distance transform with a 16-bit buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChamferDistanceTransform {
    weights: ChamferWeights,
    normalize: bool,
}

impl ChamferDistanceTransform {
    /// Create a transform; zero weights are rejected.
    pub fn new(weights: ChamferWeights, normalize: bool) -> Result<Self, DistanceMapError> {
        weights.validate()?;
        if weights.orthogonal > weights.diagonal {
            log::warn!(
                "orthogonal weight {} exceeds diagonal weight {}",
                weights.orthogonal,
                weights.diagonal
            );
        }
        Ok(Self { weights, normalize })
    }

    pub fn from_params(params: &DistanceMapParams) -> Result<Self, DistanceMapError> {
        Self::new(params.weights, params.normalize)
    }

    #[inline]
    pub fn weights(&self) -> ChamferWeights {
        self.weights
    }

    #[inline]
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// Distance of every foreground pixel to the nearest background pixel.
    pub fn distance_map(&self, mask: &BinaryMask<'_>) -> Result<DistanceMap, DistanceMapError> {
        self.distance_map_observed(mask, &mut NoProgress, None)
    }

    /// Same as [`Self::distance_map`], reporting each scanned row to
    /// `observer` and polling `cancel` between rows.
    ///
    /// A cancelled run returns [`DistanceMapError::Cancelled`] with the
    /// partially relaxed buffer.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, mask, observer, cancel),
            fields(width = mask.width(), height = mask.height(), weights = %self.weights)
        )
    )]
    pub fn distance_map_observed(
        &self,
        mask: &BinaryMask<'_>,
        observer: &mut dyn ProgressObserver,
        cancel: Option<&CancelToken>,
    ) -> Result<DistanceMap, DistanceMapError> {
        let mut hook = RowHook::new(observer, cancel);

        hook.phase_started(ScanPhase::Initialization);
        let mut buffer = seed_buffer(mask)?;

        hook.phase_started(ScanPhase::ForwardScan);
        let forward = match forward_scan_hooked(&mut buffer, mask, self.weights, &mut hook) {
            Ok(updated) => updated,
            Err(Interrupted(rows_done)) => {
                return Err(cancelled(ScanPhase::ForwardScan, rows_done, buffer))
            }
        };

        hook.phase_started(ScanPhase::BackwardScan);
        let backward = match backward_scan_hooked(&mut buffer, mask, self.weights, &mut hook) {
            Ok(updated) => updated,
            Err(Interrupted(rows_done)) => {
                return Err(cancelled(ScanPhase::BackwardScan, rows_done, buffer))
            }
        };
        log::debug!("relaxed {forward} pixels forward, {backward} backward");

        if self.normalize {
            hook.phase_started(ScanPhase::Normalization);
            normalize_in_place(&mut buffer, mask, self.weights.orthogonal);
        }

        let (max_distance, unreachable) = foreground_extent(&buffer, mask);
        if unreachable > 0 {
            log::debug!("{unreachable} foreground pixels have no background in range");
        }

        Ok(DistanceMap {
            image: buffer,
            max_distance,
            unreachable,
            weights: self.weights,
            normalized: self.normalize,
        })
    }
}

fn cancelled(phase: ScanPhase, rows_done: usize, buffer: DistanceImage) -> DistanceMapError {
    log::debug!("cancelled during {phase} after {rows_done} rows");
    DistanceMapError::Cancelled {
        phase,
        rows_done,
        partial: Box::new(buffer),
    }
}

/// One-shot helper around [`ChamferDistanceTransform`].
pub fn distance_map(
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
    normalize: bool,
) -> Result<DistanceMap, DistanceMapError> {
    ChamferDistanceTransform::new(weights, normalize)?.distance_map(mask)
}

/// Build the mask from `view` using `params.foreground_label` and run the transform.
pub fn distance_map_from_view(
    view: GrayImageView<'_>,
    params: &DistanceMapParams,
) -> Result<DistanceMap, DistanceMapError> {
    let mask = BinaryMask::with_label(view, params.foreground_label)?;
    ChamferDistanceTransform::from_params(params)?.distance_map(&mask)
}
