use distmap_core::DistanceImage;

use crate::{ChamferWeights, UNREACHABLE};

/// Output of a completed chamfer distance transform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMap {
    /// Distance raster: 0 on background, distance on reached foreground,
    /// [`UNREACHABLE`] on foreground with no background in the raster.
    pub image: DistanceImage,
    /// Largest value over reached foreground pixels (0 if there are none).
    pub max_distance: u16,
    /// Number of foreground pixels left at [`UNREACHABLE`].
    pub unreachable: usize,
    pub weights: ChamferWeights,
    pub normalized: bool,
}

impl DistanceMap {
    #[inline]
    pub fn width(&self) -> usize {
        self.image.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.image.get(x, y)
    }

    /// Distance at `(x, y)`, or `None` if no background pixel reached it.
    #[inline]
    pub fn distance(&self, x: usize, y: usize) -> Option<u16> {
        match self.image.get(x, y) {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Value range `[0, max_distance]` for display calibration.
    #[inline]
    pub fn display_range(&self) -> (u16, u16) {
        (0, self.max_distance)
    }

    pub fn into_image(self) -> DistanceImage {
        self.image
    }
}
