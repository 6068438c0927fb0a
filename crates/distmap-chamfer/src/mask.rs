use distmap_core::GrayImageView;

use crate::DistanceMapError;

/// Label of foreground pixels unless configured otherwise.
pub const DEFAULT_FOREGROUND_LABEL: u8 = 255;

/// Binary interpretation of an 8-bit raster.
///
/// A pixel is foreground iff its value equals `label`; every other value is
/// background.
#[derive(Clone, Copy, Debug)]
pub struct BinaryMask<'a> {
    view: GrayImageView<'a>,
    label: u8,
}

impl<'a> BinaryMask<'a> {
    /// Wrap a validated view using [`DEFAULT_FOREGROUND_LABEL`].
    pub fn new(view: GrayImageView<'a>) -> Result<Self, DistanceMapError> {
        Self::with_label(view, DEFAULT_FOREGROUND_LABEL)
    }

    pub fn with_label(view: GrayImageView<'a>, label: u8) -> Result<Self, DistanceMapError> {
        view.validate()?;
        Ok(Self { view, label })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.view.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.view.height
    }

    #[inline]
    pub fn label(&self) -> u8 {
        self.label
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.view.get(x, y) == self.label
    }

    /// Foreground flags of row `y`.
    pub(crate) fn row(&self, y: usize) -> impl DoubleEndedIterator<Item = bool> + '_ {
        let start = y * self.view.width;
        self.view.data[start..start + self.view.width]
            .iter()
            .map(move |&v| v == self.label)
    }

    pub fn foreground_count(&self) -> usize {
        self.view.data.iter().filter(|&&v| v == self.label).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_label_is_foreground() {
        let data = [0u8, 255, 128, 255, 1, 7];
        let view = GrayImageView::new(3, 2, &data).expect("view");
        let mask = BinaryMask::new(view).expect("mask");
        assert!(!mask.is_foreground(0, 0));
        assert!(mask.is_foreground(1, 0));
        assert!(!mask.is_foreground(2, 0));
        assert!(mask.is_foreground(0, 1));
        assert_eq!(mask.foreground_count(), 2);
        assert_eq!(mask.row(0).collect::<Vec<_>>(), vec![false, true, false]);

        let mask = BinaryMask::with_label(view, 7).expect("mask");
        assert_eq!(mask.foreground_count(), 1);
        assert!(mask.is_foreground(2, 1));
    }

    #[test]
    fn rejects_mismatched_view() {
        let data = [255u8; 3];
        let view = GrayImageView {
            width: 2,
            height: 2,
            data: &data,
        };
        assert!(matches!(
            BinaryMask::new(view),
            Err(DistanceMapError::Image(_))
        ));
    }
}
