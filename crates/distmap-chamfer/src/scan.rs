//! Buffer seeding and the two directional relaxation passes.
//!
//! Both passes read and write the same buffer in place. The forward pass
//! must run before the backward pass; together they converge for any 3x3
//! chamfer mask, so no iteration to a fixpoint is needed.

use distmap_core::DistanceImage;

use crate::progress::{NoProgress, RowHook};
use crate::{BinaryMask, ChamferWeights, DistanceMapError, ScanPhase};

/// Value of foreground pixels that no background pixel has reached (yet).
pub const UNREACHABLE: u16 = u16::MAX;

/// Cost of reaching a pixel from a neighbor holding `value`.
///
/// Saturates at [`UNREACHABLE`], so an unreached neighbor stays unreached.
#[inline]
pub fn step(value: u16, weight: u16) -> u16 {
    value.saturating_add(weight)
}

/// Lower the pixel at `(x, y)` to `candidate` if that is smaller.
///
/// Returns whether the pixel changed. This is the only write performed by
/// the scans.
#[inline]
pub fn update_if_needed(buffer: &mut DistanceImage, x: usize, y: usize, candidate: u16) -> bool {
    let idx = y * buffer.width + x;
    if candidate < buffer.data[idx] {
        buffer.data[idx] = candidate;
        true
    } else {
        false
    }
}

/// Allocate a buffer with 0 on background and [`UNREACHABLE`] on foreground.
pub fn seed_buffer(mask: &BinaryMask<'_>) -> Result<DistanceImage, DistanceMapError> {
    let mut buffer = DistanceImage::filled(mask.width(), mask.height(), 0)?;
    for y in 0..mask.height() {
        let row = &mut buffer.data[y * mask.width()..(y + 1) * mask.width()];
        for (px, fg) in row.iter_mut().zip(mask.row(y)) {
            if fg {
                *px = UNREACHABLE;
            }
        }
    }
    Ok(buffer)
}

fn check_dims(buffer: &DistanceImage, mask: &BinaryMask<'_>) -> Result<(), DistanceMapError> {
    if buffer.width != mask.width() || buffer.height != mask.height() {
        return Err(DistanceMapError::DimensionMismatch {
            width: mask.width(),
            height: mask.height(),
            got_width: buffer.width,
            got_height: buffer.height,
        });
    }
    Ok(())
}

#[inline]
fn relax(ortho: u16, diago: u16, weights: ChamferWeights) -> u16 {
    step(ortho, weights.orthogonal).min(step(diago, weights.diagonal))
}

/// Candidate from the causal forward neighbors that exist around `(x, y)`:
/// left, up, up-left and up-right.
fn forward_candidate(buffer: &DistanceImage, x: usize, y: usize, weights: ChamferWeights) -> u16 {
    let mut ortho = UNREACHABLE;
    let mut diago = UNREACHABLE;
    if x > 0 {
        ortho = ortho.min(buffer.get(x - 1, y));
    }
    if y > 0 {
        ortho = ortho.min(buffer.get(x, y - 1));
        if x > 0 {
            diago = diago.min(buffer.get(x - 1, y - 1));
        }
        if x + 1 < buffer.width {
            diago = diago.min(buffer.get(x + 1, y - 1));
        }
    }
    relax(ortho, diago, weights)
}

/// Mirror of [`forward_candidate`]: right, down, down-left and down-right.
fn backward_candidate(buffer: &DistanceImage, x: usize, y: usize, weights: ChamferWeights) -> u16 {
    let mut ortho = UNREACHABLE;
    let mut diago = UNREACHABLE;
    if x + 1 < buffer.width {
        ortho = ortho.min(buffer.get(x + 1, y));
    }
    if y + 1 < buffer.height {
        ortho = ortho.min(buffer.get(x, y + 1));
        if x > 0 {
            diago = diago.min(buffer.get(x - 1, y + 1));
        }
        if x + 1 < buffer.width {
            diago = diago.min(buffer.get(x + 1, y + 1));
        }
    }
    relax(ortho, diago, weights)
}

fn forward_row(
    buffer: &mut DistanceImage,
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
    y: usize,
) -> usize {
    let width = buffer.width;
    let mut updated = 0;

    // first line: only the pixel on the left
    if y == 0 {
        for x in 1..width {
            if !mask.is_foreground(x, 0) {
                continue;
            }
            let candidate = step(buffer.get(x - 1, 0), weights.orthogonal);
            updated += update_if_needed(buffer, x, 0, candidate) as usize;
        }
        return updated;
    }

    if mask.is_foreground(0, y) {
        let candidate = forward_candidate(buffer, 0, y, weights);
        updated += update_if_needed(buffer, 0, y, candidate) as usize;
    }

    let (above, current) = buffer.data.split_at_mut(y * width);
    let above = &above[(y - 1) * width..];
    let current = &mut current[..width];
    for x in 1..width.saturating_sub(1) {
        if !mask.is_foreground(x, y) {
            continue;
        }
        let ortho = current[x - 1].min(above[x]);
        let diago = above[x - 1].min(above[x + 1]);
        let candidate = relax(ortho, diago, weights);
        if candidate < current[x] {
            current[x] = candidate;
            updated += 1;
        }
    }

    if width > 1 && mask.is_foreground(width - 1, y) {
        let candidate = forward_candidate(buffer, width - 1, y, weights);
        updated += update_if_needed(buffer, width - 1, y, candidate) as usize;
    }
    updated
}

fn backward_row(
    buffer: &mut DistanceImage,
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
    y: usize,
) -> usize {
    let width = buffer.width;
    let height = buffer.height;
    let mut updated = 0;

    // last line: only the pixel on the right
    if y + 1 == height {
        for x in (0..width.saturating_sub(1)).rev() {
            if !mask.is_foreground(x, y) {
                continue;
            }
            let candidate = step(buffer.get(x + 1, y), weights.orthogonal);
            updated += update_if_needed(buffer, x, y, candidate) as usize;
        }
        return updated;
    }

    if mask.is_foreground(width - 1, y) {
        let candidate = backward_candidate(buffer, width - 1, y, weights);
        updated += update_if_needed(buffer, width - 1, y, candidate) as usize;
    }

    let (current, below) = buffer.data.split_at_mut((y + 1) * width);
    let current = &mut current[y * width..];
    let below = &below[..width];
    for x in (1..width.saturating_sub(1)).rev() {
        if !mask.is_foreground(x, y) {
            continue;
        }
        let ortho = current[x + 1].min(below[x]);
        let diago = below[x - 1].min(below[x + 1]);
        let candidate = relax(ortho, diago, weights);
        if candidate < current[x] {
            current[x] = candidate;
            updated += 1;
        }
    }

    if width > 1 && mask.is_foreground(0, y) {
        let candidate = backward_candidate(buffer, 0, y, weights);
        updated += update_if_needed(buffer, 0, y, candidate) as usize;
    }
    updated
}

/// Stopped between rows; carries the number of completed rows.
pub(crate) struct Interrupted(pub(crate) usize);

pub(crate) fn forward_scan_hooked(
    buffer: &mut DistanceImage,
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
    hook: &mut RowHook<'_>,
) -> Result<usize, Interrupted> {
    let height = buffer.height;
    let mut updated = 0;
    for y in 0..height {
        updated += forward_row(buffer, mask, weights, y);
        if !hook.row_done(ScanPhase::ForwardScan, y + 1, height) && y + 1 < height {
            return Err(Interrupted(y + 1));
        }
    }
    Ok(updated)
}

pub(crate) fn backward_scan_hooked(
    buffer: &mut DistanceImage,
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
    hook: &mut RowHook<'_>,
) -> Result<usize, Interrupted> {
    let height = buffer.height;
    let mut updated = 0;
    for (done, y) in (0..height).rev().enumerate() {
        updated += backward_row(buffer, mask, weights, y);
        if !hook.row_done(ScanPhase::BackwardScan, done + 1, height) && done + 1 < height {
            return Err(Interrupted(done + 1));
        }
    }
    Ok(updated)
}

/// Top-left to bottom-right pass. Returns the number of lowered pixels.
pub fn forward_scan(
    buffer: &mut DistanceImage,
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
) -> Result<usize, DistanceMapError> {
    check_dims(buffer, mask)?;
    weights.validate()?;
    let mut observer = NoProgress;
    let mut hook = RowHook::new(&mut observer, None);
    Ok(forward_scan_hooked(buffer, mask, weights, &mut hook).unwrap_or_else(|Interrupted(n)| n))
}

/// Bottom-right to top-left pass. Returns the number of lowered pixels.
pub fn backward_scan(
    buffer: &mut DistanceImage,
    mask: &BinaryMask<'_>,
    weights: ChamferWeights,
) -> Result<usize, DistanceMapError> {
    check_dims(buffer, mask)?;
    weights.validate()?;
    let mut observer = NoProgress;
    let mut hook = RowHook::new(&mut observer, None);
    Ok(backward_scan_hooked(buffer, mask, weights, &mut hook).unwrap_or_else(|Interrupted(n)| n))
}

/// Divide every reached foreground pixel by the orthogonal weight.
pub fn normalize_in_place(buffer: &mut DistanceImage, mask: &BinaryMask<'_>, orthogonal: u16) {
    if orthogonal <= 1 {
        return;
    }
    for y in 0..buffer.height {
        let row = &mut buffer.data[y * buffer.width..(y + 1) * buffer.width];
        for (px, fg) in row.iter_mut().zip(mask.row(y)) {
            if fg && *px != UNREACHABLE {
                *px /= orthogonal;
            }
        }
    }
}

/// Largest reached foreground value and the number of unreached foreground pixels.
pub(crate) fn foreground_extent(buffer: &DistanceImage, mask: &BinaryMask<'_>) -> (u16, usize) {
    let mut max_value = 0u16;
    let mut unreachable = 0usize;
    for y in 0..buffer.height {
        for (&v, fg) in buffer.row(y).iter().zip(mask.row(y)) {
            if !fg {
                continue;
            }
            if v == UNREACHABLE {
                unreachable += 1;
            } else {
                max_value = max_value.max(v);
            }
        }
    }
    (max_value, unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use distmap_core::GrayImageView;

    const FG: u8 = 255;

    fn mask_of(width: usize, height: usize, data: &[u8]) -> BinaryMask<'_> {
        BinaryMask::new(GrayImageView::new(width, height, data).expect("view")).expect("mask")
    }

    #[test]
    fn step_saturates_at_sentinel() {
        assert_eq!(step(UNREACHABLE, 4), UNREACHABLE);
        assert_eq!(step(UNREACHABLE - 1, 3), UNREACHABLE);
        assert_eq!(step(10, 3), 13);
    }

    #[test]
    fn update_only_lowers() {
        let mut buf = DistanceImage::filled(2, 1, 5).expect("alloc");
        assert!(!update_if_needed(&mut buf, 0, 0, 5));
        assert!(!update_if_needed(&mut buf, 0, 0, 9));
        assert!(update_if_needed(&mut buf, 0, 0, 2));
        assert_eq!(buf.data, vec![2, 5]);
    }

    #[test]
    fn seed_marks_foreground_unreachable() {
        let data = [0, FG, 12, FG];
        let mask = mask_of(2, 2, &data);
        let buf = seed_buffer(&mask).expect("seed");
        assert_eq!(buf.data, vec![0, UNREACHABLE, 0, UNREACHABLE]);
    }

    #[test]
    fn forward_pass_only_propagates_down_and_right() {
        #[rustfmt::skip]
        let data = [
            FG, FG, FG,
            FG, 0,  FG,
            FG, FG, FG,
        ];
        let mask = mask_of(3, 3, &data);
        let w = ChamferWeights::BORGEFORS;
        let mut buf = seed_buffer(&mask).expect("seed");
        forward_scan(&mut buf, &mask, w).expect("forward");
        let u = UNREACHABLE;
        #[rustfmt::skip]
        let expected = vec![
            u, u, u,
            u, 0, 3,
            4, 3, 4,
        ];
        assert_eq!(buf.data, expected);
    }

    #[test]
    fn backward_pass_completes_the_map() {
        #[rustfmt::skip]
        let data = [
            FG, FG, FG,
            FG, 0,  FG,
            FG, FG, FG,
        ];
        let mask = mask_of(3, 3, &data);
        let w = ChamferWeights::BORGEFORS;
        let mut buf = seed_buffer(&mask).expect("seed");
        forward_scan(&mut buf, &mask, w).expect("forward");
        backward_scan(&mut buf, &mask, w).expect("backward");
        #[rustfmt::skip]
        let expected = vec![
            4, 3, 4,
            3, 0, 3,
            4, 3, 4,
        ];
        assert_eq!(buf.data, expected);
    }

    #[test]
    fn passes_never_raise_values() {
        #[rustfmt::skip]
        let data = [
            FG, FG, FG, FG, FG,
            FG, FG, 0,  FG, FG,
            FG, FG, FG, FG, FG,
            0,  FG, FG, FG, FG,
        ];
        let mask = mask_of(5, 4, &data);
        let w = ChamferWeights::WEIGHTS_57;
        let mut buf = seed_buffer(&mask).expect("seed");
        let seeded = buf.clone();
        forward_scan(&mut buf, &mask, w).expect("forward");
        let after_forward = buf.clone();
        backward_scan(&mut buf, &mask, w).expect("backward");
        for i in 0..buf.data.len() {
            assert!(after_forward.data[i] <= seeded.data[i]);
            assert!(buf.data[i] <= after_forward.data[i]);
        }
    }

    #[test]
    fn single_column_and_single_row_rasters() {
        let data = [FG, FG, 0, FG];
        let w = ChamferWeights::BORGEFORS;

        let column = mask_of(1, 4, &data);
        let mut buf = seed_buffer(&column).expect("seed");
        forward_scan(&mut buf, &column, w).expect("forward");
        backward_scan(&mut buf, &column, w).expect("backward");
        assert_eq!(buf.data, vec![6, 3, 0, 3]);

        let row = mask_of(4, 1, &data);
        let mut buf = seed_buffer(&row).expect("seed");
        forward_scan(&mut buf, &row, w).expect("forward");
        backward_scan(&mut buf, &row, w).expect("backward");
        assert_eq!(buf.data, vec![6, 3, 0, 3]);
    }

    #[test]
    fn converged_buffer_is_a_fixpoint() {
        #[rustfmt::skip]
        let data = [
            FG, FG, FG, FG,
            FG, FG, FG, FG,
            FG, FG, FG, 0,
        ];
        let mask = mask_of(4, 3, &data);
        let w = ChamferWeights::CITY_BLOCK;
        let mut buf = seed_buffer(&mask).expect("seed");
        forward_scan(&mut buf, &mask, w).expect("forward");
        backward_scan(&mut buf, &mask, w).expect("backward");
        let converged = buf.clone();
        assert_eq!(forward_scan(&mut buf, &mask, w).expect("forward"), 0);
        assert_eq!(backward_scan(&mut buf, &mask, w).expect("backward"), 0);
        assert_eq!(buf, converged);
    }

    #[test]
    fn scans_reject_foreign_buffers() {
        let data = [FG; 4];
        let mask = mask_of(2, 2, &data);
        let mut buf = DistanceImage::filled(4, 1, 0).expect("alloc");
        assert!(matches!(
            forward_scan(&mut buf, &mask, ChamferWeights::BORGEFORS),
            Err(DistanceMapError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn normalization_skips_background_and_sentinel() {
        let data = [0, FG, FG];
        let mask = mask_of(3, 1, &data);
        let mut buf = DistanceImage::from_raw(3, 1, vec![0, 7, UNREACHABLE]).expect("raw");
        normalize_in_place(&mut buf, &mask, 3);
        assert_eq!(buf.data, vec![0, 2, UNREACHABLE]);
        assert_eq!(foreground_extent(&buf, &mask), (2, 1));
    }
}
