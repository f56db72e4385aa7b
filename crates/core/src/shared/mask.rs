use ndarray::{s, Array2, ArrayView2, Zip};
use thiserror::Error;

use crate::shared::rect::Rect;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("mask data length {actual} does not match {width}x{height}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },
    #[error("row {row} has {actual} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("region {roi:?} lies outside a {width}x{height} mask")]
    RoiOutOfBounds {
        roi: Rect,
        width: usize,
        height: usize,
    },
}

/// Binary defect raster, row-major `(height, width)`.
///
/// Any non-zero byte counts as an "on" pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    data: Array2<u8>,
}

pub const ON: u8 = 255;

impl Mask {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: Array2::zeros((height, width)),
        }
    }

    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            data: Array2::from_elem((height, width), ON),
        }
    }

    pub fn from_vec(data: Vec<u8>, width: usize, height: usize) -> Result<Self, MaskError> {
        let actual = data.len();
        let data = Array2::from_shape_vec((height, width), data).map_err(|_| {
            MaskError::ShapeMismatch {
                width,
                height,
                actual,
            }
        })?;
        Ok(Self { data })
    }

    /// Builds a mask from rows of booleans; all rows must share one length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, MaskError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MaskError::RaggedRows {
                    row: row_idx,
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend(row.iter().map(|&on| if on { ON } else { 0 }));
        }
        Self::from_vec(data, width, height)
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.data.view()
    }

    /// Returns `false` for coordinates outside the mask.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data.get((y, x)).is_some_and(|&v| v != 0)
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if let Some(px) = self.data.get_mut((y, x)) {
            *px = if on { ON } else { 0 };
        }
    }

    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// True when the mask dimensions equal the rectangle's dimensions.
    pub fn matches(&self, rect: &Rect) -> bool {
        rect.width >= 0
            && rect.height >= 0
            && self.width() == rect.width as usize
            && self.height() == rect.height as usize
    }

    /// Whether any pixel inside `roi` (mask-local coordinates) is on.
    pub fn any_on_in(&self, roi: &Rect) -> Result<bool, MaskError> {
        let in_bounds = roi.x >= 0
            && roi.y >= 0
            && roi.width >= 0
            && roi.height >= 0
            && roi.right() as usize <= self.width()
            && roi.bottom() as usize <= self.height();
        if !in_bounds {
            return Err(MaskError::RoiOutOfBounds {
                roi: *roi,
                width: self.width(),
                height: self.height(),
            });
        }

        let (x0, y0) = (roi.x as usize, roi.y as usize);
        let (x1, y1) = (roi.right() as usize, roi.bottom() as usize);
        Ok(self.data.slice(s![y0..y1, x0..x1]).iter().any(|&v| v != 0))
    }

    /// OR-pastes `src` with its top-left corner at `(ox, oy)`.
    ///
    /// Pixels of `src` falling outside `self` are dropped. On pixels already
    /// present in `self` are never cleared.
    pub fn paste_or(&mut self, src: &Mask, ox: i32, oy: i32) {
        let dst_x0 = ox.max(0) as usize;
        let dst_y0 = oy.max(0) as usize;
        let src_x0 = (-ox).max(0) as usize;
        let src_y0 = (-oy).max(0) as usize;

        if src_x0 >= src.width() || src_y0 >= src.height() {
            return;
        }
        if dst_x0 >= self.width() || dst_y0 >= self.height() {
            return;
        }

        let w = (src.width() - src_x0).min(self.width() - dst_x0);
        let h = (src.height() - src_y0).min(self.height() - dst_y0);

        let mut dst = self
            .data
            .slice_mut(s![dst_y0..dst_y0 + h, dst_x0..dst_x0 + w]);
        let src = src.data.slice(s![src_y0..src_y0 + h, src_x0..src_x0 + w]);
        Zip::from(&mut dst).and(&src).for_each(|d, &s| *d |= s);
    }
}

/// Merged mask sized to `a_rect ∪ b_rect`, with both sources OR-pasted at
/// their offsets.
pub fn union_mask(a: &Mask, a_rect: &Rect, b: &Mask, b_rect: &Rect) -> Mask {
    let union = a_rect.union(b_rect);
    let mut merged = Mask::zeros(union.width.max(0) as usize, union.height.max(0) as usize);
    merged.paste_or(a, a_rect.x - union.x, a_rect.y - union.y);
    merged.paste_or(b, b_rect.x - union.x, b_rect.y - union.y);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Mask {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '1').collect())
            .collect();
        Mask::from_rows(&rows).unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_zeros_dimensions() {
        let m = Mask::zeros(4, 3);
        assert_eq!(m.width(), 4);
        assert_eq!(m.height(), 3);
        assert_eq!(m.count_on(), 0);
    }

    #[test]
    fn test_filled_all_on() {
        assert_eq!(Mask::filled(5, 2).count_on(), 10);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let err = Mask::from_vec(vec![0; 5], 2, 2).unwrap_err();
        assert_eq!(
            err,
            MaskError::ShapeMismatch {
                width: 2,
                height: 2,
                actual: 5
            }
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(matches!(
            Mask::from_rows(&rows),
            Err(MaskError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut m = Mask::zeros(3, 3);
        m.set(2, 1, true);
        assert!(m.get(2, 1));
        assert!(!m.get(1, 2));
        assert!(!m.get(10, 10));
    }

    #[test]
    fn test_matches_rect() {
        let m = Mask::zeros(4, 3);
        assert!(m.matches(&Rect::new(100, 100, 4, 3)));
        assert!(!m.matches(&Rect::new(100, 100, 3, 4)));
    }

    // ── ROI queries ──────────────────────────────────────────────────

    #[test]
    fn test_any_on_in_finds_pixel() {
        let m = mask_from(&["0000", "0010", "0000"]);
        assert_eq!(m.any_on_in(&Rect::new(2, 1, 1, 1)), Ok(true));
        assert_eq!(m.any_on_in(&Rect::new(0, 0, 2, 3)), Ok(false));
    }

    #[test]
    fn test_any_on_in_empty_roi_is_false() {
        let m = Mask::filled(4, 4);
        assert_eq!(m.any_on_in(&Rect::new(2, 2, 0, 2)), Ok(false));
    }

    #[test]
    fn test_any_on_in_out_of_bounds() {
        let m = Mask::filled(4, 4);
        assert!(matches!(
            m.any_on_in(&Rect::new(2, 2, 3, 1)),
            Err(MaskError::RoiOutOfBounds { .. })
        ));
        assert!(m.any_on_in(&Rect::new(-1, 0, 1, 1)).is_err());
    }

    // ── Pasting ──────────────────────────────────────────────────────

    #[test]
    fn test_paste_or_keeps_existing_pixels() {
        let mut dst = mask_from(&["1000", "0000"]);
        let src = mask_from(&["00", "01"]);
        dst.paste_or(&src, 0, 0);
        assert_eq!(dst, mask_from(&["1000", "0100"]));
    }

    #[test]
    fn test_paste_or_clips_overflow() {
        let mut dst = Mask::zeros(3, 3);
        let src = Mask::filled(3, 3);
        dst.paste_or(&src, 2, -1);
        assert_eq!(dst, mask_from(&["001", "001", "000"]));
    }

    #[test]
    fn test_paste_or_fully_outside_is_noop() {
        let mut dst = Mask::zeros(3, 3);
        dst.paste_or(&Mask::filled(2, 2), 5, 0);
        dst.paste_or(&Mask::filled(2, 2), -2, 0);
        assert_eq!(dst.count_on(), 0);
    }

    // ── Union ────────────────────────────────────────────────────────

    #[test]
    fn test_union_mask_horizontal_neighbours() {
        let a = mask_from(&["11", "10"]);
        let b = mask_from(&["01", "11"]);
        let merged = union_mask(&a, &Rect::new(0, 0, 2, 2), &b, &Rect::new(2, 0, 2, 2));
        assert_eq!(merged, mask_from(&["1101", "1011"]));
    }

    #[test]
    fn test_union_mask_overlap_is_logical_or() {
        let a = mask_from(&["100", "000"]);
        let b = mask_from(&["00", "01"]);
        // b starts at column 1, so its zero at (0,0) lands on a's zero at (1,0)
        // and b's on pixel lands at (2,1).
        let merged = union_mask(&a, &Rect::new(10, 10, 3, 2), &b, &Rect::new(11, 10, 2, 2));
        assert_eq!(merged, mask_from(&["100", "001"]));

        // Painting b first must not erase a either.
        let merged = union_mask(&b, &Rect::new(11, 10, 2, 2), &a, &Rect::new(10, 10, 3, 2));
        assert_eq!(merged, mask_from(&["100", "001"]));
    }

    #[test]
    fn test_union_mask_dimensions_follow_union_rect() {
        let a = Mask::filled(5, 2);
        let b = Mask::filled(3, 4);
        let ra = Rect::new(0, 10, 5, 2);
        let rb = Rect::new(8, 0, 3, 4);
        let merged = union_mask(&a, &ra, &b, &rb);
        assert!(merged.matches(&ra.union(&rb)));
        assert_eq!(merged.count_on(), 10 + 12);
    }

    #[test]
    fn test_union_mask_with_oversized_source_is_clipped() {
        let a = Mask::filled(4, 4);
        let ra = Rect::new(0, 0, 2, 2);
        let b = Mask::zeros(2, 2);
        let rb = Rect::new(2, 0, 2, 2);
        let merged = union_mask(&a, &ra, &b, &rb);
        assert_eq!(merged.width(), 4);
        assert_eq!(merged.height(), 2);
        assert_eq!(merged.count_on(), 8);
    }
}
