use thiserror::Error;

use crate::shared::mask::Mask;
use crate::shared::rect::Rect;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectionError {
    #[error("mask is {mask_width}x{mask_height} but rect is {rect:?}")]
    MaskSizeMismatch {
        rect: Rect,
        mask_width: usize,
        mask_height: usize,
    },
}

/// One defect observation: whole-image rectangle, binary mask sized to the
/// rectangle, detector confidence and raw class id.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub rect: Rect,
    pub mask: Mask,
    pub confidence: f32,
    pub class_id: i64,
}

impl Detection {
    pub fn new(
        rect: Rect,
        mask: Mask,
        confidence: f32,
        class_id: i64,
    ) -> Result<Self, DetectionError> {
        if !mask.matches(&rect) {
            return Err(DetectionError::MaskSizeMismatch {
                rect,
                mask_width: mask.width(),
                mask_height: mask.height(),
            });
        }
        Ok(Self::new_unchecked(rect, mask, confidence, class_id))
    }

    /// Accepts upstream output as-is, even when the mask does not match the
    /// rectangle. Merging tolerates such detections.
    pub fn new_unchecked(rect: Rect, mask: Mask, confidence: f32, class_id: i64) -> Self {
        Self {
            rect,
            mask,
            confidence,
            class_id,
        }
    }

    /// Detection whose mask is fully on.
    pub fn solid(rect: Rect, confidence: f32, class_id: i64) -> Self {
        let mask = Mask::filled(rect.width.max(0) as usize, rect.height.max(0) as usize);
        Self::new_unchecked(rect, mask, confidence, class_id)
    }

    pub fn is_consistent(&self) -> bool {
        self.mask.matches(&self.rect)
    }
}
