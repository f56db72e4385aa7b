//! Mask-content merging for thin, diagonal shapes such as hanging threads.
//!
//! Two strands can have overlapping bounding boxes without touching, so a
//! bounding-box hit is only a precondition: each side must also have on
//! pixels in the zone where it meets the other's tolerance band.
use crate::merging::domain::merge_group::{MergeGroup, MergedDetection};
use crate::shared::detection::Detection;
use crate::shared::rect::Rect;

pub fn matches(group: &Detection, candidate: &Detection, tolerance: i32) -> bool {
    let Some(group_zone) = candidate.rect.expand(tolerance).intersection(&group.rect) else {
        return false;
    };
    let Some(candidate_zone) = group.rect.expand(tolerance).intersection(&candidate.rect) else {
        return false;
    };

    has_on_pixels(group, &group_zone, tolerance)
        && has_on_pixels(candidate, &candidate_zone, tolerance)
}

pub fn absorb(groups: MergeGroup, candidate: MergedDetection, tolerance: i32) -> MergeGroup {
    groups.absorb_first(candidate, |group, candidate| {
        matches(group, candidate, tolerance)
    })
}

/// Checks the part of `detection`'s mask under `zone` (image coordinates,
/// inside `detection.rect`).
fn has_on_pixels(detection: &Detection, zone: &Rect, min_size: i32) -> bool {
    if !detection.is_consistent() {
        log::warn!(
            "Mask {}x{} does not match rect {:?}; skipping content check",
            detection.mask.width(),
            detection.mask.height(),
            detection.rect
        );
        return false;
    }

    let roi = region_of_interest(
        zone.relative_to(&detection.rect),
        detection.rect.width,
        detection.rect.height,
        min_size,
    );
    match detection.mask.any_on_in(&roi) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("Content check failed for {:?}: {e}", detection.rect);
            false
        }
    }
}

/// Grows a mask-local zone to at least `min_size` on each axis, keeping it
/// inside a `width` x `height` mask.
fn region_of_interest(zone: Rect, width: i32, height: i32, min_size: i32) -> Rect {
    let w = zone.width.max(min_size).min(width);
    let h = zone.height.max(min_size).min(height);
    let x = zone.x.min(width - w).max(0);
    let y = zone.y.min(height - h).max(0);
    Rect::new(x, y, w, h)
}
