//! Greedy horizontal stitching within one tile row.
//!
//! An incoming fragment joins the first anchor whose vertical extent
//! overlaps its own, regardless of horizontal distance. Meant for elongated
//! weft-direction defects such as seams that cross every tile of a row.
use crate::merging::domain::merge_group::{MergeGroup, MergedDetection};
use crate::shared::detection::Detection;

pub fn matches(anchor: &Detection, candidate: &Detection) -> bool {
    anchor.rect.overlaps_vertically(&candidate.rect)
}

pub fn absorb(anchors: MergeGroup, candidate: MergedDetection) -> MergeGroup {
    anchors.absorb_first(candidate, matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::rect::Rect;
    use approx::assert_relative_eq;

    fn seam(x: i32, y: i32, w: i32, h: i32, confidence: f32) -> MergedDetection {
        Detection::solid(Rect::new(x, y, w, h), confidence, 1).into()
    }

    #[test]
    fn test_adjacent_seams_merge() {
        let anchors = absorb(MergeGroup::new(), seam(0, 100, 500, 50, 0.6));
        let anchors = absorb(anchors, seam(500, 100, 500, 50, 0.8));

        assert_eq!(anchors.len(), 1);
        let merged = &anchors.entries()[0].detection;
        assert_eq!(merged.rect, Rect::new(0, 100, 1000, 50));
        assert_eq!(merged.mask.count_on(), 1000 * 50);
        assert_relative_eq!(merged.confidence, 0.8);
    }

    #[test]
    fn test_vertically_offset_bands_merge() {
        let anchors = absorb(MergeGroup::new(), seam(0, 100, 500, 50, 0.5));
        let anchors = absorb(anchors, seam(500, 130, 500, 50, 0.5));
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors.entries()[0].detection.rect, Rect::new(0, 100, 1000, 80));
    }

    #[test]
    fn test_bands_touching_vertically_stay_apart() {
        let anchors = absorb(MergeGroup::new(), seam(0, 100, 500, 50, 0.5));
        let anchors = absorb(anchors, seam(500, 150, 500, 50, 0.5));
        assert_eq!(anchors.len(), 2);
    }

    #[test]
    fn test_horizontal_distance_is_ignored() {
        let anchors = absorb(MergeGroup::new(), seam(0, 100, 50, 20, 0.5));
        let anchors = absorb(anchors, seam(3000, 110, 50, 20, 0.5));
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors.entries()[0].detection.rect, Rect::new(0, 100, 3050, 30));
    }

    #[test]
    fn test_first_anchor_wins() {
        // Two anchors that both overlap the incoming band vertically.
        let anchors = MergeGroup::new()
            .with(seam(0, 100, 100, 20, 0.5))
            .with(seam(0, 115, 100, 20, 0.5));
        let anchors = absorb(anchors, seam(200, 110, 100, 20, 0.5));

        let entries = anchors.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].fragments, 2);
        assert_eq!(entries[1].fragments, 1);
    }
}
