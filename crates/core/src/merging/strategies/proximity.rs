//! Proximity merging: a fragment joins the first group whose rectangle
//! meets the fragment's rectangle grown by the tolerance.
use crate::merging::domain::merge_group::{MergeGroup, MergedDetection};
use crate::shared::detection::Detection;

pub fn matches(group: &Detection, candidate: &Detection, tolerance: i32) -> bool {
    candidate
        .rect
        .expand(tolerance)
        .intersection(&group.rect)
        .is_some()
}

pub fn absorb(groups: MergeGroup, candidate: MergedDetection, tolerance: i32) -> MergeGroup {
    groups.absorb_first(candidate, |group, candidate| {
        matches(group, candidate, tolerance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::DEFAULT_TOLERANCE;
    use crate::shared::rect::Rect;
    use rstest::rstest;

    fn fold(x: i32, y: i32, w: i32, h: i32) -> MergedDetection {
        Detection::solid(Rect::new(x, y, w, h), 0.5, 11).into()
    }

    #[test]
    fn test_ten_pixel_gap_merges() {
        let groups = absorb(MergeGroup::new(), fold(1000, 550, 500, 40), DEFAULT_TOLERANCE);
        let groups = absorb(groups, fold(1510, 560, 490, 40), DEFAULT_TOLERANCE);

        assert_eq!(groups.len(), 1);
        let rect = groups.entries()[0].detection.rect;
        assert_eq!(rect.x, 1000);
        assert_eq!(rect.right(), 2000);
        assert_eq!(rect, Rect::new(1000, 550, 1000, 50));
    }

    #[rstest]
    #[case::overlapping(-5, true)]
    #[case::touching(0, true)]
    #[case::within_tolerance(7, true)]
    #[case::at_tolerance(10, true)]
    #[case::past_tolerance(11, false)]
    #[case::far(200, false)]
    fn test_horizontal_gap_boundary(#[case] gap: i32, #[case] expected: bool) {
        let group = Detection::solid(Rect::new(100, 100, 50, 50), 0.5, 11);
        let candidate = Detection::solid(Rect::new(150 + gap, 100, 50, 50), 0.5, 11);
        assert_eq!(matches(&group, &candidate, DEFAULT_TOLERANCE), expected);
    }

    #[rstest]
    #[case::at_tolerance(10, true)]
    #[case::past_tolerance(11, false)]
    fn test_vertical_gap_boundary(#[case] gap: i32, #[case] expected: bool) {
        let group = Detection::solid(Rect::new(100, 100, 50, 50), 0.5, 11);
        let candidate = Detection::solid(Rect::new(100, 150 + gap, 50, 50), 0.5, 11);
        assert_eq!(matches(&group, &candidate, DEFAULT_TOLERANCE), expected);
    }

    #[test]
    fn test_gap_boundary_holds_in_both_directions() {
        let left = Detection::solid(Rect::new(100, 100, 50, 50), 0.5, 11);
        let right = Detection::solid(Rect::new(160, 100, 50, 50), 0.5, 11);
        assert!(matches(&left, &right, DEFAULT_TOLERANCE));
        assert!(matches(&right, &left, DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_zero_tolerance_requires_contact() {
        let group = Detection::solid(Rect::new(0, 0, 10, 10), 0.5, 11);
        let touching = Detection::solid(Rect::new(10, 0, 10, 10), 0.5, 11);
        let apart = Detection::solid(Rect::new(11, 0, 10, 10), 0.5, 11);
        assert!(matches(&group, &touching, 0));
        assert!(!matches(&group, &apart, 0));
    }

    #[test]
    fn test_degenerate_candidate_is_singleton() {
        let groups = absorb(MergeGroup::new(), fold(0, 0, 50, 50), DEFAULT_TOLERANCE);
        let groups = absorb(groups, fold(10, 10, 0, 0), DEFAULT_TOLERANCE);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_vertical_chain_across_rows() {
        let mut groups = MergeGroup::new();
        for row in 0..4 {
            groups = absorb(groups, fold(300, row * 500, 20, 500), DEFAULT_TOLERANCE);
        }
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.entries()[0].fragments, 4);
        assert_eq!(groups.entries()[0].detection.rect, Rect::new(300, 0, 20, 2000));
    }
}
