use crate::merging::domain::merge_group::{MergeGroup, MergedDetection};
use crate::merging::strategies::{mask_overlap, proximity, row_adjacency};

/// Matching and combining rule bound to a defect category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    /// First anchor in the same tile row with overlapping vertical extent.
    RowAdjacency,
    /// First group meeting the candidate grown by the tolerance.
    Proximity,
    /// Proximity plus on pixels on both sides of the meeting zone.
    MaskOverlap,
    /// Passed through one-to-one.
    NoMerge,
}

impl MergeStrategy {
    pub fn absorb(
        self,
        group: MergeGroup,
        candidate: MergedDetection,
        tolerance: i32,
    ) -> MergeGroup {
        match self {
            MergeStrategy::RowAdjacency => row_adjacency::absorb(group, candidate),
            MergeStrategy::Proximity => proximity::absorb(group, candidate, tolerance),
            MergeStrategy::MaskOverlap => mask_overlap::absorb(group, candidate, tolerance),
            MergeStrategy::NoMerge => group.with(candidate),
        }
    }
}
