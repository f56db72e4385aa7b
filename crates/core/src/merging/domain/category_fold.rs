use crate::classification::domain::defect_category::DefectCategory;
use crate::merging::domain::merge_group::{MergeGroup, MergedDetection};
use crate::merging::domain::merge_strategy::MergeStrategy;

/// Accumulated merge state for one defect category across a grid pass.
///
/// Row-adjacency categories collect fragments in a row-local anchor group
/// that `end_row` folds into the persistent groups by proximity. Every
/// other strategy feeds the persistent groups directly. Persistent groups
/// are only released by `finish`.
#[derive(Debug)]
pub struct CategoryFold {
    category: DefectCategory,
    strategy: MergeStrategy,
    tolerance: i32,
    row_anchors: MergeGroup,
    groups: MergeGroup,
}

impl CategoryFold {
    pub fn new(category: DefectCategory, tolerance: i32) -> Self {
        Self {
            category,
            strategy: category.merge_strategy(),
            tolerance,
            row_anchors: MergeGroup::new(),
            groups: MergeGroup::new(),
        }
    }

    pub fn category(&self) -> DefectCategory {
        self.category
    }

    pub fn push(&mut self, fragment: MergedDetection) {
        match self.strategy {
            MergeStrategy::RowAdjacency => {
                let anchors = std::mem::take(&mut self.row_anchors);
                self.row_anchors = self.strategy.absorb(anchors, fragment, self.tolerance);
            }
            strategy => {
                let groups = std::mem::take(&mut self.groups);
                self.groups = strategy.absorb(groups, fragment, self.tolerance);
            }
        }
    }

    /// Folds this row's anchors into the cross-row groups.
    pub fn end_row(&mut self) {
        if self.row_anchors.is_empty() {
            return;
        }
        let anchors = std::mem::take(&mut self.row_anchors);
        log::debug!(
            "{:?}: folding {} row anchors into {} groups",
            self.category,
            anchors.len(),
            self.groups.len()
        );
        let tolerance = self.tolerance;
        let groups = std::mem::take(&mut self.groups);
        self.groups = anchors.into_iter().fold(groups, |groups, anchor| {
            MergeStrategy::Proximity.absorb(groups, anchor, tolerance)
        });
    }

    /// Flushes every remaining entry, including anchors of an unfinished row.
    pub fn finish(mut self) -> Vec<MergedDetection> {
        self.end_row();
        self.groups.into_entries()
    }
}
