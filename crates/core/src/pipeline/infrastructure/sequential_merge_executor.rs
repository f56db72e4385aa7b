use std::collections::BTreeMap;
use std::time::Instant;

use crate::classification::domain::defect_category::DefectCategory;
use crate::classification::domain::defect_classifier::DefectClassifier;
use crate::merging::domain::category_fold::CategoryFold;
use crate::merging::domain::merge_group::MergedDetection;
use crate::merging::domain::merge_strategy::MergeStrategy;
use crate::pipeline::merge_executor::{MergeConfig, MergeExecutor};
use crate::pipeline::merge_logger::{elapsed_ms, MergeLogger};
use crate::shared::constants::{STAGE_DISPATCH, STAGE_FINALIZE, STAGE_VERTICAL_FOLD};
use crate::shared::tile_grid::TileGrid;

/// Walks the grid on the calling thread.
///
/// Output order: pass-through detections as encountered, then each
/// category's groups in category declaration order.
pub struct SequentialMergeExecutor;

impl SequentialMergeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialMergeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeExecutor for SequentialMergeExecutor {
    fn execute(
        &self,
        grid: TileGrid,
        classifier: DefectClassifier<'_>,
        config: &MergeConfig,
        logger: &mut dyn MergeLogger,
    ) -> Vec<MergedDetection> {
        let total_rows = grid.row_count();
        let mut result = Vec::new();
        let mut folds: BTreeMap<DefectCategory, CategoryFold> = BTreeMap::new();

        for (row_idx, row) in grid.into_rows().into_iter().enumerate() {
            let started = Instant::now();
            for detection in row.into_iter().flat_map(|tile| tile.detections) {
                let category = classifier.classify(detection.class_id);
                let fragment = MergedDetection::from(detection);
                if category.merge_strategy() == MergeStrategy::NoMerge {
                    result.push(fragment);
                    continue;
                }
                folds
                    .entry(category)
                    .or_insert_with(|| CategoryFold::new(category, config.tolerance))
                    .push(fragment);
            }
            logger.timing(STAGE_DISPATCH, elapsed_ms(started));

            let started = Instant::now();
            for fold in folds.values_mut() {
                fold.end_row();
            }
            logger.timing(STAGE_VERTICAL_FOLD, elapsed_ms(started));
            logger.progress(row_idx + 1, total_rows);
        }

        let started = Instant::now();
        result.extend(folds.into_values().flat_map(CategoryFold::finish));
        logger.timing(STAGE_FINALIZE, elapsed_ms(started));
        result
    }
}
