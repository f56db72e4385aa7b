use crate::classification::domain::class_table::ClassTable;
use crate::classification::domain::defect_classifier::DefectClassifier;
use crate::merging::domain::merge_group::MergedDetection;
use crate::pipeline::infrastructure::sequential_merge_executor::SequentialMergeExecutor;
use crate::pipeline::merge_executor::{MergeConfig, MergeExecutor};
use crate::pipeline::merge_logger::{MergeLogger, NullMergeLogger};
use crate::shared::constants::{METRIC_DETECTIONS_OUT, METRIC_FRAGMENTS_IN, METRIC_MERGES};
use crate::shared::detection::Detection;
use crate::shared::tile_grid::TileGrid;

/// Stitches per-tile detections into one image-wide list.
///
/// Wires the classifier and config together and delegates the grid walk to
/// a `MergeExecutor`. Every input detection ends up in exactly one output
/// entry; `MergedDetection::fragments` says how many.
pub struct DefectMerger<'t> {
    classifier: DefectClassifier<'t>,
    config: MergeConfig,
    executor: Box<dyn MergeExecutor>,
    logger: Box<dyn MergeLogger>,
}

impl<'t> DefectMerger<'t> {
    pub fn new(
        classifier: DefectClassifier<'t>,
        config: MergeConfig,
        executor: Box<dyn MergeExecutor>,
        logger: Box<dyn MergeLogger>,
    ) -> Self {
        Self {
            classifier,
            config,
            executor,
            logger,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn merge(&mut self, grid: TileGrid) -> Vec<MergedDetection> {
        let fragments_in = grid.detection_count();
        self.logger.info(&format!(
            "Merging {fragments_in} fragments from {} tile rows (tolerance {}px)",
            grid.row_count(),
            self.config.tolerance
        ));

        let merged = self
            .executor
            .execute(grid, self.classifier, &self.config, self.logger.as_mut());

        let out = merged.len();
        self.logger.metric(METRIC_FRAGMENTS_IN, fragments_in as f64);
        self.logger.metric(METRIC_DETECTIONS_OUT, out as f64);
        self.logger
            .metric(METRIC_MERGES, fragments_in.saturating_sub(out) as f64);
        self.logger.summary();
        merged
    }
}

impl Default for DefectMerger<'static> {
    fn default() -> Self {
        Self::new(
            DefectClassifier::default(),
            MergeConfig::default(),
            Box::new(SequentialMergeExecutor::new()),
            Box::new(NullMergeLogger),
        )
    }
}

/// One-shot sequential merge returning plain detections.
pub fn merge_defects(grid: TileGrid, table: &ClassTable, config: MergeConfig) -> Vec<Detection> {
    DefectMerger::new(
        DefectClassifier::new(table),
        config,
        Box::new(SequentialMergeExecutor::new()),
        Box::new(NullMergeLogger),
    )
    .merge(grid)
    .into_iter()
    .map(|m| m.detection)
    .collect()
}
