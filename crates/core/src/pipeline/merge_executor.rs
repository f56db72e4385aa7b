use crate::classification::domain::defect_classifier::DefectClassifier;
use crate::merging::domain::merge_group::MergedDetection;
use crate::pipeline::merge_logger::MergeLogger;
use crate::shared::constants::DEFAULT_TOLERANCE;
use crate::shared::tile_grid::TileGrid;

/// Tunables for a merge run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeConfig {
    pub tolerance: i32,
}

impl MergeConfig {
    /// Negative tolerances are clamped to zero.
    pub fn new(tolerance: i32) -> Self {
        Self {
            tolerance: tolerance.max(0),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

/// Abstracts how a tile grid is walked and folded.
///
/// Implementations must feed each category its fragments and row
/// boundaries in grid order; only the interleaving between categories is
/// free.
pub trait MergeExecutor: Send {
    fn execute(
        &self,
        grid: TileGrid,
        classifier: DefectClassifier<'_>,
        config: &MergeConfig,
        logger: &mut dyn MergeLogger,
    ) -> Vec<MergedDetection>;
}
