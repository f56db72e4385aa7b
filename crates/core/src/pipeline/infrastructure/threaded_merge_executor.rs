use std::collections::BTreeMap;
use std::thread::{Scope, ScopedJoinHandle};
use std::time::Instant;

use crossbeam_channel::Sender;

use crate::classification::domain::defect_category::DefectCategory;
use crate::classification::domain::defect_classifier::DefectClassifier;
use crate::merging::domain::category_fold::CategoryFold;
use crate::merging::domain::merge_group::MergedDetection;
use crate::merging::domain::merge_strategy::MergeStrategy;
use crate::pipeline::merge_executor::{MergeConfig, MergeExecutor};
use crate::pipeline::merge_logger::{elapsed_ms, MergeLogger};
use crate::shared::constants::{STAGE_DISPATCH, STAGE_FINALIZE, STAGE_VERTICAL_FOLD};
use crate::shared::tile_grid::TileGrid;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

enum FoldEvent {
    Fragment(MergedDetection),
    EndRow,
}

struct Worker<'scope> {
    events: Sender<FoldEvent>,
    handle: ScopedJoinHandle<'scope, Vec<MergedDetection>>,
}

/// Folds each defect category on its own worker thread.
///
/// Layout: `main [classify/route] → one worker per category`
///
/// Categories never interact, and each worker receives its fragments and
/// row boundaries in grid order, so groupings match the sequential
/// executor. Only the order of the returned list differs.
pub struct ThreadedMergeExecutor {
    channel_capacity: usize,
}

impl ThreadedMergeExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for ThreadedMergeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeExecutor for ThreadedMergeExecutor {
    fn execute(
        &self,
        grid: TileGrid,
        classifier: DefectClassifier<'_>,
        config: &MergeConfig,
        logger: &mut dyn MergeLogger,
    ) -> Vec<MergedDetection> {
        let total_rows = grid.row_count();
        let tolerance = config.tolerance;
        let cap = self.channel_capacity;

        std::thread::scope(|scope| {
            let mut result = Vec::new();
            let mut workers: BTreeMap<DefectCategory, Worker<'_>> = BTreeMap::new();

            for (row_idx, row) in grid.into_rows().into_iter().enumerate() {
                let started = Instant::now();
                for detection in row.into_iter().flat_map(|tile| tile.detections) {
                    let category = classifier.classify(detection.class_id);
                    let fragment = MergedDetection::from(detection);
                    if category.merge_strategy() == MergeStrategy::NoMerge {
                        result.push(fragment);
                        continue;
                    }
                    let worker = workers
                        .entry(category)
                        .or_insert_with(|| spawn_worker(scope, category, tolerance, cap));
                    send(worker, category, FoldEvent::Fragment(fragment));
                }
                logger.timing(STAGE_DISPATCH, elapsed_ms(started));

                let started = Instant::now();
                for (category, worker) in &workers {
                    send(worker, *category, FoldEvent::EndRow);
                }
                logger.timing(STAGE_VERTICAL_FOLD, elapsed_ms(started));
                logger.progress(row_idx + 1, total_rows);
            }

            let started = Instant::now();
            for worker in workers.into_values() {
                drop(worker.events);
                match worker.handle.join() {
                    Ok(entries) => result.extend(entries),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
            logger.timing(STAGE_FINALIZE, elapsed_ms(started));
            result
        })
    }
}

fn spawn_worker<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    category: DefectCategory,
    tolerance: i32,
    cap: usize,
) -> Worker<'scope> {
    let (events, rx) = crossbeam_channel::bounded::<FoldEvent>(cap);
    let handle = scope.spawn(move || {
        let mut fold = CategoryFold::new(category, tolerance);
        for event in rx {
            match event {
                FoldEvent::Fragment(fragment) => fold.push(fragment),
                FoldEvent::EndRow => fold.end_row(),
            }
        }
        fold.finish()
    });
    Worker { events, handle }
}

/// A failed send means the worker died; its panic resurfaces on join.
fn send(worker: &Worker<'_>, category: DefectCategory, event: FoldEvent) {
    if worker.events.send(event).is_err() {
        log::error!("{category:?} worker stopped receiving fragments");
    }
}
