/// Pixel tolerance for treating two fragments as one physical defect.
pub const DEFAULT_TOLERANCE: i32 = 10;

/// Stage names reported to the merge logger.
pub const STAGE_DISPATCH: &str = "dispatch";
pub const STAGE_VERTICAL_FOLD: &str = "vertical_fold";
pub const STAGE_FINALIZE: &str = "finalize";

pub const METRIC_FRAGMENTS_IN: &str = "fragments_in";
pub const METRIC_DETECTIONS_OUT: &str = "detections_out";
pub const METRIC_MERGES: &str = "merges";
