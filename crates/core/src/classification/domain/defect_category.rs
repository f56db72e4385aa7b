use crate::merging::domain::merge_strategy::MergeStrategy;

/// Semantic fabric defect kind derived from a detector class id.
///
/// Warp defects run along the length of the fabric (vertical in the scan),
/// weft defects across it (horizontal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefectCategory {
    Seam,
    HangingThread,
    Dissection,
    ReedMark,
    ThreadSpan,
    DoubleThreadWarp,
    DoubleThreadWeft,
    WeavingViolation,
    StuffedFluff,
    LightStrip,
    Fold,
    Crease,
    WaterLeak,
    Spot,
    Contamination,
    Knot,
    Thickening,
    ThreadThickeningWarp,
    ThreadThickeningWeft,
    DifferentThreadWarp,
    DifferentThreadWeft,
    IncompleteDoubleThread,
    SparseThread,
    Default,
}

impl DefectCategory {
    pub const ALL: [DefectCategory; 24] = [
        DefectCategory::Seam,
        DefectCategory::HangingThread,
        DefectCategory::Dissection,
        DefectCategory::ReedMark,
        DefectCategory::ThreadSpan,
        DefectCategory::DoubleThreadWarp,
        DefectCategory::DoubleThreadWeft,
        DefectCategory::WeavingViolation,
        DefectCategory::StuffedFluff,
        DefectCategory::LightStrip,
        DefectCategory::Fold,
        DefectCategory::Crease,
        DefectCategory::WaterLeak,
        DefectCategory::Spot,
        DefectCategory::Contamination,
        DefectCategory::Knot,
        DefectCategory::Thickening,
        DefectCategory::ThreadThickeningWarp,
        DefectCategory::ThreadThickeningWeft,
        DefectCategory::DifferentThreadWarp,
        DefectCategory::DifferentThreadWeft,
        DefectCategory::IncompleteDoubleThread,
        DefectCategory::SparseThread,
        DefectCategory::Default,
    ];

    /// Short code as emitted by the class table. `Default` has none.
    pub fn code(&self) -> Option<&'static str> {
        let code = match self {
            DefectCategory::Seam => "seam",
            DefectCategory::HangingThread => "hang",
            DefectCategory::Dissection => "cut",
            DefectCategory::ReedMark => "reed",
            DefectCategory::ThreadSpan => "span",
            DefectCategory::DoubleThreadWarp => "dbl_y",
            DefectCategory::DoubleThreadWeft => "dbl_x",
            DefectCategory::WeavingViolation => "weave",
            DefectCategory::StuffedFluff => "fluff",
            DefectCategory::LightStrip => "strip",
            DefectCategory::Fold => "fold",
            DefectCategory::Crease => "crease",
            DefectCategory::WaterLeak => "leak",
            DefectCategory::Spot => "spot",
            DefectCategory::Contamination => "dirt",
            DefectCategory::Knot => "knot",
            DefectCategory::Thickening => "slub",
            DefectCategory::ThreadThickeningWarp => "thick_y",
            DefectCategory::ThreadThickeningWeft => "thick_x",
            DefectCategory::DifferentThreadWarp => "diff_y",
            DefectCategory::DifferentThreadWeft => "diff_x",
            DefectCategory::IncompleteDoubleThread => "short",
            DefectCategory::SparseThread => "sparse",
            DefectCategory::Default => return None,
        };
        Some(code)
    }

    /// Exact, case-sensitive match against the known codes.
    pub fn from_code(code: &str) -> Option<DefectCategory> {
        Self::ALL
            .into_iter()
            .find(|category| category.code() == Some(code))
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        match self {
            DefectCategory::Seam
            | DefectCategory::DoubleThreadWeft
            | DefectCategory::ThreadThickeningWeft
            | DefectCategory::DifferentThreadWeft
            | DefectCategory::LightStrip => MergeStrategy::RowAdjacency,

            DefectCategory::HangingThread => MergeStrategy::MaskOverlap,

            DefectCategory::WeavingViolation
            | DefectCategory::Contamination
            | DefectCategory::Knot
            | DefectCategory::Default => MergeStrategy::NoMerge,

            DefectCategory::Dissection
            | DefectCategory::ReedMark
            | DefectCategory::ThreadSpan
            | DefectCategory::DoubleThreadWarp
            | DefectCategory::StuffedFluff
            | DefectCategory::Fold
            | DefectCategory::Crease
            | DefectCategory::WaterLeak
            | DefectCategory::Spot
            | DefectCategory::Thickening
            | DefectCategory::ThreadThickeningWarp
            | DefectCategory::DifferentThreadWarp
            | DefectCategory::IncompleteDoubleThread
            | DefectCategory::SparseThread => MergeStrategy::Proximity,
        }
    }
}
