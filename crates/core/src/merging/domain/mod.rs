pub mod category_fold;
pub mod merge_group;
pub mod merge_strategy;
