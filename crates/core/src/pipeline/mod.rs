pub mod defect_merger;
pub mod infrastructure;
pub mod merge_executor;
pub mod merge_logger;
