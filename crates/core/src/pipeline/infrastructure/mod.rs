pub mod sequential_merge_executor;
pub mod threaded_merge_executor;
