pub mod classification;
pub mod merging;
pub mod pipeline;
pub mod shared;
