pub mod mask_overlap;
pub mod proximity;
pub mod row_adjacency;
