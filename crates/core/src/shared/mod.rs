pub mod constants;
pub mod detection;
pub mod mask;
pub mod rect;
pub mod tile_grid;
