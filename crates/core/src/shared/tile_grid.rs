use crate::shared::detection::Detection;
use crate::shared::rect::Rect;

/// One batch of the source image and the detections found in it.
///
/// Detection coordinates are already in whole-image space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    pub detections: Vec<Detection>,
}

impl Tile {
    pub fn new(rect: Rect, detections: Vec<Detection>) -> Self {
        Self { rect, detections }
    }
}

/// Row-major grid of tiles: `rows[i][j + 1]` is the right neighbour of
/// `rows[i][j]`, `rows[i + 1][j]` its bottom neighbour. Rows may differ in
/// length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileGrid {
    rows: Vec<Vec<Tile>>,
}

impl TileGrid {
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        Self { rows }
    }

    /// A 1x1 grid whose only tile spans every given detection.
    pub fn single_tile(detections: Vec<Detection>) -> Self {
        let rect = detections
            .iter()
            .map(|d| d.rect)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self::new(vec![vec![Tile::new(rect, detections)]])
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Tile>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn detection_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|tile| tile.detections.len())
            .sum()
    }
}
