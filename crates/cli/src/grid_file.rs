use std::error::Error;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use tilemend_core::merging::domain::merge_group::MergedDetection;
use tilemend_core::shared::detection::Detection;
use tilemend_core::shared::mask::{Mask, MaskError};
use tilemend_core::shared::rect::Rect;
use tilemend_core::shared::tile_grid::{Tile, TileGrid};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RectDto {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<RectDto> for Rect {
    fn from(r: RectDto) -> Self {
        Rect::new(r.x, r.y, r.width, r.height)
    }
}

impl From<Rect> for RectDto {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DetectionDto {
    pub rect: RectDto,
    pub confidence: f32,
    pub class_id: i64,
    /// Rows of `'0'`/`'1'`; omitted means fully on.
    #[serde(default)]
    pub mask: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TileDto {
    pub rect: RectDto,
    #[serde(default)]
    pub detections: Vec<DetectionDto>,
}

#[derive(Debug, Deserialize)]
pub struct GridFile {
    pub tiles: Vec<Vec<TileDto>>,
}

#[derive(Debug, Serialize)]
pub struct MergedDto {
    pub rect: RectDto,
    pub confidence: f32,
    pub class_id: i64,
    pub mask: Vec<String>,
    pub fragments: usize,
}

#[derive(Debug, Serialize)]
pub struct MergedFile {
    pub detections: Vec<MergedDto>,
}

pub fn parse_mask(rows: &[String]) -> Result<Mask, MaskError> {
    let rows: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| row.chars().map(|c| c != '0').collect())
        .collect();
    Mask::from_rows(&rows)
}

pub fn mask_rows(mask: &Mask) -> Vec<String> {
    mask.view()
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|&v| if v != 0 { '1' } else { '0' }).collect())
        .collect()
}

impl DetectionDto {
    fn into_detection(self) -> Result<Detection, MaskError> {
        let rect = Rect::from(self.rect);
        let Some(rows) = self.mask else {
            return Ok(Detection::solid(rect, self.confidence, self.class_id));
        };
        let mask = parse_mask(&rows)?;
        if !mask.matches(&rect) {
            log::warn!(
                "Mask {}x{} does not match rect {rect:?}; keeping it as-is",
                mask.width(),
                mask.height()
            );
        }
        Ok(Detection::new_unchecked(
            rect,
            mask,
            self.confidence,
            self.class_id,
        ))
    }
}

impl GridFile {
    pub fn into_grid(self) -> Result<TileGrid, MaskError> {
        let rows = self
            .tiles
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|tile| -> Result<Tile, MaskError> {
                        let detections = tile
                            .detections
                            .into_iter()
                            .map(DetectionDto::into_detection)
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(Tile::new(tile.rect.into(), detections))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TileGrid::new(rows))
    }
}

impl From<&MergedDetection> for MergedDto {
    fn from(merged: &MergedDetection) -> Self {
        let d = &merged.detection;
        Self {
            rect: d.rect.into(),
            confidence: d.confidence,
            class_id: d.class_id,
            mask: mask_rows(&d.mask),
            fragments: merged.fragments,
        }
    }
}

pub fn parse_grid(json: &str) -> Result<TileGrid, Box<dyn Error>> {
    let file: GridFile = serde_json::from_str(json)?;
    Ok(file.into_grid()?)
}

pub fn read_grid(path: &Path) -> Result<TileGrid, Box<dyn Error>> {
    parse_grid(&fs::read_to_string(path)?)
}

pub fn write_merged<W: Write>(
    writer: W,
    merged: &[MergedDetection],
) -> Result<(), Box<dyn Error>> {
    let file = MergedFile {
        detections: merged.iter().map(MergedDto::from).collect(),
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &file)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
