//! Prefill image parsing for cells pinned before generation

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Position;
use crate::spatial::tiles::TileId;
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;

/// Single pinned cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefillPlacement {
    /// Grid coordinates `(x, y)`
    pub position: Position,
    /// Tile committed there
    pub tile: TileId,
}

/// Cells to pin, read from an image aligned with the grid's top-left corner
#[derive(Debug, Clone, Default)]
pub struct PrefillData {
    placements: Vec<PrefillPlacement>,
}

impl PrefillData {
    /// Parse a prefill PNG
    ///
    /// Only pixels matching a palette color become placements; every other
    /// pixel leaves its cell open.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PNG file cannot be loaded
    /// - The prefill image contains no colors from the palette
    pub fn from_png(path: &Path, color_mapping: &[[u8; 4]]) -> Result<Self> {
        let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_rgba(&img.to_rgba8(), color_mapping)
    }

    /// Parse an in-memory prefill image
    ///
    /// # Errors
    ///
    /// Returns an error if the image contains no colors from the palette
    pub fn from_rgba(image: &RgbaImage, color_mapping: &[[u8; 4]]) -> Result<Self> {
        let color_to_tile: HashMap<[u8; 4], TileId> = color_mapping
            .iter()
            .enumerate()
            .map(|(index, &color)| (color, TileId::new(index)))
            .collect();

        let placements: Vec<PrefillPlacement> = image
            .enumerate_pixels()
            .filter_map(|(x, y, pixel)| {
                color_to_tile.get(&pixel.0).map(|&tile| PrefillPlacement {
                    position: (x as usize, y as usize),
                    tile,
                })
            })
            .collect();

        if placements.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Prefill image contains no colors from source palette".to_string(),
            });
        }

        Ok(Self { placements })
    }

    /// Drop placements outside a `width` x `height` grid, returning how many
    pub fn retain_within(&mut self, width: usize, height: usize) -> usize {
        let before = self.placements.len();
        self.placements
            .retain(|placement| placement.position.0 < width && placement.position.1 < height);
        before - self.placements.len()
    }

    /// Pinned cells in row-major order
    pub fn placements(&self) -> &[PrefillPlacement] {
        &self.placements
    }

    /// Number of pinned cells
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing is pinned
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Hand the placements over to a driver
    pub fn into_placements(self) -> Vec<PrefillPlacement> {
        self.placements
    }
}
