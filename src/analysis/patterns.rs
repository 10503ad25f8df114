//! Learning a tile catalog from a sample image
//!
//! Every distinct RGBA color in the sample becomes a tile. Two tiles may sit
//! next to each other in a direction if the sample shows them that way.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::{Direction, TileCatalog, TileId};
use image::RgbaImage;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// Converts a sample image into tile labels and a learned catalog
pub struct ImageProcessor {
    source_data: Array2<usize>,
    color_mapping: Vec<[u8; 4]>,
}

impl ImageProcessor {
    /// Load and process a sample from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or decoded
    /// - The image has no pixels
    pub fn from_png_path(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_rgba(&img.to_rgba8())
    }

    /// Label every pixel of an in-memory sample
    ///
    /// Colors are sorted by their bytes so the same sample always yields
    /// the same tile identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Sample image has no pixels".to_string(),
            });
        }

        let mut color_mapping: Vec<[u8; 4]> = image.pixels().map(|pixel| pixel.0).collect();
        color_mapping.sort_unstable();
        color_mapping.dedup();

        let lookup: HashMap<[u8; 4], usize> = color_mapping
            .iter()
            .enumerate()
            .map(|(index, &color)| (color, index))
            .collect();

        let mut source_data = Array2::zeros((height as usize, width as usize));
        for (x, y, pixel) in image.enumerate_pixels() {
            if let (Some(label), Some(&index)) = (
                source_data.get_mut([y as usize, x as usize]),
                lookup.get(&pixel.0),
            ) {
                *label = index;
            }
        }

        Ok(Self {
            source_data,
            color_mapping,
        })
    }

    /// Tile label per sample pixel, indexed `[y, x]`
    pub const fn source_data(&self) -> &Array2<usize> {
        &self.source_data
    }

    /// RGBA color of each tile, indexed by tile identifier
    pub fn color_mapping(&self) -> &[[u8; 4]] {
        &self.color_mapping
    }

    /// Number of distinct tiles in the sample
    pub fn unique_cell_count(&self) -> usize {
        self.color_mapping.len()
    }

    /// Build the catalog of observed adjacencies
    ///
    /// Each 4-adjacent pixel pair is allowed in both directions. Tiles are
    /// named by their hex color.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample produced no tiles
    pub fn build_catalog(&self) -> Result<TileCatalog> {
        let mut builder = TileCatalog::builder();
        for color in &self.color_mapping {
            builder.add_tile(color_name(*color));
        }

        for ((y, x), &label) in self.source_data.indexed_iter() {
            let tile = TileId::new(label);
            if let Some(&right) = self.source_data.get([y, x + 1]) {
                builder.allow_symmetric(tile, Direction::Right, TileId::new(right));
            }
            if let Some(&below) = self.source_data.get([y + 1, x]) {
                builder.allow_symmetric(tile, Direction::Down, TileId::new(below));
            }
        }

        builder.build()
    }
}

/// Hex name of an RGBA color, e.g. `#ff0000ff`
pub fn color_name(color: [u8; 4]) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        color[0], color[1], color[2], color[3]
    )
}
