//! PNG export of a collapsed grid with transparency for open cells

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Render the grid, one pixel per cell
///
/// Uncollapsed cells are transparent.
///
/// # Errors
///
/// Returns an error if a committed tile has no color in `color_mapping`
pub fn render_grid(grid: &Grid, color_mapping: &[[u8; 4]]) -> Result<RgbaImage> {
    let mut img = RgbaImage::new(grid.width() as u32, grid.height() as u32);

    for ((x, y), cell) in grid.cells() {
        let color = match cell.collapsed_tile() {
            Some(tile) => color_mapping.get(tile.index()).copied().ok_or(
                AlgorithmError::InvalidTileIndex {
                    index: tile.index(),
                    max_tiles: color_mapping.len(),
                },
            )?,
            None => [0, 0, 0, 0],
        };
        img.put_pixel(x as u32, y as u32, Rgba(color));
    }

    Ok(img)
}

/// Export the grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - No cell has been collapsed yet
/// - A tile value is out of bounds for the color mapping
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, color_mapping: &[[u8; 4]], output_path: &Path) -> Result<()> {
    if grid.collapsed_count() == 0 {
        return Err(AlgorithmError::InvalidSourceData {
            reason: "No cells have been collapsed".to_string(),
        });
    }

    let img = render_grid(grid, color_mapping)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
