//! Grid of cells tracking the tiles still possible at each position
//!
//! Cells live in a row-major `Array2` indexed `[y, x]`. A grid is built once
//! per generation run and never resized; new dimensions mean a new grid.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::{Direction, TileCatalog, TileId};
use ndarray::Array2;

/// Grid coordinates as `(x, y)`
pub type Position = (usize, usize);

/// A single grid cell
///
/// While uncollapsed, `options` holds the candidate tiles and its size is the
/// cell's entropy; it may legitimately be empty after a contradiction.
/// Once collapsed it holds exactly one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    options: TileBitset,
    collapsed: bool,
    resolved_by_fallback: bool,
}

impl Cell {
    /// Create an uncollapsed cell holding `options`
    pub const fn new(options: TileBitset) -> Self {
        Self {
            options,
            collapsed: false,
            resolved_by_fallback: false,
        }
    }

    /// Whether the cell has been committed to a tile
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Tiles still possible here
    pub const fn options(&self) -> &TileBitset {
        &self.options
    }

    /// Number of remaining options
    pub fn entropy(&self) -> usize {
        self.options.count()
    }

    /// Uncollapsed with no remaining options
    pub fn is_contradiction(&self) -> bool {
        !self.collapsed && self.options.is_empty()
    }

    /// The committed tile, or `None` while the cell is still open
    pub fn collapsed_tile(&self) -> Option<TileId> {
        if self.collapsed {
            self.options.single_member()
        } else {
            None
        }
    }

    /// Whether the committed tile came from the fallback policy
    pub const fn resolved_by_fallback(&self) -> bool {
        self.resolved_by_fallback
    }

    pub(crate) fn set_options(&mut self, options: TileBitset) {
        debug_assert!(!self.collapsed, "Collapsed cells are final");
        self.options = options;
    }

    pub(crate) fn commit(&mut self, tile: TileId, tile_count: usize, fallback: bool) {
        self.options = TileBitset::single(tile_count, tile);
        self.collapsed = true;
        self.resolved_by_fallback = fallback;
    }
}

/// All cells of one generation run
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a grid where every cell is uncollapsed and holds every tile
    pub fn new(width: usize, height: usize, catalog: &TileCatalog) -> Self {
        let cells = Array2::from_elem((height, width), Cell::new(catalog.all_options()));
        Self { cells }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Dimensions as `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Borrow the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinates fall outside the grid
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell> {
        let dimensions = self.dimensions();
        self.cells
            .get([y, x])
            .ok_or(AlgorithmError::OutOfBounds {
                position: (x, y),
                dimensions,
            })
    }

    /// Mutably borrow the cell at `(x, y)`
    ///
    /// Cells only change through the collapser and the propagator.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinates fall outside the grid
    pub fn cell_at_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell> {
        let dimensions = self.dimensions();
        self.cells
            .get_mut([y, x])
            .ok_or(AlgorithmError::OutOfBounds {
                position: (x, y),
                dimensions,
            })
    }

    /// All cells with their positions in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| ((x, y), cell))
    }

    /// Uncollapsed cells in row-major order
    ///
    /// The order is stable so seeded runs replay identically.
    pub fn uncollapsed_cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells().filter(|(_, cell)| !cell.is_collapsed())
    }

    /// Position of the in-bounds neighbor of `position` in `direction`
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.0.checked_add_signed(dx)?;
        let y = position.1.checked_add_signed(dy)?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Whether every cell has been collapsed
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Snapshot of the committed tile per cell, indexed `[y, x]`
    pub fn collapsed_tiles(&self) -> Array2<Option<TileId>> {
        self.cells.map(Cell::collapsed_tile)
    }
}
