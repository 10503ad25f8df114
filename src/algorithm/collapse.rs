//! Committing cells to a single tile

use crate::spatial::grid::Cell;
use crate::spatial::tiles::TileId;
use rand::Rng;

/// How a collapsed cell got its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Drawn uniformly from the remaining options
    Chosen,
    /// The cell had no options left and received the fallback tile
    Fallback,
    /// Pinned before generation started
    Pinned,
}

impl Resolution {
    /// Classify a cell the collapser has just committed
    pub const fn of(cell: &Cell) -> Self {
        if cell.resolved_by_fallback() {
            Self::Fallback
        } else {
            Self::Chosen
        }
    }
}

/// Commits cells, falling back to a designated tile on contradiction
///
/// A contradicted cell receives the fallback tile even if its neighbors
/// forbid it, so every round commits exactly one cell.
#[derive(Debug, Clone, Copy)]
pub struct Collapser {
    fallback: TileId,
    tile_count: usize,
}

impl Collapser {
    /// Create a collapser for a catalog of `tile_count` tiles
    pub const fn new(fallback: TileId, tile_count: usize) -> Self {
        Self {
            fallback,
            tile_count,
        }
    }

    /// Tile used when a cell has no options left
    pub const fn fallback(&self) -> TileId {
        self.fallback
    }

    /// Collapse `cell` and return the committed tile
    ///
    /// Picks uniformly among the remaining options, or commits the fallback
    /// tile when none remain. An already collapsed cell is left as is.
    pub fn collapse(&self, cell: &mut Cell, rng: &mut impl Rng) -> TileId {
        if let Some(tile) = cell.collapsed_tile() {
            return tile;
        }

        let count = cell.entropy();
        let picked = if count == 0 {
            None
        } else {
            cell.options().nth(rng.random_range(0..count))
        };

        if let Some(tile) = picked {
            cell.commit(tile, self.tile_count, false);
            tile
        } else {
            cell.commit(self.fallback, self.tile_count, true);
            self.fallback
        }
    }

    /// Pin `cell` to `tile` regardless of its options
    pub fn commit(&self, cell: &mut Cell, tile: TileId) {
        cell.commit(tile, self.tile_count, false);
    }
}
