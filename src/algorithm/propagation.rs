//! Neighbor-constraint propagation across the whole grid
//!
//! Each pass recomputes every open cell from scratch: start from the full
//! catalog, then intersect with what each of the four neighbors allows.
//! Cells are rewritten in row-major order, so later cells in a pass already
//! see the narrowed sets of earlier ones. The result is clamped to the cell's
//! current options: a pass only ever narrows.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::Result;
use crate::spatial::grid::{Cell, Grid, Position};
use crate::spatial::tiles::{Direction, TileCatalog};

/// Outcome of one propagation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    /// Open cells whose option set shrank during the pass
    pub narrowed: usize,
    /// Open cells left with no options after the pass
    pub contradictions: usize,
}

/// Tiles a cell may hold given one neighbor's current options
///
/// `toward` is the direction from the neighbor to the cell being
/// constrained. Returns the union of `neighbors_allowed(t, toward)` over
/// every tile `t` still possible at the neighbor.
pub fn allowed_by_neighbor(
    catalog: &TileCatalog,
    neighbor: &Cell,
    toward: Direction,
) -> TileBitset {
    let mut allowed = TileBitset::new(catalog.len());
    for tile in neighbor.options().iter() {
        allowed.union_with(catalog.neighbors_allowed(tile, toward));
    }
    allowed
}

/// Recompute the options of the cell at `position` from its neighbors
///
/// An open neighbor that has already run out of options allows nothing, so
/// a contradiction spreads to the cells around it.
///
/// # Errors
///
/// Returns `OutOfBounds` if `position` lies outside the grid
pub fn constrained_options(
    grid: &Grid,
    catalog: &TileCatalog,
    position: Position,
) -> Result<TileBitset> {
    grid.cell_at(position.0, position.1)?;

    let mut options = catalog.all_options();
    for direction in Direction::ALL {
        let Some((nx, ny)) = grid.neighbor(position, direction) else {
            continue;
        };
        let neighbor = grid.cell_at(nx, ny)?;
        options.intersect_with(&allowed_by_neighbor(
            catalog,
            neighbor,
            direction.opposite(),
        ));
    }
    Ok(options)
}

/// Run one full propagation pass over every uncollapsed cell
///
/// Collapsed cells are never touched.
///
/// # Errors
///
/// Only fails if the grid reports an inconsistent shape
pub fn propagate(grid: &mut Grid, catalog: &TileCatalog) -> Result<PropagationSummary> {
    let mut summary = PropagationSummary::default();
    let open: Vec<Position> = grid
        .uncollapsed_cells()
        .map(|(position, _)| position)
        .collect();

    for position in open {
        let options = constrained_options(grid, catalog, position)?;
        let cell = grid.cell_at_mut(position.0, position.1)?;
        let options = options.intersection(cell.options());

        if options.count() < cell.entropy() {
            summary.narrowed += 1;
        }
        if options.is_empty() {
            summary.contradictions += 1;
        }
        cell.set_options(options);
    }

    Ok(summary)
}
