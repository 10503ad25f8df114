//! Minimum-entropy cell selection with uniform random tie-breaking

use crate::spatial::grid::{Grid, Position};
use rand::Rng;

/// Uncollapsed cells sharing the smallest option count
///
/// Cells with zero options count as the most constrained, so contradictions
/// are resolved before anything else. Returned in row-major order.
pub fn minimum_entropy_candidates(grid: &Grid) -> Vec<Position> {
    let Some(minimum) = grid
        .uncollapsed_cells()
        .map(|(_, cell)| cell.entropy())
        .min()
    else {
        return Vec::new();
    };

    grid.uncollapsed_cells()
        .filter(|(_, cell)| cell.entropy() == minimum)
        .map(|(position, _)| position)
        .collect()
}

/// Pick the next cell to collapse
///
/// Restricts to the minimum-entropy candidates first, then picks uniformly
/// among them. Returns `None` once every cell is collapsed.
pub fn select_next(grid: &Grid, rng: &mut impl Rng) -> Option<Position> {
    let candidates = minimum_entropy_candidates(grid);
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.random_range(0..candidates.len())).copied()
}
