//! Tiled wave function collapse over a 2D grid
//!
//! Every cell tracks the tiles still consistent with its neighbors. Each round
//! collapses one minimum-entropy cell and propagates the adjacency rules in
//! all four directions until the grid is fully collapsed. Contradictions are
//! resolved with a fallback tile instead of backtracking.

#![forbid(unsafe_code)]

/// Solver: selection, collapse, propagation and the step driver
pub mod algorithm;
/// Learning tile catalogs from sample images
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Grid, cells and the tile catalog
pub mod spatial;

pub use algorithm::executor::{
    Driver, DriverState, StepResult, initialize_grid, is_complete, step_once,
};
pub use io::error::{AlgorithmError, Result};
