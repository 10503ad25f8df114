//! Spatial data structures
//!
//! This module contains the grid of cells and the tile catalog:
//! - Cell option tracking and row-major grid storage
//! - Tile identifiers, directions and adjacency rules

/// Grid and cell state management
pub mod grid;
/// Tile identifiers, directions and the adjacency catalog
pub mod tiles;

pub use grid::{Cell, Grid, Position};
pub use tiles::{Direction, TileCatalog, TileCatalogBuilder, TileId};
