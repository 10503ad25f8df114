//! Tile identifiers, grid directions and the immutable adjacency catalog

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use std::fmt;

/// Opaque identifier of a tile variant within a [`TileCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(usize);

impl TileId {
    /// Wrap a zero-based catalog index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based catalog index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four grid neighbor directions
///
/// `Up` points at the row above (`y - 1`), `Left` at the column to the left (`x - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller `y`
    Up,
    /// Towards larger `y`
    Down,
    /// Towards smaller `x`
    Left,
    /// Towards larger `x`
    Right,
}

impl Direction {
    /// All directions in a fixed order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Coordinate delta `(dx, dy)` of one step in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Slot of this direction in per-tile rule arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// Fixed set of tiles with their directional compatibility rules
///
/// `neighbors_allowed(t, d)` is the set of tiles that may sit next to `t`
/// in direction `d`. Rules are not required to be symmetric.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    names: Vec<String>,
    rules: Vec<[TileBitset; 4]>,
    all: TileBitset,
    none: TileBitset,
}

impl TileCatalog {
    /// Start building a catalog
    pub fn builder() -> TileCatalogBuilder {
        TileCatalogBuilder::default()
    }

    /// Every tile in the catalog
    pub fn all_options(&self) -> TileBitset {
        self.all.clone()
    }

    /// Tiles permitted as the neighbor of `tile` in `direction`
    ///
    /// Unknown tiles have no permitted neighbors.
    pub fn neighbors_allowed(&self, tile: TileId, direction: Direction) -> &TileBitset {
        debug_assert!(self.contains(tile), "Unknown tile {tile}");
        self.rules
            .get(tile.index())
            .and_then(|rules| rules.get(direction.index()))
            .unwrap_or(&self.none)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog holds no tiles
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `tile` belongs to this catalog
    pub fn contains(&self, tile: TileId) -> bool {
        tile.index() < self.names.len()
    }

    /// Display name given to a tile at registration
    pub fn name(&self, tile: TileId) -> Option<&str> {
        self.names.get(tile.index()).map(String::as_str)
    }

    /// Look a tile up by its registered name
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(TileId::new)
    }

    /// All tile identifiers in ascending order
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.names.len()).map(TileId::new)
    }
}

/// Incremental construction of a [`TileCatalog`]
#[derive(Debug, Default)]
pub struct TileCatalogBuilder {
    names: Vec<String>,
    rules: Vec<(TileId, Direction, TileId)>,
}

impl TileCatalogBuilder {
    /// Register a tile and return its identifier
    pub fn add_tile(&mut self, name: impl Into<String>) -> TileId {
        self.names.push(name.into());
        TileId::new(self.names.len() - 1)
    }

    /// Permit `neighbor` next to `tile` in `direction`
    pub fn allow(&mut self, tile: TileId, direction: Direction, neighbor: TileId) -> &mut Self {
        self.rules.push((tile, direction, neighbor));
        self
    }

    /// Permit `neighbor` next to `tile` in `direction` and `tile` next to
    /// `neighbor` in the opposite direction
    pub fn allow_symmetric(
        &mut self,
        tile: TileId,
        direction: Direction,
        neighbor: TileId,
    ) -> &mut Self {
        self.allow(tile, direction, neighbor);
        self.allow(neighbor, direction.opposite(), tile)
    }

    /// Freeze the registered tiles and rules
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles were registered
    /// - A rule references a tile that was never registered
    pub fn build(&self) -> Result<TileCatalog> {
        let count = self.names.len();
        if count == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Tile catalog must contain at least one tile".to_string(),
            });
        }

        let empty = TileBitset::new(count);
        let mut rules = vec![
            [
                empty.clone(),
                empty.clone(),
                empty.clone(),
                empty.clone()
            ];
            count
        ];

        for &(tile, direction, neighbor) in &self.rules {
            let invalid = if tile.index() >= count {
                Some(tile)
            } else if neighbor.index() >= count {
                Some(neighbor)
            } else {
                None
            };
            if let Some(bad) = invalid {
                return Err(AlgorithmError::InvalidTileIndex {
                    index: bad.index(),
                    max_tiles: count,
                });
            }

            if let Some(mask) = rules
                .get_mut(tile.index())
                .and_then(|masks| masks.get_mut(direction.index()))
            {
                mask.insert(neighbor);
            }
        }

        Ok(TileCatalog {
            names: self.names.clone(),
            rules,
            all: TileBitset::all(count),
            none: empty,
        })
    }
}
