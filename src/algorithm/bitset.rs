use crate::spatial::tiles::TileId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding a set of tile identifiers
///
/// Used both for cell option sets and for adjacency masks in the catalog.
/// Bit `i` is set when `TileId(i)` is a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
        }
    }

    /// Create a bitset containing every tile of a catalog of the given size
    pub fn all(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
        }
    }

    /// Create a bitset holding exactly one tile
    pub fn single(tile_count: usize, tile: TileId) -> Self {
        let mut bitset = Self::new(tile_count);
        bitset.insert(tile);
        bitset
    }

    /// Number of tiles the set can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile, ignoring identifiers beyond the capacity
    pub fn insert(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every member of another bitset in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test whether every member of this set is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|tile| other.contains(tile))
    }

    /// Iterate members in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId::new)
    }

    /// The `n`th member in ascending order
    pub fn nth(&self, n: usize) -> Option<TileId> {
        self.iter().nth(n)
    }

    /// The only member, if the set holds exactly one tile
    pub fn single_member(&self) -> Option<TileId> {
        if self.count() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<usize> = self.iter().map(TileId::index).collect();
        write!(f, "TileBitset({} tiles: {members:?})", self.count())
    }
}
