/// Bitset of tile identifiers used for option sets and adjacency masks
pub mod bitset;
/// Committing cells to a tile, with the contradiction fallback
pub mod collapse;
/// Driver state machine and the single-round step function
pub mod executor;
/// Four-direction constraint propagation
pub mod propagation;
/// Minimum-entropy cell selection
pub mod selection;
