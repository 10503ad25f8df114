/// Command-line interface and batch file processing
pub mod cli;
/// Generation constants and dimension normalization
pub mod configuration;
/// Error types
pub mod error;
/// PNG export of collapsed grids
pub mod image;
/// Cells pinned from a prefill image
pub mod prefill;
/// Progress display
pub mod progress;
/// Animated GIF of the collapse order
pub mod visualization;
