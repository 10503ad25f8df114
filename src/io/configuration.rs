//! Generation constants, defaults and dimension normalization

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::TileId;

/// Width and height used when a requested dimension is missing or invalid
pub const DEFAULT_DIMENSION: usize = 10;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Palette index of the tile committed at a contradiction
pub const DEFAULT_FALLBACK_TILE: usize = 0;

/// Pause between collapse rounds, one 25 ms frame per round
pub const DEFAULT_STEP_DELAY_MS: u64 = 25;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_wfc";
/// Suffix marking a prefill image next to its sample
pub const PREFILL_SUFFIX: &str = "_pre";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Edge length in pixels of one cell in visualization frames
pub const VISUALIZATION_TILE_PIXELS: u32 = 8;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 25;
/// Upper bound on frames in one visualization, final frames included
pub const MAX_GIF_FRAMES: usize = 1_000;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;

/// Map a requested dimension onto a usable one
///
/// Zero and negative values fall back to [`DEFAULT_DIMENSION`].
pub const fn normalize_dimension(value: i64) -> usize {
    if value <= 0 {
        DEFAULT_DIMENSION
    } else {
        value as usize
    }
}

/// Parse a dimension typed by a user
///
/// Empty, unparsable, zero and negative input all fall back to
/// [`DEFAULT_DIMENSION`]; this never fails.
pub fn parse_dimension(input: &str) -> usize {
    input
        .trim()
        .parse::<i64>()
        .map_or(DEFAULT_DIMENSION, normalize_dimension)
}

/// Everything a driver needs besides the tile catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Seed of the shared random generator
    pub seed: u64,
    /// Tile committed when a cell runs out of options
    pub fallback_tile: TileId,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            seed: DEFAULT_SEED,
            fallback_tile: TileId::new(DEFAULT_FALLBACK_TILE),
        }
    }
}

impl GenerationConfig {
    /// Build a configuration from raw width and height input
    pub fn from_inputs(width: &str, height: &str, seed: u64, fallback_tile: TileId) -> Self {
        Self {
            width: parse_dimension(width),
            height: parse_dimension(height),
            seed,
            fallback_tile,
        }
    }

    /// Replace zero dimensions with [`DEFAULT_DIMENSION`]
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            width: if self.width == 0 {
                DEFAULT_DIMENSION
            } else {
                self.width
            },
            height: if self.height == 0 {
                DEFAULT_DIMENSION
            } else {
                self.height
            },
            ..self
        }
    }

    /// Check the dimensions against [`MAX_GRID_DIMENSION`]
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the limit
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}
