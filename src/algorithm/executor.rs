use crate::{
    algorithm::collapse::{Collapser, Resolution},
    algorithm::propagation::{PropagationSummary, propagate},
    algorithm::selection::select_next,
    io::configuration::{GenerationConfig, normalize_dimension},
    io::error::{AlgorithmError, Result},
    io::prefill::PrefillPlacement,
    spatial::grid::{Grid, Position},
    spatial::tiles::{TileCatalog, TileId},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::ops::ControlFlow;

/// Whether generation should keep going after a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// At least one cell is still uncollapsed
    Continue,
    /// Every cell is collapsed
    Complete,
}

/// Lifecycle of a [`Driver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No grid exists yet
    Uninitialized,
    /// Grid exists and has open cells
    Running,
    /// Every cell is collapsed; terminal until `recreate`
    Complete,
}

/// A single committed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collapse {
    /// Cell that was committed
    pub position: Position,
    /// Tile it received
    pub tile: TileId,
    /// How the tile was chosen
    pub resolution: Resolution,
}

/// Result of one select/collapse/propagate round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Continue or complete
    pub result: StepResult,
    /// The collapsed cell, absent when there was nothing left to collapse
    pub collapse: Option<Collapse>,
    /// Effect of the propagation pass that followed
    pub propagation: PropagationSummary,
}

/// A round as reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Rounds completed so far, including this one
    pub iteration: usize,
    /// Cells collapsed after this round
    pub collapsed_cells: usize,
    /// Total number of cells
    pub total_cells: usize,
    /// What happened in the round
    pub outcome: StepOutcome,
}

/// Create a fresh grid where every cell holds the whole catalog
pub fn initialize_grid(width: usize, height: usize, catalog: &TileCatalog) -> Grid {
    Grid::new(width, height, catalog)
}

/// Whether every cell of `grid` is collapsed
pub fn is_complete(grid: &Grid) -> bool {
    grid.is_complete()
}

/// Run one round: select the minimum-entropy cell, collapse it, propagate
///
/// # Errors
///
/// Only fails if the grid reports an inconsistent shape; contradictions are
/// absorbed by the collapser's fallback tile.
pub fn step_once(
    grid: &mut Grid,
    catalog: &TileCatalog,
    collapser: &Collapser,
    rng: &mut impl Rng,
) -> Result<StepOutcome> {
    let Some(position) = select_next(grid, rng) else {
        return Ok(StepOutcome {
            result: StepResult::Complete,
            collapse: None,
            propagation: PropagationSummary::default(),
        });
    };

    let cell = grid.cell_at_mut(position.0, position.1)?;
    let tile = collapser.collapse(cell, rng);
    let resolution = Resolution::of(cell);

    let propagation = propagate(grid, catalog)?;

    let result = if grid.is_complete() {
        StepResult::Complete
    } else {
        StepResult::Continue
    };

    Ok(StepOutcome {
        result,
        collapse: Some(Collapse {
            position,
            tile,
            resolution,
        }),
        propagation,
    })
}

/// Step-by-step wave function collapse over one grid
///
/// Owns the catalog, the grid and the single seeded random generator used
/// by both selection and collapse. Each call to [`Driver::step`] performs
/// one round so a host loop can interleave rendering between rounds.
pub struct Driver {
    catalog: TileCatalog,
    config: GenerationConfig,
    collapser: Collapser,
    rng: StdRng,
    grid: Option<Grid>,
    state: DriverState,
    iteration: usize,
    history: Vec<Collapse>,
    prefill: Vec<PrefillPlacement>,
}

impl Driver {
    /// Create a driver; the grid is built lazily on the first step
    ///
    /// Zero dimensions fall back to the default size.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A configured dimension exceeds the grid limit
    /// - The fallback tile is not part of the catalog
    pub fn new(catalog: TileCatalog, config: GenerationConfig) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;
        if !catalog.contains(config.fallback_tile) {
            return Err(AlgorithmError::InvalidTileIndex {
                index: config.fallback_tile.index(),
                max_tiles: catalog.len(),
            });
        }

        let collapser = Collapser::new(config.fallback_tile, catalog.len());

        Ok(Self {
            catalog,
            config,
            collapser,
            rng: StdRng::seed_from_u64(config.seed),
            grid: None,
            state: DriverState::Uninitialized,
            iteration: 0,
            history: Vec::new(),
            prefill: Vec::new(),
        })
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Grid of the current run, once initialized
    pub const fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The shared tile catalog
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Active configuration
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Rounds completed in the current run
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Every commit of the current run, in order
    pub fn history(&self) -> &[Collapse] {
        &self.history
    }

    /// Whether the current run has finished
    pub fn is_complete(&self) -> bool {
        self.state == DriverState::Complete
    }

    /// Pin cells to fixed tiles before the grid is built
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid has already been initialized
    /// - A placement names a tile outside the catalog
    pub fn apply_prefill(&mut self, placements: Vec<PrefillPlacement>) -> Result<()> {
        if self.state != DriverState::Uninitialized {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "prefill",
                value: format!("{} placements", placements.len()),
                reason: "prefill must be applied before the first step".to_string(),
            });
        }
        if let Some(bad) = placements
            .iter()
            .find(|placement| !self.catalog.contains(placement.tile))
        {
            return Err(AlgorithmError::InvalidTileIndex {
                index: bad.tile.index(),
                max_tiles: self.catalog.len(),
            });
        }
        self.prefill = placements;
        Ok(())
    }

    /// Build the grid, commit prefill pins and propagate their constraints
    ///
    /// Does nothing if the driver is already initialized.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if a prefill placement lies outside the grid
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != DriverState::Uninitialized {
            return Ok(());
        }

        let mut grid = initialize_grid(self.config.width, self.config.height, &self.catalog);
        for placement in &self.prefill {
            let (x, y) = placement.position;
            self.collapser.commit(grid.cell_at_mut(x, y)?, placement.tile);
            self.history.push(Collapse {
                position: placement.position,
                tile: placement.tile,
                resolution: Resolution::Pinned,
            });
        }
        if !self.prefill.is_empty() {
            propagate(&mut grid, &self.catalog)?;
        }

        self.state = if grid.is_complete() {
            DriverState::Complete
        } else {
            DriverState::Running
        };
        self.grid = Some(grid);
        Ok(())
    }

    /// Run a single round, initializing first if needed
    ///
    /// Once complete, further calls report `Complete` without doing work.
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails
    pub fn step(&mut self) -> Result<StepReport> {
        self.initialize()?;

        let Some(grid) = self.grid.as_mut() else {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "grid missing after initialization".to_string(),
            });
        };

        let outcome = if self.state == DriverState::Complete {
            StepOutcome {
                result: StepResult::Complete,
                collapse: None,
                propagation: PropagationSummary::default(),
            }
        } else {
            let outcome = step_once(grid, &self.catalog, &self.collapser, &mut self.rng)?;
            if let Some(collapse) = outcome.collapse {
                self.iteration += 1;
                self.history.push(collapse);
            }
            if outcome.result == StepResult::Complete {
                self.state = DriverState::Complete;
            }
            outcome
        };

        Ok(StepReport {
            iteration: self.iteration,
            collapsed_cells: grid.collapsed_count(),
            total_cells: grid.len(),
            outcome,
        })
    }

    /// Step until complete or until `observer` breaks
    ///
    /// The observer sees every round and is the cancellation point: returning
    /// `ControlFlow::Break` stops between rounds, leaving the driver resumable.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Driver::step`]
    pub fn run<F>(&mut self, mut observer: F) -> Result<DriverState>
    where
        F: FnMut(&StepReport) -> ControlFlow<()>,
    {
        while self.state != DriverState::Complete {
            let report = self.step()?;
            if observer(&report).is_break() {
                break;
            }
        }
        Ok(self.state)
    }

    /// Step until every cell is collapsed
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Driver::step`]
    pub fn run_to_completion(&mut self) -> Result<&Grid> {
        self.run(|_| ControlFlow::Continue(()))?;
        self.grid.as_ref().ok_or_else(|| AlgorithmError::InvalidSourceData {
            reason: "grid missing after completion".to_string(),
        })
    }

    /// Discard the grid and start over with new dimensions
    ///
    /// Zero and negative dimensions fall back to the default size. The random
    /// stream continues from where the previous run left it.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension exceeds the grid limit
    pub fn recreate(&mut self, width: i64, height: i64) -> Result<()> {
        let config = GenerationConfig {
            width: normalize_dimension(width),
            height: normalize_dimension(height),
            ..self.config
        };
        config.validate()?;

        self.config = config;
        self.grid = None;
        self.state = DriverState::Uninitialized;
        self.iteration = 0;
        self.history.clear();
        self.prefill.clear();
        Ok(())
    }
}
