//! Command-line interface for batch processing sample PNG files

use crate::algorithm::executor::Driver;
use crate::analysis::patterns::ImageProcessor;
use crate::io::configuration::{
    DEFAULT_DIMENSION, DEFAULT_FALLBACK_TILE, DEFAULT_SEED, DEFAULT_STEP_DELAY_MS, GIF_FRAME_DELAY_MS,
    GenerationConfig, OUTPUT_SUFFIX, PREFILL_SUFFIX, VISUALIZATION_SUFFIX,
    VISUALIZATION_TILE_PIXELS, parse_dimension,
};
use crate::io::error::{AlgorithmError, Result, io_error};
use crate::io::image::export_grid_as_png;
use crate::io::prefill::PrefillData;
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::tiles::TileId;
use clap::Parser;
use std::convert::Infallible;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Dimension parser for clap that never rejects input
///
/// # Errors
///
/// Never fails; bad input becomes the default dimension
pub fn dimension_arg(input: &str) -> std::result::Result<usize, Infallible> {
    Ok(parse_dimension(input))
}

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile grids with wave function collapse learned from a sample image"
)]
/// Command-line arguments for the generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Sample PNG file or directory of samples
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output width in tiles (non-positive or invalid values use 10)
    #[arg(short = 'w', long, default_value_t = DEFAULT_DIMENSION, value_parser = dimension_arg)]
    pub width: usize,

    /// Output height in tiles (non-positive or invalid values use 10)
    #[arg(short = 'H', long, default_value_t = DEFAULT_DIMENSION, value_parser = dimension_arg)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Palette index of the tile used when a cell runs out of options
    #[arg(short, long, default_value_t = DEFAULT_FALLBACK_TILE)]
    pub fallback: usize,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Pin cells from a prefill image if available (looks for <input>_pre.png)
    #[arg(short, long)]
    pub prefill: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Pause between collapse rounds in milliseconds
    #[arg(short = 'd', long, default_value_t = DEFAULT_STEP_DELAY_MS)]
    pub step_delay_ms: u64,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation settings derived from the arguments
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            fallback_tile: TileId::new(self.fallback),
        }
    }
}

/// Orchestrates batch processing of sample files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Sample files the target resolves to, in sorted order
    ///
    /// Generated outputs and prefill images are never treated as samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_png(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a PNG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_png(&path) && !is_derived_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be a PNG file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback for missing or clipped prefill
    #[allow(clippy::print_stderr)]
    fn process_file(&self, input_path: &Path, index: usize) -> Result<()> {
        let image_processor = ImageProcessor::from_png_path(input_path)?;
        let catalog = image_processor.build_catalog()?;
        let color_mapping = image_processor.color_mapping().to_vec();
        let config = self.cli.generation_config();

        let mut driver = Driver::new(catalog, config)?;

        if self.cli.prefill {
            let prefill_path = Self::get_prefill_path(input_path);
            if prefill_path.exists() {
                let mut prefill = PrefillData::from_png(&prefill_path, &color_mapping)?;
                let dropped = prefill.retain_within(config.width, config.height);
                if dropped > 0 && !self.cli.quiet {
                    eprintln!("Ignoring {dropped} prefill pixels outside the grid");
                }
                driver.apply_prefill(prefill.into_placements())?;
            } else if !self.cli.quiet {
                eprintln!(
                    "No prefill found at: {} (continuing without prefill)",
                    prefill_path.display()
                );
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(index, input_path, config.width * config.height);
        }

        let delay = Duration::from_millis(self.cli.step_delay_ms);
        driver.run(|report| {
            if let Some(ref pm) = self.progress_manager {
                pm.update_step(index, report);
            }
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            ControlFlow::Continue(())
        })?;

        let grid = driver.grid().ok_or_else(|| AlgorithmError::InvalidSourceData {
            reason: "generation finished without a grid".to_string(),
        })?;
        export_grid_as_png(grid, &color_mapping, &Self::get_output_path(input_path))?;

        let fallback_cells = grid
            .cells()
            .filter(|(_, cell)| cell.resolved_by_fallback())
            .count();

        if self.cli.visualize {
            let mut capture = VisualizationCapture::new(
                config.width,
                config.height,
                VISUALIZATION_TILE_PIXELS,
                color_mapping,
            );
            capture.record_all(driver.history());
            capture.export_gif(&Self::get_visualization_path(input_path), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(index, fallback_cells);
        }

        Ok(())
    }

    /// Where the prefill image for a sample is looked up
    pub fn get_prefill_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, PREFILL_SUFFIX, "png")
    }

    /// Where the generated grid for a sample is written
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Where the collapse animation for a sample is written
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        sibling_path(input_path, VISUALIZATION_SUFFIX, "gif")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_derived_file(path: &Path) -> bool {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(PREFILL_SUFFIX)
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
