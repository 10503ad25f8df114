//! CLI entry point for tiled wave function collapse

use clap::Parser;
use tilecollapse::io::cli::{Cli, FileProcessor};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
