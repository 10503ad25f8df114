//! Tests for argument parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use tilecollapse::io::cli::{Cli, FileProcessor, dimension_arg};
    use tilecollapse::io::configuration::DEFAULT_DIMENSION;
    use tilecollapse::spatial::TileId;

    const RED: [u8; 4] = [220, 20, 20, 255];
    const BLUE: [u8; 4] = [20, 20, 220, 255];

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tilecollapse").chain(args.iter().copied()))
            .expect("arguments")
    }

    fn write_checker(path: &Path) {
        RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba(RED)
            } else {
                Rgba(BLUE)
            }
        })
        .save(path)
        .expect("save sample");
    }

    // Tests defaults when only a target is given
    // Verified by changing the default seed
    #[test]
    fn test_defaults() {
        let cli = parse(&["sample.png"]);
        assert_eq!(cli.target, PathBuf::from("sample.png"));
        assert_eq!(cli.width, DEFAULT_DIMENSION);
        assert_eq!(cli.height, DEFAULT_DIMENSION);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());

        let config = cli.generation_config();
        assert_eq!(config.seed, 42);
        assert_eq!(config.fallback_tile, TileId::new(0));
        assert_eq!(cli.step_delay_ms, 25);
    }

    // Tests invalid dimensions fall back instead of failing the parse
    // Verified by rejecting negative values
    #[test]
    fn test_dimension_normalization() {
        let cli = parse(&["s.png", "--width=-3", "--height=abc"]);
        assert_eq!(cli.width, DEFAULT_DIMENSION);
        assert_eq!(cli.height, DEFAULT_DIMENSION);

        let cli = parse(&["s.png", "-w", "7", "-H", "0"]);
        assert_eq!(cli.width, 7);
        assert_eq!(cli.height, DEFAULT_DIMENSION);

        assert_eq!(dimension_arg("15"), Ok(15));
    }

    // Tests the flags map onto the generation settings
    // Verified by ignoring the fallback flag
    #[test]
    fn test_flags() {
        let cli = parse(&["s.png", "-s", "9", "-f", "1", "-q", "-n", "-v", "-p", "-d", "5"]);
        let config = cli.generation_config();
        assert_eq!(config.seed, 9);
        assert_eq!(config.fallback_tile, TileId::new(1));
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
        assert!(cli.visualize);
        assert!(cli.prefill);
        assert_eq!(cli.step_delay_ms, 5);
    }

    // Tests derived file names sit next to the sample
    // Verified by dropping the parent directory
    #[test]
    fn test_derived_paths() {
        let input = Path::new("samples/room.png");
        assert_eq!(
            FileProcessor::get_output_path(input),
            PathBuf::from("samples/room_wfc.png")
        );
        assert_eq!(
            FileProcessor::get_prefill_path(input),
            PathBuf::from("samples/room_pre.png")
        );
        assert_eq!(
            FileProcessor::get_visualization_path(input),
            PathBuf::from("samples/room_visualization.gif")
        );
    }

    // Tests directory scans skip outputs, prefills and finished samples
    // Verified by treating generated files as samples
    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["a.png", "b.png", "a_wfc.png", "b_pre.png"] {
            write_checker(&dir.path().join(name));
        }
        std::fs::write(dir.path().join("notes.txt"), "not an image").expect("write");
        let target = dir.path().to_string_lossy().to_string();

        let skipping = FileProcessor::new(parse(&[target.as_str(), "-q"]));
        assert_eq!(
            skipping.collect_files().expect("files"),
            vec![dir.path().join("b.png")]
        );

        let everything = FileProcessor::new(parse(&[target.as_str(), "-q", "-n"]));
        assert_eq!(
            everything.collect_files().expect("files"),
            vec![dir.path().join("a.png"), dir.path().join("b.png")]
        );
    }

    // Tests non-PNG targets are rejected
    // Verified by accepting any existing file
    #[test]
    fn test_rejects_non_png_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").expect("write");

        let target = path.to_string_lossy().to_string();
        let processor = FileProcessor::new(parse(&[target.as_str(), "-q"]));
        assert!(processor.collect_files().is_err());
    }

    // Tests a full run writes the grid and its animation
    // Verified by skipping the export step
    #[test]
    fn test_process_writes_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sample = dir.path().join("checker.png");
        write_checker(&sample);

        let target = sample.to_string_lossy().to_string();
        let cli = parse(&[target.as_str(), "-q", "-v", "-p", "-w", "4", "-H", "3"]);
        FileProcessor::new(cli).process().expect("process");

        let output = image::open(FileProcessor::get_output_path(&sample))
            .expect("output")
            .to_rgba8();
        assert_eq!(output.dimensions(), (4, 3));
        for (x, y, pixel) in output.enumerate_pixels() {
            if x + 1 < 4 {
                assert_ne!(pixel, output.get_pixel(x + 1, y));
            }
            if y + 1 < 3 {
                assert_ne!(pixel, output.get_pixel(x, y + 1));
            }
        }
        assert!(FileProcessor::get_visualization_path(&sample).exists());
    }

    // Tests a prefill image pins its cells in the output
    // Verified by ignoring the prefill flag
    #[test]
    fn test_process_with_prefill() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sample = dir.path().join("checker.png");
        write_checker(&sample);
        let mut prefill = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0]));
        prefill.put_pixel(0, 0, Rgba(BLUE));
        prefill.save(FileProcessor::get_prefill_path(&sample)).expect("save prefill");

        let target = sample.to_string_lossy().to_string();
        let cli = parse(&[target.as_str(), "-q", "-p", "-w", "3", "-H", "3"]);
        FileProcessor::new(cli).process().expect("process");

        let output = image::open(FileProcessor::get_output_path(&sample))
            .expect("output")
            .to_rgba8();
        assert_eq!(output.get_pixel(0, 0).0, BLUE);
        assert_eq!(output.get_pixel(1, 0).0, RED);
        assert_eq!(output.get_pixel(1, 1).0, BLUE);
    }
}
