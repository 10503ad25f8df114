//! Tests for capturing collapses and exporting the animation

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::collapse::Resolution;
    use tilecollapse::algorithm::executor::Collapse;
    use tilecollapse::io::configuration::{MAX_GIF_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
    use tilecollapse::io::visualization::VisualizationCapture;
    use tilecollapse::spatial::TileId;

    const PALETTE: [[u8; 4]; 2] = [[0, 0, 0, 255], [255, 255, 255, 255]];

    fn collapse(x: usize, y: usize, tile: usize) -> Collapse {
        Collapse {
            position: (x, y),
            tile: TileId::new(tile),
            resolution: Resolution::Chosen,
        }
    }

    // Tests collapses are kept in the order they were recorded
    // Verified by sorting collapses by position
    #[test]
    fn test_record_keeps_order() {
        let mut capture = VisualizationCapture::new(2, 2, 4, PALETTE.to_vec());
        capture.record(collapse(1, 1, 0));
        capture.record_all(&[collapse(0, 0, 1), collapse(1, 0, 0)]);

        assert_eq!(capture.collapse_count(), 3);
        assert_eq!(capture.collapses()[0].position, (1, 1));
        assert_eq!(capture.collapses()[2].position, (1, 0));
    }

    // Tests exporting without collapses is refused
    // Verified by writing a single blank frame
    #[test]
    fn test_export_requires_collapses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let capture = VisualizationCapture::new(2, 2, 4, PALETTE.to_vec());

        assert!(matches!(
            capture.export_gif(&dir.path().join("empty.gif"), 25),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests a GIF is written for a recorded run
    // Verified by skipping the encoder
    #[test]
    fn test_export_gif() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut capture = VisualizationCapture::new(2, 1, 4, PALETTE.to_vec());
        capture.record_all(&[collapse(0, 0, 1), collapse(1, 0, 0)]);
        let path = dir.path().join("run.gif");

        capture.export_gif(&path, 5).expect("export");

        let metadata = std::fs::metadata(&path).expect("metadata");
        assert!(metadata.len() > 0);
    }

    // Tests short delays group collapses into fewer frames
    // Verified by emitting one frame per collapse at any delay
    #[test]
    fn test_frame_plan_speed() {
        let mut capture = VisualizationCapture::new(4, 4, 1, PALETTE.to_vec());
        let collapses: Vec<Collapse> = (0..16).map(|i| collapse(i % 4, i / 4, i % 2)).collect();
        capture.record_all(&collapses);

        assert_eq!(capture.frame_plan(25), (25, 1));
        assert_eq!(capture.frame_count(25), 18);
        assert_eq!(capture.frame_plan(5), (VIEWER_MIN_FRAME_DELAY_MS, 4));
        assert_eq!(capture.frame_count(5), 6);
    }

    // Tests large runs stay within the frame limit
    // Verified by keeping one frame per collapse for big grids
    #[test]
    fn test_frame_count_is_capped() {
        let side = 200;
        let mut capture = VisualizationCapture::new(side, side, 1, PALETTE.to_vec());
        let collapses: Vec<Collapse> = (0..side * side)
            .map(|i| collapse(i % side, i / side, 0))
            .collect();
        capture.record_all(&collapses);

        assert!(capture.frame_count(25) <= MAX_GIF_FRAMES);
        let (delay, skip_factor) = capture.frame_plan(25);
        assert_eq!(delay, 25);
        assert!(skip_factor > 1);
    }

    // Tests a collapse naming a tile without a color fails the export
    // Verified by painting unknown tiles black
    #[test]
    fn test_export_missing_color() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut capture = VisualizationCapture::new(1, 1, 2, PALETTE.to_vec());
        capture.record(collapse(0, 0, 5));

        assert!(matches!(
            capture.export_gif(&dir.path().join("bad.gif"), 25),
            Err(AlgorithmError::InvalidTileIndex { index: 5, .. })
        ));
    }
}
