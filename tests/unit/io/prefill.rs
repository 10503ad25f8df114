//! Tests for reading pinned cells from a prefill image

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::prefill::{PrefillData, PrefillPlacement};
    use tilecollapse::spatial::TileId;

    const PALETTE: [[u8; 4]; 2] = [[0, 0, 0, 255], [255, 255, 255, 255]];
    const UNKNOWN: [u8; 4] = [10, 200, 30, 255];

    // Tests palette colors become placements and others are ignored
    // Verified by treating unknown colors as tile zero
    #[test]
    fn test_from_rgba_maps_palette_colors() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba(UNKNOWN));
        image.put_pixel(1, 0, Rgba(PALETTE[1]));
        image.put_pixel(2, 1, Rgba(PALETTE[0]));

        let prefill = PrefillData::from_rgba(&image, &PALETTE).expect("prefill");

        assert_eq!(prefill.len(), 2);
        assert!(prefill.placements().contains(&PrefillPlacement {
            position: (1, 0),
            tile: TileId::new(1),
        }));
        assert!(prefill.placements().contains(&PrefillPlacement {
            position: (2, 1),
            tile: TileId::new(0),
        }));
    }

    // Tests an image without palette colors is rejected
    // Verified by returning an empty prefill
    #[test]
    fn test_no_palette_colors() {
        let image = RgbaImage::from_pixel(2, 2, Rgba(UNKNOWN));
        assert!(matches!(
            PrefillData::from_rgba(&image, &PALETTE),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests placements beyond the grid are dropped and counted
    // Verified by keeping placements on the boundary row
    #[test]
    fn test_retain_within() {
        let image = RgbaImage::from_pixel(4, 4, Rgba(PALETTE[0]));
        let mut prefill = PrefillData::from_rgba(&image, &PALETTE).expect("prefill");

        let dropped = prefill.retain_within(3, 2);

        assert_eq!(dropped, 10);
        assert_eq!(prefill.len(), 6);
        assert!(
            prefill
                .placements()
                .iter()
                .all(|placement| placement.position.0 < 3 && placement.position.1 < 2)
        );
        assert_eq!(prefill.into_placements().len(), 6);
    }

    // Tests prefill images load from disk
    // Verified by reading the sample instead of the prefill
    #[test]
    fn test_from_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("room_pre.png");
        RgbaImage::from_pixel(1, 1, Rgba(PALETTE[1]))
            .save(&path)
            .expect("save");

        let prefill = PrefillData::from_png(&path, &PALETTE).expect("prefill");
        assert!(!prefill.is_empty());
        assert_eq!(prefill.placements()[0].tile, TileId::new(1));
    }
}
