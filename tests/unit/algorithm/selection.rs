//! Tests for minimum-entropy candidate restriction and random tie-breaking

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;
    use tilecollapse::algorithm::collapse::Collapser;
    use tilecollapse::algorithm::propagation::propagate;
    use tilecollapse::algorithm::selection::{minimum_entropy_candidates, select_next};
    use tilecollapse::spatial::{Direction, Grid, TileCatalog, TileId};

    // Tile 0 may only have tile 0 on its right
    fn narrowing_catalog() -> TileCatalog {
        let mut builder = TileCatalog::builder();
        let a = builder.add_tile("a");
        let b = builder.add_tile("b");
        let c = builder.add_tile("c");
        for tile in [a, b, c] {
            for direction in Direction::ALL {
                for neighbor in [a, b, c] {
                    if !(tile == a && direction == Direction::Right && neighbor != a) {
                        builder.allow(tile, direction, neighbor);
                    }
                }
            }
        }
        builder.build().expect("catalog")
    }

    // Tests every open cell is a candidate on a fresh grid
    // Verified by keeping only the first minimum cell
    #[test]
    fn test_fresh_grid_all_candidates() {
        let catalog = narrowing_catalog();
        let grid = Grid::new(3, 2, &catalog);
        assert_eq!(minimum_entropy_candidates(&grid).len(), 6);
    }

    // Tests only the most constrained cells remain candidates
    // Verified by selecting the maximum entropy instead
    #[test]
    fn test_restricts_to_minimum_entropy() {
        let catalog = narrowing_catalog();
        let mut grid = Grid::new(2, 2, &catalog);
        let collapser = Collapser::new(TileId::new(0), catalog.len());

        collapser.commit(grid.cell_at_mut(0, 0).expect("cell"), TileId::new(0));
        propagate(&mut grid, &catalog).expect("propagate");

        assert_eq!(minimum_entropy_candidates(&grid), vec![(1, 0)]);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_next(&grid, &mut rng), Some((1, 0)));
    }

    // Tests a completed grid yields no selection
    // Verified by returning the first cell regardless of state
    #[test]
    fn test_complete_grid_selects_nothing() {
        let catalog = narrowing_catalog();
        let mut grid = Grid::new(2, 1, &catalog);
        let collapser = Collapser::new(TileId::new(0), catalog.len());
        for x in 0..2 {
            collapser.commit(grid.cell_at_mut(x, 0).expect("cell"), TileId::new(0));
        }

        let mut rng = StdRng::seed_from_u64(7);
        assert!(minimum_entropy_candidates(&grid).is_empty());
        assert_eq!(select_next(&grid, &mut rng), None);
    }

    // Tests ties are broken randomly rather than by scan order
    // Verified by always returning the first candidate
    #[test]
    fn test_tie_break_is_not_positional() {
        let catalog = narrowing_catalog();
        let grid = Grid::new(4, 4, &catalog);
        let mut rng = StdRng::seed_from_u64(42);

        let picks: HashSet<_> = (0..64)
            .filter_map(|_| select_next(&grid, &mut rng))
            .collect();
        assert!(picks.len() > 4, "Expected varied picks, got {picks:?}");
    }

    // Tests the same seed gives the same pick
    // Verified by drawing from a fresh thread rng
    #[test]
    fn test_selection_deterministic_for_seed() {
        let catalog = narrowing_catalog();
        let grid = Grid::new(5, 5, &catalog);

        let first = select_next(&grid, &mut StdRng::seed_from_u64(9));
        let second = select_next(&grid, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
