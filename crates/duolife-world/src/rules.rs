//! Per-cell rule evaluation for the two-species variant.
//!
//! The rule differs from strict Conway in two ways: a live cell
//! survives when EITHER species' neighbor count lands on 2 or 3 (not
//! just its own kind), and a dead cell's new species is decided by an
//! ordered set of birth conditions over the per-species counts.

use crate::grid::Grid;
use duolife_core::CellState;

/// Neighbor tally for one evaluation, split by species.
///
/// Recomputed fresh for every evaluation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborCounts {
    pub sad: u8,
    pub happy: u8,
}

impl NeighborCounts {
    fn record(&mut self, state: CellState) {
        match state {
            CellState::Sad => self.sad += 1,
            CellState::Happy => self.happy += 1,
            CellState::Dead => {}
        }
    }
}

/// Tally the up-to-8 neighbors of `(y, x)`, split by species.
///
/// Coordinates outside the grid are not neighbors: boundary cells see
/// fewer of them, and the grid never wraps.
pub fn count_neighbors(grid: &Grid, y: usize, x: usize) -> NeighborCounts {
    let mut counts = NeighborCounts::default();
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dy == 0 && dx == 0 {
                continue;
            }
            let ny = y as i64 + dy;
            let nx = x as i64 + dx;
            if ny < 0 || nx < 0 {
                continue;
            }
            let (ny, nx) = (ny as usize, nx as usize);
            if ny >= grid.rows() || nx >= grid.cols() {
                continue;
            }
            counts.record(grid.get(ny, nx));
        }
    }
    counts
}

/// Compute the next state of the cell at `(y, x)`.
///
/// Pure: the result depends only on the grid snapshot passed in.
pub fn evaluate(grid: &Grid, y: usize, x: usize) -> CellState {
    let current = grid.get(y, x);
    let n = count_neighbors(grid, y, x);

    // A live cell of either species survives, keeping its kind, when
    // either count is 2 or 3.
    if current.is_alive() {
        if matches!(n.sad, 2 | 3) || matches!(n.happy, 2 | 3) {
            return current;
        }
        return CellState::Dead;
    }

    // Births from dead, first match wins.
    match (n.sad, n.happy) {
        (3, _) => CellState::Sad,
        (2, 1) => CellState::Sad,
        (1, 2) => CellState::Happy,
        (_, 3) => CellState::Happy,
        _ => CellState::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duolife_core::CellState::{Dead, Happy, Sad};
    use proptest::prelude::*;

    fn grid_from(rows: &[&[u8]]) -> Grid {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| CellState::try_from(v).unwrap())
                    .collect()
            })
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_survival_same_species() {
        // Center Sad cell with two Sad neighbors survives.
        let grid = grid_from(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]);
        assert_eq!(evaluate(&grid, 1, 1), Sad);
    }

    #[test]
    fn test_survival_cross_species() {
        // A Sad cell held alive purely by two Happy neighbors keeps its
        // own species.
        let grid = grid_from(&[&[2, 0, 0], &[0, 1, 0], &[0, 0, 2]]);
        assert_eq!(evaluate(&grid, 1, 1), Sad);

        // And the mirror case.
        let grid = grid_from(&[&[1, 0, 0], &[0, 2, 0], &[0, 0, 1]]);
        assert_eq!(evaluate(&grid, 1, 1), Happy);
    }

    #[test]
    fn test_underpopulated_cell_dies() {
        let grid = grid_from(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Dead);

        let grid = grid_from(&[&[0, 0, 0], &[0, 2, 2], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Dead);
    }

    #[test]
    fn test_overpopulated_cell_dies() {
        // Four Sad neighbors: neither count is 2 or 3.
        let grid = grid_from(&[&[1, 1, 0], &[1, 1, 0], &[1, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Dead);
    }

    #[test]
    fn test_mixed_counts_without_survival_die() {
        // One of each species: 1 and 1, no survival.
        let grid = grid_from(&[&[1, 0, 0], &[0, 1, 2], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Dead);
    }

    #[test]
    fn test_birth_priority() {
        // sad=3 -> Sad
        let grid = grid_from(&[&[1, 1, 1], &[0, 0, 0], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Sad);

        // sad=2, happy=1 -> Sad
        let grid = grid_from(&[&[1, 1, 2], &[0, 0, 0], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Sad);

        // sad=1, happy=2 -> Happy
        let grid = grid_from(&[&[1, 2, 2], &[0, 0, 0], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Happy);

        // happy=3 -> Happy
        let grid = grid_from(&[&[2, 2, 2], &[0, 0, 0], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Happy);

        // sad=2, happy=2 matches no birth condition -> stays Dead
        let grid = grid_from(&[&[1, 1, 0], &[2, 0, 2], &[0, 0, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Dead);
    }

    #[test]
    fn test_birth_with_extra_happy_neighbors_prefers_sad() {
        // sad=3 wins even when happy=3 as well.
        let grid = grid_from(&[&[1, 1, 1], &[2, 0, 2], &[0, 2, 0]]);
        assert_eq!(evaluate(&grid, 1, 1), Sad);
    }

    #[test]
    fn test_boundary_neighbor_counts() {
        // All-Sad 3x3: corner sees 3, edge sees 5, interior sees 8.
        let grid = grid_from(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(count_neighbors(&grid, 0, 0).sad, 3);
        assert_eq!(count_neighbors(&grid, 0, 1).sad, 5);
        assert_eq!(count_neighbors(&grid, 1, 1).sad, 8);
    }

    #[test]
    fn test_no_wraparound() {
        // Live cells hug the right edge; the left edge must not see them.
        let grid = grid_from(&[&[0, 0, 1], &[0, 0, 1], &[0, 0, 1]]);
        let counts = count_neighbors(&grid, 1, 0);
        assert_eq!(counts.sad, 0);
        assert_eq!(counts.happy, 0);
    }

    #[test]
    fn test_evaluate_has_no_side_effects() {
        let grid = grid_from(&[&[1, 2, 0], &[0, 1, 2], &[2, 0, 1]]);
        let before = grid.clone();
        for y in 0..3 {
            for x in 0..3 {
                evaluate(&grid, y, x);
            }
        }
        assert_eq!(grid, before);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(0u8..3, cols), rows).prop_map(|raw| {
                let rows = raw
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|v| CellState::try_from(v).unwrap())
                            .collect()
                    })
                    .collect();
                Grid::from_rows(rows).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn evaluate_is_total_over_valid_inputs(grid in arb_grid()) {
            for y in 0..grid.rows() {
                for x in 0..grid.cols() {
                    // Must not panic anywhere in bounds, including every
                    // corner and edge.
                    let _ = evaluate(&grid, y, x);
                }
            }
        }

        #[test]
        fn neighbor_counts_stay_bounded(grid in arb_grid()) {
            for y in 0..grid.rows() {
                for x in 0..grid.cols() {
                    let n = count_neighbors(&grid, y, x);
                    prop_assert!(n.sad + n.happy <= 8);
                }
            }
        }

        #[test]
        fn isolated_dead_cells_stay_dead(rows in 1usize..6, cols in 1usize..6) {
            let grid = Grid::from_rows(vec![vec![CellState::Dead; cols]; rows]).unwrap();
            for y in 0..rows {
                for x in 0..cols {
                    prop_assert_eq!(evaluate(&grid, y, x), CellState::Dead);
                }
            }
        }
    }
}
