//! # Transition Rule (B3/S23)
//!
//! Synchronous update: every cell of the next generation is computed from the
//! snapshot, so traversal order never matters.

use super::matrix::Grid;
use super::topology::live_neighbors;

/// Next state of a cell given its current state and live-neighbor count.
#[inline]
#[must_use]
pub const fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// Writes the generation after `snapshot` into `live`.
///
/// # Panics
///
/// Panics if the two grids have different dimensions.
pub fn step_into(snapshot: &Grid, live: &mut Grid) {
    assert_eq!(
        snapshot.dimensions(),
        live.dimensions(),
        "snapshot and live grid must have the same shape"
    );

    for row in 0..snapshot.height() {
        for col in 0..snapshot.width() {
            let n = live_neighbors(snapshot, row, col);
            live.put(row, col, next_state(snapshot.at(row, col), n));
        }
    }
}

/// Pure reference step: returns the generation after `grid`.
#[must_use]
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    step_into(grid, &mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table() {
        for n in 0..=8u8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_birth_needs_exactly_three() {
        for (neighbors, born) in [(2, false), (3, true), (4, false)] {
            let mut grid = Grid::new(7, 7).unwrap();
            let around = [(2, 2), (2, 3), (2, 4), (3, 2), (3, 4), (4, 2), (4, 3), (4, 4)];
            for &(r, c) in around.iter().take(neighbors) {
                grid.set(r, c, true);
            }
            assert_eq!(step(&grid).get(3, 3), born, "{neighbors} neighbors");
        }
    }

    #[test]
    fn test_survival_and_death() {
        let around = [(2, 2), (2, 3), (2, 4), (3, 2), (3, 4), (4, 2), (4, 3), (4, 4)];
        for neighbors in 0..=8 {
            let mut grid = Grid::new(7, 7).unwrap();
            grid.set(3, 3, true);
            for &(r, c) in around.iter().take(neighbors) {
                grid.set(r, c, true);
            }
            let survives = neighbors == 2 || neighbors == 3;
            assert_eq!(step(&grid).get(3, 3), survives, "{neighbors} neighbors");
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Grid::from_rows(&[".....", ".....", ".###.", ".....", "....."]).unwrap();
        let vertical = Grid::from_rows(&[".....", "..#..", "..#..", "..#..", "....."]).unwrap();

        assert_eq!(step(&horizontal), vertical);
        assert_eq!(step(&vertical), horizontal);
    }

    #[test]
    fn test_step_reads_snapshot_only() {
        // A row-order in-place update would let (0,1) be born from a freshly
        // written (0,0) and cascade; the snapshot keeps it a plain blinker.
        let grid = Grid::from_rows(&["###..", ".....", ".....", ".....", "....."]).unwrap();
        let next = step(&grid);
        assert_eq!(next.population(), 3);
        assert!(next.get(4, 1) && next.get(0, 1) && next.get(1, 1));
    }

    #[test]
    #[should_panic(expected = "same shape")]
    fn test_step_into_rejects_mismatched_shapes() {
        let snapshot = Grid::new(3, 3).unwrap();
        let mut live = Grid::new(3, 4).unwrap();
        step_into(&snapshot, &mut live);
    }
}
