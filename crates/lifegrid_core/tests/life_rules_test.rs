//! # Life Rules Integration Test
//!
//! Proves the torus and the B3/S23 rule end to end through the public API:
//! still lifes stay still, gliders glide across the seam, resizes keep cells.

use lifegrid_core::{live_neighbors, step, Grid, GridStore, Pattern};
use rand::rngs::StdRng;
use rand::SeedableRng;

const GLIDER: [(isize, isize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

fn with_cells(height: usize, width: usize, cells: &[(isize, isize)]) -> Grid {
    let mut grid = Grid::new(height, width).unwrap();
    for &(r, c) in cells {
        grid.set(r, c, true);
    }
    grid
}

fn shifted(cells: &[(isize, isize)], dr: isize, dc: isize, height: usize, width: usize) -> Vec<(isize, isize)> {
    let (h, w) = (height as isize, width as isize);
    cells
        .iter()
        .map(|&(r, c)| ((r + dr).rem_euclid(h), (c + dc).rem_euclid(w)))
        .collect()
}

/// Test: a lone cell is a neighbor of exactly its 8 wrapped Moore positions.
#[test]
fn test_single_cell_neighbor_counts_everywhere() {
    let (height, width) = (5usize, 7usize);
    for r0 in 0..height as isize {
        for c0 in 0..width as isize {
            let grid = with_cells(height, width, &[(r0, c0)]);
            let ring = shifted(
                &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)],
                r0,
                c0,
                height,
                width,
            );
            for r in 0..height {
                for c in 0..width {
                    let expected = u8::from(ring.contains(&(r as isize, c as isize)));
                    assert_eq!(
                        live_neighbors(&grid, r, c),
                        expected,
                        "alive ({r0}, {c0}), cell ({r}, {c})"
                    );
                }
            }
        }
    }
}

/// Test: the 2x2 block never changes, including when it straddles the seam.
#[test]
fn test_block_is_still_life() {
    for origin in [(1, 1), (3, 3)] {
        let cells = shifted(&[(0, 0), (0, 1), (1, 0), (1, 1)], origin.0, origin.1, 4, 4);
        let block = with_cells(4, 4, &cells);
        let mut grid = block.clone();
        for generation in 0..20 {
            grid = step(&grid);
            assert_eq!(grid, block, "block at {origin:?} changed at generation {generation}");
        }
    }
}

/// Test: a glider reappears translated by (1, 1) every 4 generations and
/// wraps around the torus.
#[test]
fn test_glider_translates_diagonally() {
    let (height, width) = (6usize, 6usize);
    let mut grid = with_cells(height, width, &GLIDER);

    for period in 1..=12isize {
        for _ in 0..4 {
            grid = step(&grid);
        }
        let expected = with_cells(height, width, &shifted(&GLIDER, period, period, height, width));
        assert_eq!(grid, expected, "after {} generations", period * 4);
    }
    // 24 generations on a 6x6 torus: 6 diagonal cells, back where it started.
    assert_eq!(grid, with_cells(height, width, &GLIDER));
}

/// Test: the store produces the same generations as the pure reference step.
#[test]
fn test_store_agrees_with_reference_on_random_soup() {
    let store = GridStore::new(24, 31).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    store.seed(Pattern::Random { one_in: 3 }, &mut rng).unwrap();

    let mut reference = store.snapshot();
    let mut snapshot = Grid::new(1, 1).unwrap();
    for _ in 0..50 {
        reference = step(&reference);
        store.advance(&mut snapshot);
        assert_eq!(store.snapshot(), reference);
    }
    assert_eq!(store.generation(), 50);
}

/// Test: growing keeps every existing cell and adds only dead ones.
#[test]
fn test_resize_preserves_existing_cells() {
    let store = GridStore::new(10, 12).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    store.seed(Pattern::Random { one_in: 2 }, &mut rng).unwrap();
    let before = store.snapshot();

    let outcome = store.resize(15, 20);
    assert_eq!((outcome.rows_added, outcome.cols_added), (5, 8));
    assert_eq!(store.dimensions(), (15, 20));

    for r in 0..15isize {
        for c in 0..20isize {
            let expected = r < 10 && c < 12 && before.get(r, c);
            assert_eq!(store.get_cell(r, c), expected, "cell ({r}, {c})");
        }
    }
}

/// Test: out-of-range reads are dead and out-of-range writes touch nothing.
#[test]
fn test_out_of_bounds_is_harmless() {
    let store = GridStore::new(6, 6).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    store.seed(Pattern::Checkerboard, &mut rng).unwrap();
    let before = store.snapshot();

    let outside = [(-1, 0), (0, -1), (6, 0), (0, 6), (-7, -7), (isize::MAX, 2), (2, isize::MIN)];
    for &(r, c) in &outside {
        assert!(!store.get_cell(r, c));
        store.set_cell(r, c, true);
        store.set_cell(r, c, false);
        store.add_cell(r, c);
    }
    assert_eq!(store.snapshot(), before);
}
