//! # Torus Neighborhood
//!
//! Moore neighborhood (8 cells) with both axes wrapping. On grids only one or
//! two cells wide the wrapped positions alias each other; each of the eight
//! positions is still counted once, which matches an infinite periodic tiling.

use super::matrix::Grid;

/// Offsets of the neighborhood positions, center excluded.
const OFFSETS: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// Counts live neighbors of `(row, col)` with toroidal wraparound.
///
/// `(row, col)` must be in range. No allocation, eight lookups.
///
/// # Panics
///
/// Panics if `row >= grid.height()` or `col >= grid.width()`.
#[inline]
#[must_use]
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (height, width) = grid.dimensions();
    assert!(row < height && col < width, "cell ({row}, {col}) outside {height}x{width}");

    let rows = [
        if row == 0 { height - 1 } else { row - 1 },
        row,
        if row + 1 >= height { 0 } else { row + 1 },
    ];
    let cols = [
        if col == 0 { width - 1 } else { col - 1 },
        col,
        if col + 1 >= width { 0 } else { col + 1 },
    ];

    OFFSETS
        .iter()
        .map(|&(dr, dc)| u8::from(grid.at(rows[dr], cols[dc])))
        .sum()
}
