//! Pattern geometry. Offsets are signed so that shapes anchored off-grid on
//! tiny grids are clipped by [`Grid::set`] instead of underflowing.

use rand::Rng;

use crate::error::{GridError, GridResult};
use crate::grid::Grid;

#[inline]
fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// Signed `(height, width)`.
#[inline]
fn extent(grid: &Grid) -> (isize, isize) {
    (signed(grid.height()), signed(grid.width()))
}

/// Writes `len` consecutive cells of one row.
#[inline]
fn run(grid: &mut Grid, row: isize, col: isize, len: isize, alive: bool) {
    for offset in 0..len {
        grid.set(row, col + offset, alive);
    }
}

pub(super) fn random_fill<R: Rng + ?Sized>(grid: &mut Grid, one_in: u32, rng: &mut R) -> GridResult<()> {
    if one_in == 0 {
        return Err(GridError::InvalidProbability(one_in));
    }
    let (height, width) = extent(grid);
    for row in 0..height {
        for col in 0..width {
            grid.set(row, col, rng.gen_range(0..one_in) == 0);
        }
    }
    Ok(())
}

pub(super) fn edge_fill(grid: &mut Grid) {
    let (height, width) = extent(grid);
    for col in 0..width {
        grid.set(0, col, true);
        grid.set(height - 1, col, true);
    }
    for row in 0..height {
        grid.set(row, 0, true);
        grid.set(row, width - 1, true);
    }
}

pub(super) fn pillar_fill(grid: &mut Grid) {
    let (height, width) = extent(grid);
    let first = width / 3 - 1;
    let second = first * 2;
    for row in 0..height {
        run(grid, row, first, 4, true);
        run(grid, row, second, 4, true);
    }
}

pub(super) fn row_fill(grid: &mut Grid) {
    let (height, width) = extent(grid);
    let first = height / 3 - 1;
    let second = first * 2;
    for band in [first, second] {
        for row in band..band + 4 {
            run(grid, row, 0, width, true);
        }
    }
}

/// Runs of 3 every third column on the given rows; `(row + col)` even is
/// alive, odd is explicitly dead.
fn dashed_rows(grid: &mut Grid, row_step: usize) {
    let (height, width) = extent(grid);
    for row in (0..height).step_by(row_step) {
        for col in (0..width).step_by(3) {
            run(grid, row, col, 3, (row + col) % 2 == 0);
        }
    }
}

pub(super) fn dotted_lines(grid: &mut Grid) {
    dashed_rows(grid, 3);
}

pub(super) fn threads(grid: &mut Grid) {
    dashed_rows(grid, 1);
}

/// The fill flag flips after every 4-column block and again every 4 rows.
/// It is carried from the end of one row into the next.
pub(super) fn checkerboard(grid: &mut Grid) {
    let (height, width) = extent(grid);
    let mut fill = true;
    for row in 0..height {
        if row != 0 && row % 4 == 0 {
            fill = !fill;
        }
        for col in (0..width).step_by(4) {
            run(grid, row, col, 4, fill);
            fill = !fill;
        }
    }
}

/// Splits the height into `density` bands of `height / density` rows. Inside a
/// band each diamond is two 2-wide strokes mirrored around the band's middle,
/// drawn one column per row; diamonds are separated by one column. A height
/// that `density` does not divide leaves a ragged last band.
pub(super) fn diamonds(grid: &mut Grid, density: usize) -> GridResult<()> {
    if density == 0 || density > grid.height() {
        return Err(GridError::InvalidDensity {
            density,
            height: grid.height(),
        });
    }
    let (height, width) = extent(grid);
    let delta = signed(grid.height() / density);

    let mut band = 0;
    while band <= height {
        let mut col = 0;
        while col < width {
            for i in 0..delta {
                let mirrored = band + delta - 1 - i;
                run(grid, band + i, col, 2, true);
                run(grid, mirrored, col, 2, true);
                col += 1;
            }
            col += 1;
        }
        band += delta;
    }
    Ok(())
}
