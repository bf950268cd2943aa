//! # Cell Matrix
//!
//! Row-major boolean storage. A single flat buffer keeps every row exactly
//! `width` cells long, so the row-length invariant cannot be broken by a
//! partial update.

use std::fmt;

use crate::error::{GridError, GridResult};

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = u32::MAX as usize;

/// `height * width` if it fits in [`MAX_CELLS`].
#[inline]
fn cell_count(height: usize, width: usize) -> Option<usize> {
    height.checked_mul(width).filter(|&cells| cells <= MAX_CELLS)
}

/// A `height` x `width` matrix of cell states.
///
/// Public accessors take signed coordinates: anything outside
/// `[0, height) x [0, width)` reads as dead and ignores writes.
#[derive(Debug, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cell states, `height * width` long.
    cells: Vec<bool>,
    /// Number of rows (>= 1).
    height: usize,
    /// Number of columns (>= 1).
    width: usize,
}

/// What a grow-only resize actually did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// Rows appended at the bottom.
    pub rows_added: usize,
    /// Columns appended on the right of every row.
    pub cols_added: usize,
    /// True if at least one axis was asked to shrink and was left alone.
    pub shrink_ignored: bool,
    /// True if the requested size exceeds [`MAX_CELLS`]; nothing changed.
    pub too_large: bool,
}

impl ResizeOutcome {
    /// Returns true if the grid changed shape.
    #[inline]
    #[must_use]
    pub const fn grew(&self) -> bool {
        self.rows_added > 0 || self.cols_added > 0
    }
}

impl Grid {
    /// Creates an all-dead grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if either dimension is zero and
    /// [`GridError::TooLarge`] if the grid would exceed [`MAX_CELLS`].
    pub fn new(height: usize, width: usize) -> GridResult<Self> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width });
        }
        let cells = cell_count(height, width).ok_or(GridError::TooLarge { height, width })?;
        Ok(Self {
            cells: vec![false; cells],
            height,
            width,
        })
    }

    /// Builds a grid from text rows. `#`, `O`, `o`, `*` and `1` are alive,
    /// every other character is dead. Short rows are padded with dead cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if there are no rows or all rows
    /// are empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GridResult<Self> {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut grid = Self::new(height, width)?;
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.as_ref().chars().enumerate() {
                grid.put(row, col, matches!(ch, '#' | 'O' | 'o' | '*' | '1'));
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    fn index(&self, row: isize, col: isize) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.height)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.width)?;
        Some(row * self.width + col)
    }

    /// Reads a cell. Out of range reads as dead.
    #[inline]
    #[must_use]
    pub fn get(&self, row: isize, col: isize) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Writes a cell. Out of range is a no-op.
    #[inline]
    pub fn set(&mut self, row: isize, col: isize, alive: bool) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = alive;
        }
    }

    /// In-range read for the stepping hot path.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    /// In-range write for the stepping hot path.
    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.width + col] = alive;
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterates rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Grows the grid to at least `height` x `width`.
    ///
    /// New cells are dead, existing cells keep their state. An axis whose
    /// requested size is not larger than the current one is left unchanged.
    /// A target above [`MAX_CELLS`] leaves the grid untouched and sets
    /// `too_large`.
    pub fn grow(&mut self, height: usize, width: usize) -> ResizeOutcome {
        let shrink_ignored = height < self.height || width < self.width;
        let new_height = height.max(self.height);
        let new_width = width.max(self.width);
        let Some(total) = cell_count(new_height, new_width) else {
            return ResizeOutcome {
                shrink_ignored,
                too_large: true,
                ..ResizeOutcome::default()
            };
        };

        let outcome = ResizeOutcome {
            rows_added: new_height - self.height,
            cols_added: new_width - self.width,
            shrink_ignored,
            too_large: false,
        };

        if outcome.cols_added > 0 {
            let mut cells = Vec::with_capacity(total);
            for row in self.cells.chunks_exact(self.width) {
                cells.extend_from_slice(row);
                cells.resize(cells.len() + outcome.cols_added, false);
            }
            self.cells = cells;
            self.width = new_width;
        }

        if outcome.rows_added > 0 {
            self.height = new_height;
            self.cells.resize(total, false);
        }

        outcome
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            height: self.height,
            width: self.width,
        }
    }

    /// Reuses the existing cell buffer when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        self.cells.clone_from(&source.cells);
        self.height = source.height;
        self.width = source.width;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
