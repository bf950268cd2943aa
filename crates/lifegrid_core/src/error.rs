//! # Grid Error Types
//!
//! Cell access never fails: out-of-range coordinates read as dead and writes to
//! them are dropped. The errors here cover construction, strict resizing and
//! pattern parameters.

use thiserror::Error;

/// Errors that can occur when building or reshaping a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A grid must have at least one row and one column.
    #[error("grid dimensions must be non-zero, got {height}x{width}")]
    ZeroDimension {
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
    },

    /// A strict resize asked for fewer rows or columns than the grid has.
    #[error("cannot shrink grid from {current_height}x{current_width} to {height}x{width}")]
    ShrinkRejected {
        /// Current number of rows.
        current_height: usize,
        /// Current number of columns.
        current_width: usize,
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
    },

    /// The grid would hold more than [`MAX_CELLS`](crate::MAX_CELLS) cells.
    #[error("grid of {height}x{width} cells is too large")]
    TooLarge {
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
    },

    /// Diamond density must split the grid into bands at least one row tall.
    #[error("diamond density {density} is invalid for a grid of height {height}")]
    InvalidDensity {
        /// Requested density.
        density: usize,
        /// Grid height at the time of seeding.
        height: usize,
    },

    /// Random fill needs a non-zero `one_in` denominator.
    #[error("random fill probability 1/{0} is invalid")]
    InvalidProbability(u32),

    /// A pattern name did not match any known preset.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
