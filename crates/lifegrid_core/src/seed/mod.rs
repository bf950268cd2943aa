//! # Seeding Patterns
//!
//! Presets that overwrite part or all of a grid with a fixed geometric shape.
//! Every write goes through the bounds-checked setter, so offsets that fall
//! outside small grids are dropped instead of panicking.

mod patterns;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{GridError, GridResult};
use crate::grid::Grid;

/// Default random fill probability denominator (1 in 8 cells alive).
pub const DEFAULT_RANDOM_ONE_IN: u32 = 8;

/// Default diamond density (bands per grid height).
pub const DEFAULT_DIAMOND_DENSITY: usize = 5;

/// A seeding preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Every cell alive with probability `1/one_in`, otherwise dead.
    Random {
        /// Probability denominator, must be non-zero.
        one_in: u32,
    },
    /// The four border lines alive, interior untouched.
    Edges,
    /// Two 4-column vertical bands.
    Pillars,
    /// Two 4-row horizontal bands.
    Rows,
    /// Runs of 3 on every third row, alternating alive and dead.
    DottedLines,
    /// Runs of 3 on every row, alternating alive and dead.
    Threads,
    /// Alternating 4x4 blocks.
    Checkerboard,
    /// Bands of mirrored diagonal strokes.
    Diamonds {
        /// Number of bands the grid height is split into.
        density: usize,
    },
}

impl Pattern {
    /// Every preset with its default parameters, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Random { one_in: DEFAULT_RANDOM_ONE_IN },
        Self::Edges,
        Self::Pillars,
        Self::Rows,
        Self::DottedLines,
        Self::Threads,
        Self::Checkerboard,
        Self::Diamonds { density: DEFAULT_DIAMOND_DENSITY },
    ];

    /// Human readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Random { .. } => "Random Fill",
            Self::Edges => "Edge tracing",
            Self::Pillars => "Pillars",
            Self::Rows => "Rows",
            Self::DottedLines => "Dotted Lines",
            Self::Threads => "Threads",
            Self::Checkerboard => "Checkerboard",
            Self::Diamonds { .. } => "Diamonds",
        }
    }

    /// Returns true if applying the pattern consumes randomness.
    #[must_use]
    pub const fn is_random(self) -> bool {
        matches!(self, Self::Random { .. })
    }

    /// Writes the pattern into `grid`.
    ///
    /// Parameters are validated before any cell is touched.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidProbability`] for `Random { one_in: 0 }`
    /// - [`GridError::InvalidDensity`] for a diamond density of zero or larger
    ///   than the grid height
    pub fn apply<R: Rng + ?Sized>(self, grid: &mut Grid, rng: &mut R) -> GridResult<()> {
        match self {
            Self::Random { one_in } => patterns::random_fill(grid, one_in, rng)?,
            Self::Edges => patterns::edge_fill(grid),
            Self::Pillars => patterns::pillar_fill(grid),
            Self::Rows => patterns::row_fill(grid),
            Self::DottedLines => patterns::dotted_lines(grid),
            Self::Threads => patterns::threads(grid),
            Self::Checkerboard => patterns::checkerboard(grid),
            Self::Diamonds { density } => patterns::diamonds(grid, density)?,
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pattern {
    type Err = GridError;

    /// Accepts menu labels and short names, case-insensitive
    /// (`"Random Fill"`, `"random"`, `"dotted-lines"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let pattern = match key.as_str() {
            "random" | "randomfill" => Self::Random { one_in: DEFAULT_RANDOM_ONE_IN },
            "edges" | "edge" | "edgetracing" | "edgefill" => Self::Edges,
            "pillars" | "pillarfill" => Self::Pillars,
            "rows" | "rowfill" => Self::Rows,
            "dotted" | "dottedlines" => Self::DottedLines,
            "threads" => Self::Threads,
            "checkers" | "checkerboard" => Self::Checkerboard,
            "diamonds" => Self::Diamonds { density: DEFAULT_DIAMOND_DENSITY },
            _ => return Err(GridError::UnknownPattern(s.to_owned())),
        };
        Ok(pattern)
    }
}
