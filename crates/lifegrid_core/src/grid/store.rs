//! # Grid Store
//!
//! The only access path to the live grid. Every operation, from a single cell
//! read to a whole generation step, is one critical section on the same lock.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use rand::Rng;

use crate::error::{GridError, GridResult};
use crate::seed::Pattern;

use super::matrix::{Grid, ResizeOutcome};
use super::rules::step_into;

/// Live grid plus the generation it represents.
#[derive(Debug)]
struct GridState {
    grid: Grid,
    generation: u64,
}

/// Lock-guarded owner of the live grid, shared between the simulation thread
/// and the consumer (usually behind an `Arc`).
///
/// ## Usage
///
/// ```rust
/// use lifegrid_core::{Grid, GridStore};
///
/// let store = GridStore::new(4, 4).unwrap();
/// store.set_cell(1, 1, true);
/// store.set_cell(1, 2, true);
/// store.set_cell(2, 1, true);
/// store.set_cell(2, 2, true);
///
/// let mut snapshot = Grid::new(4, 4).unwrap();
/// store.advance(&mut snapshot);
///
/// // A block is a still life.
/// assert!(store.get_cell(1, 1) && store.get_cell(2, 2));
/// assert!(!store.get_cell(-1, 0));
/// ```
#[derive(Debug)]
pub struct GridStore {
    state: Mutex<GridState>,
    /// Signalled whenever the generation counter changes.
    generation_changed: Condvar,
}

impl GridStore {
    /// Creates a store holding an all-dead grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if either dimension is zero.
    pub fn new(height: usize, width: usize) -> GridResult<Self> {
        Ok(Self::from_grid(Grid::new(height, width)?))
    }

    /// Wraps an existing grid at generation 0.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            state: Mutex::new(GridState { grid, generation: 0 }),
            generation_changed: Condvar::new(),
        }
    }

    /// Reads a cell. Out of range reads as dead.
    #[must_use]
    pub fn get_cell(&self, row: isize, col: isize) -> bool {
        self.state.lock().grid.get(row, col)
    }

    /// Writes a cell. Out of range is a no-op.
    pub fn set_cell(&self, row: isize, col: isize, alive: bool) {
        self.state.lock().grid.set(row, col, alive);
    }

    /// Turns a cell alive.
    #[inline]
    pub fn add_cell(&self, row: isize, col: isize) {
        self.set_cell(row, col, true);
    }

    /// Turns a cell dead.
    #[inline]
    pub fn remove_cell(&self, row: isize, col: isize) {
        self.set_cell(row, col, false);
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.grid.clear();
        state.generation = 0;
        self.generation_changed.notify_all();
    }

    /// Grows the grid to at least `height` x `width`.
    ///
    /// Shrinking is not supported: an axis asked to shrink keeps its size.
    pub fn resize(&self, height: usize, width: usize) -> ResizeOutcome {
        let outcome = self.state.lock().grid.grow(height, width);
        if outcome.too_large {
            tracing::warn!("resize to {height}x{width} exceeds the cell limit, ignored");
        } else if outcome.shrink_ignored {
            tracing::debug!(
                "resize to {}x{} would shrink the grid, shrinking axis left as is",
                height,
                width
            );
        }
        outcome
    }

    /// Grow-only resize that refuses shrink requests instead of ignoring them.
    ///
    /// # Errors
    ///
    /// - [`GridError::ZeroDimension`] if either dimension is zero
    /// - [`GridError::ShrinkRejected`] if either axis would shrink
    /// - [`GridError::TooLarge`] if the grid would exceed [`MAX_CELLS`](crate::MAX_CELLS)
    pub fn try_resize(&self, height: usize, width: usize) -> GridResult<ResizeOutcome> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width });
        }
        let mut state = self.state.lock();
        let (current_height, current_width) = state.grid.dimensions();
        if height < current_height || width < current_width {
            return Err(GridError::ShrinkRejected {
                current_height,
                current_width,
                height,
                width,
            });
        }
        let outcome = state.grid.grow(height, width);
        if outcome.too_large {
            return Err(GridError::TooLarge { height, width });
        }
        Ok(outcome)
    }

    /// Applies a seeding pattern under the lock.
    ///
    /// # Errors
    ///
    /// Returns the pattern's parameter error (bad density or probability);
    /// the grid is left untouched in that case.
    pub fn seed<R: Rng + ?Sized>(&self, pattern: Pattern, rng: &mut R) -> GridResult<()> {
        pattern.apply(&mut self.state.lock().grid, rng)
    }

    /// Computes one generation.
    ///
    /// Holds the lock for the whole copy-compute-write sequence, so no reader
    /// ever observes a half-written generation. `snapshot` is scratch space
    /// owned by the caller and reused across steps.
    ///
    /// Returns the new generation number.
    pub fn advance(&self, snapshot: &mut Grid) -> u64 {
        let mut state = self.state.lock();
        snapshot.clone_from(&state.grid);
        step_into(snapshot, &mut state.grid);
        state.generation += 1;
        self.generation_changed.notify_all();
        state.generation
    }

    /// Blocks until at least `target` generations have been computed.
    ///
    /// Returns false if `timeout` elapsed first.
    pub fn wait_for_generation(&self, target: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.generation < target {
            if self
                .generation_changed
                .wait_until(&mut state, deadline)
                .timed_out()
            {
                return state.generation >= target;
            }
        }
        true
    }

    /// Number of generations computed since creation or the last clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// `(height, width)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.state.lock().grid.dimensions()
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.state.lock().grid.population()
    }

    /// Owned copy of the current grid.
    #[must_use]
    pub fn snapshot(&self) -> Grid {
        self.state.lock().grid.clone()
    }

    /// Copies the current grid into `target`, reusing its allocation.
    pub fn copy_into(&self, target: &mut Grid) {
        target.clone_from(&self.state.lock().grid);
    }
}
