//! # LIFEGRID Core
//!
//! Conway's Game of Life on a toroidal grid, shared between a background
//! simulation thread and a rendering consumer.
//!
//! ## Architecture Rules
//!
//! 1. **One lock, every access** - cell reads, cell writes, seeding and whole
//!    generation steps all go through the [`GridStore`] lock
//! 2. **Snapshot reads** - a step evaluates the rule against a copy of the grid,
//!    never against the grid being written
//! 3. **Consumer paces** - the simulation advances exactly one generation per
//!    frame signal
//!
//! ## Example
//!
//! ```rust
//! use lifegrid_core::{Grid, GridStore, Pattern};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let store = GridStore::new(8, 8).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! store.seed(Pattern::Edges, &mut rng).unwrap();
//! assert_eq!(store.population(), 28);
//!
//! // The simulation thread owns the snapshot buffer and reuses it.
//! let mut snapshot = Grid::new(8, 8).unwrap();
//! store.advance(&mut snapshot);
//! assert_eq!(store.generation(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod grid;
pub mod seed;
pub mod sync;

pub use error::{GridError, GridResult};
pub use grid::{
    live_neighbors, next_state, step, step_into, Grid, GridStore, ResizeOutcome, MAX_CELLS,
};
pub use seed::{Pattern, DEFAULT_DIAMOND_DENSITY, DEFAULT_RANDOM_ONE_IN};
pub use sync::{frame_signal, FrameGate, FrameTrigger, GateCloser, GateEvent, SignalClosed};
