//! # Toroidal Grid
//!
//! ```text
//!   Consumer (render/input)            Simulation thread
//!   ───────────────────────            ─────────────────
//!   get_cell / set_cell ──┐        ┌── advance(snapshot)
//!   seed / clear / resize ┤        │     1. copy live -> snapshot
//!                         ▼        ▼     2. rule(snapshot) -> live
//!                    ┌──────────────────┐3. generation += 1
//!                    │ GridStore (lock) │
//!                    └──────────────────┘
//! ```
//!
//! [`Grid`] is the plain value type (also used for snapshots), [`GridStore`]
//! is the shared, lock-guarded owner of the live grid.

mod matrix;
mod rules;
mod store;
mod topology;

pub use matrix::{Grid, ResizeOutcome, MAX_CELLS};
pub use rules::{next_state, step, step_into};
pub use store::GridStore;
pub use topology::live_neighbors;
