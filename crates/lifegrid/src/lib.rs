//! # LIFEGRID
//!
//! The engine crate: owns the simulation thread and hands the consumer a
//! narrow, always-safe interface.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             LIFEGRID ENGINE                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐   sync_frame()   ┌─────────────────┐               │
//! │  │   Consumer      │─────────────────>│ Simulation Loop │               │
//! │  │                 │   (rendezvous)   │  (own thread)   │               │
//! │  │  • FramePacer   │                  │  • snapshot     │               │
//! │  │  • Stroke       │                  │  • B3/S23 rule  │               │
//! │  │  • render reads │                  │  • step stats   │               │
//! │  └────────┬────────┘                  └────────┬────────┘               │
//! │           │          ┌─────────────────┐       │                        │
//! │           └─────────>│    GridStore    │<──────┘                        │
//! │                      │  (one lock)     │                                │
//! │                      └─────────────────┘                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `engine`: idle/running lifecycle, start and shutdown
//! - `sim_loop`: the background step loop and its statistics
//! - `config`: TOML configuration
//! - `pacing`: frame timing on the consumer side
//! - `brush`: pointer drags rasterized into cell edits
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use lifegrid::{EngineConfig, Pattern, Simulation};
//!
//! let config = EngineConfig { height: 16, width: 16, rng_seed: Some(1), ..Default::default() };
//! let mut sim = Simulation::new(config).unwrap();
//! sim.seed(Pattern::Pillars).unwrap();
//!
//! let running = sim.start().unwrap();
//! for _ in 0..3 {
//!     running.sync_frame().unwrap();
//! }
//! assert!(running.wait_for_generation(3, Duration::from_secs(5)));
//! let stats = running.shutdown();
//! assert_eq!(stats.steps_recorded, 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod brush;
pub mod config;
pub mod engine;
pub mod error;
pub mod pacing;
pub mod sim_loop;

// Re-export the kernel
pub use lifegrid_core as core;
pub use lifegrid_core::{FrameTrigger, Grid, GridStore, Pattern, ResizeOutcome};

// Re-export commonly used types
pub use brush::{line, Line, Stroke, StrokeIntent};
pub use config::EngineConfig;
pub use engine::{GridControl, RunningSimulation, Simulation};
pub use error::{ConfigError, EngineError, EngineResult};
pub use pacing::FramePacer;
pub use sim_loop::{SimulationLoop, StepStats, StepStatsAccumulator};
