//! # Engine Lifecycle
//!
//! ```text
//!   Simulation ──start()──> RunningSimulation ──shutdown() / drop──> stopped
//!     (idle)                  (loop thread)
//! ```
//!
//! Both states expose the same grid surface through [`GridControl`]. Starting
//! consumes the idle engine, so a second loop can never be spawned over the
//! same store.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lifegrid_core::{
    frame_signal, FrameTrigger, GateCloser, Grid, GridResult, GridStore, Pattern, ResizeOutcome,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::sim_loop::{SimulationLoop, StepStatsAccumulator};

/// Name of the simulation thread.
const SIM_THREAD_NAME: &str = "lifegrid-sim";

/// Grid operations shared by the idle and running engine.
pub struct GridControl {
    store: Arc<GridStore>,
    config: EngineConfig,
    rng: StdRng,
}

impl GridControl {
    /// Reads a cell. Out of range reads as dead.
    #[inline]
    #[must_use]
    pub fn get_cell(&self, row: isize, col: isize) -> bool {
        self.store.get_cell(row, col)
    }

    /// Writes a cell. Out of range is ignored.
    #[inline]
    pub fn set_cell(&self, row: isize, col: isize, alive: bool) {
        self.store.set_cell(row, col, alive);
    }

    /// Kills every cell and resets the generation counter.
    pub fn reset_map(&self) {
        self.store.clear();
    }

    /// Grows the grid, keeping existing cells. Shrinking axes are ignored, and
    /// everything is ignored when dimensions are locked.
    pub fn resize(&self, height: usize, width: usize) -> ResizeOutcome {
        if self.config.lock_dimensions {
            tracing::debug!("dimensions locked, ignoring resize to {height}x{width}");
            return ResizeOutcome::default();
        }
        self.store.resize(height, width)
    }

    /// Like [`resize`](Self::resize) but reports a shrink request as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShrinkRejected`](lifegrid_core::GridError::ShrinkRejected)
    /// if either dimension is smaller than the current one.
    pub fn try_resize(&self, height: usize, width: usize) -> GridResult<ResizeOutcome> {
        if self.config.lock_dimensions {
            tracing::debug!("dimensions locked, ignoring resize to {height}x{width}");
            return Ok(ResizeOutcome::default());
        }
        self.store.try_resize(height, width)
    }

    /// Applies a preset, with its parameters taken from the configuration.
    ///
    /// # Errors
    ///
    /// Returns the preset's parameter error; the grid is untouched then.
    pub fn seed(&mut self, pattern: Pattern) -> GridResult<()> {
        let pattern = self.config.configure(pattern);
        self.store.seed(pattern, &mut self.rng)?;
        tracing::debug!("seeded {pattern}");
        Ok(())
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.store.population()
    }

    /// Generations computed since start-up or the last reset.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    /// `(height, width)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.store.dimensions()
    }

    /// Owned copy of the current grid, for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Grid {
        self.store.snapshot()
    }

    /// The shared store, for readers on other threads.
    #[must_use]
    pub fn store(&self) -> &Arc<GridStore> {
        &self.store
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Idle engine: grid built and editable, no loop thread yet.
pub struct Simulation {
    control: GridControl,
}

impl Simulation {
    /// Builds an idle engine.
    ///
    /// Uses `rng_seed` from the configuration, or a clock-derived seed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for an invalid configuration and
    /// [`EngineError::Grid`] if the initial preset cannot be applied.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let seed = config.rng_seed.unwrap_or_else(clock_seed);
        if config.rng_seed.is_none() {
            tracing::info!("using clock-derived rng seed {seed}");
        }
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Builds an idle engine around an explicit random source.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_rng(config: EngineConfig, rng: StdRng) -> EngineResult<Self> {
        config.validate()?;
        let store = Arc::new(GridStore::new(config.height, config.width)?);
        let initial = config.initial_pattern()?;

        let mut control = GridControl { store, config, rng };
        if let Some(pattern) = initial {
            control.seed(pattern)?;
        }

        tracing::info!(
            "grid {}x{} ready, {} live cells",
            control.config.height,
            control.config.width,
            control.population()
        );
        Ok(Self { control })
    }

    /// Spawns the simulation loop.
    ///
    /// The loop computes nothing until the first
    /// [`sync_frame`](RunningSimulation::sync_frame).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Spawn`] if the thread cannot be created.
    pub fn start(self) -> EngineResult<RunningSimulation> {
        let control = self.control;
        let (trigger, gate, closer) = frame_signal();
        let sim_loop = SimulationLoop::new(
            Arc::clone(&control.store),
            gate,
            control.config.step_budget(),
        );
        let stats = sim_loop.stats_handle();

        let thread = thread::Builder::new()
            .name(SIM_THREAD_NAME.into())
            .spawn(move || sim_loop.run())
            .map_err(EngineError::Spawn)?;

        tracing::info!("simulation started");
        Ok(RunningSimulation {
            control,
            trigger,
            closer,
            stats,
            thread: Some(thread),
        })
    }
}

impl Deref for Simulation {
    type Target = GridControl;

    fn deref(&self) -> &Self::Target {
        &self.control
    }
}

impl DerefMut for Simulation {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.control
    }
}

/// Engine with a live loop thread.
///
/// Dropping it stops the loop and joins the thread.
pub struct RunningSimulation {
    control: GridControl,
    trigger: FrameTrigger,
    closer: GateCloser,
    stats: Arc<Mutex<StepStatsAccumulator>>,
    thread: Option<JoinHandle<()>>,
}

impl RunningSimulation {
    /// Lets the loop compute exactly one generation.
    ///
    /// Blocks while the previous generation is still being computed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Stopped`] if the loop is no longer running.
    pub fn sync_frame(&self) -> EngineResult<()> {
        self.trigger.sync_frame()?;
        Ok(())
    }

    /// Signals a frame only if the loop is idle; returns whether it was taken.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Stopped`] if the loop is no longer running.
    pub fn try_sync_frame(&self) -> EngineResult<bool> {
        Ok(self.trigger.try_sync_frame()?)
    }

    /// A trigger for signalling frames from another thread.
    #[must_use]
    pub fn trigger(&self) -> FrameTrigger {
        self.trigger.clone()
    }

    /// Copy of the step statistics so far.
    #[must_use]
    pub fn stats(&self) -> StepStatsAccumulator {
        self.stats.lock().clone()
    }

    /// Blocks until `target` generations exist or `timeout` elapses.
    #[must_use]
    pub fn wait_for_generation(&self, target: u64, timeout: Duration) -> bool {
        self.control.store.wait_for_generation(target, timeout)
    }

    /// Returns true while the loop thread is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the loop, joins the thread and returns the final statistics.
    #[must_use = "final step statistics are returned"]
    pub fn shutdown(mut self) -> StepStatsAccumulator {
        self.stop();
        self.stats()
    }

    fn stop(&mut self) {
        self.closer.close();
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::warn!("simulation thread panicked");
            } else {
                tracing::info!("simulation stopped at generation {}", self.generation());
            }
        }
    }
}

impl Deref for RunningSimulation {
    type Target = GridControl;

    fn deref(&self) -> &Self::Target {
        &self.control
    }
}

impl DerefMut for RunningSimulation {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.control
    }
}

impl Drop for RunningSimulation {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()).rotate_left(32)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EngineConfig {
        EngineConfig {
            height: 8,
            width: 10,
            rng_seed: Some(3),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_idle_edits() {
        let sim = Simulation::new(small_config()).unwrap();
        assert_eq!(sim.dimensions(), (8, 10));
        assert_eq!(sim.population(), 0);

        sim.set_cell(2, 3, true);
        assert!(sim.get_cell(2, 3));
        sim.set_cell(99, -1, true);
        assert_eq!(sim.population(), 1);

        sim.reset_map();
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn test_initial_pattern_applied() {
        let config = EngineConfig {
            initial_pattern: Some("edges".into()),
            ..small_config()
        };
        let sim = Simulation::new(config).unwrap();
        // 2 full rows + 2 columns minus the shared corners
        assert_eq!(sim.population(), 2 * 10 + 2 * 8 - 4);
    }

    #[test]
    fn test_seed_uses_configured_parameters() {
        let config = EngineConfig {
            random_one_in: 1,
            ..small_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.seed(Pattern::Random { one_in: 1_000 }).unwrap();
        assert_eq!(sim.population(), 80);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            width: 0,
            ..small_config()
        };
        assert!(matches!(Simulation::new(config.clone()), Err(EngineError::Config(_))));
        assert!(matches!(
            Simulation::with_rng(config, StdRng::seed_from_u64(1)),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_resize_respects_lock() {
        let locked = Simulation::new(EngineConfig {
            lock_dimensions: true,
            ..small_config()
        })
        .unwrap();
        assert!(!locked.resize(20, 20).grew());
        assert_eq!(locked.dimensions(), (8, 10));

        let free = Simulation::new(small_config()).unwrap();
        assert!(free.resize(20, 20).grew());
        assert_eq!(free.dimensions(), (20, 20));
        assert!(free.try_resize(4, 40).is_err());
    }

    #[test]
    fn test_start_and_shutdown() {
        let sim = Simulation::new(small_config()).unwrap();
        let running = sim.start().unwrap();
        assert!(running.is_running());

        running.sync_frame().unwrap();
        assert!(running.wait_for_generation(1, Duration::from_secs(5)));

        let stats = running.shutdown();
        assert_eq!(stats.steps_recorded, 1);
        assert_eq!(stats.last_generation, 1);
    }

    #[test]
    fn test_trigger_after_shutdown_is_stopped() {
        let running = Simulation::new(small_config()).unwrap().start().unwrap();
        let trigger = running.trigger();
        drop(running);
        assert!(trigger.sync_frame().is_err());
    }
}
