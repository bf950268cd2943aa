//! # Simulation Loop
//!
//! Runs on its own thread, one generation per frame signal:
//! ```text
//! loop:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. WAIT                                                             │
//! │    └─ Block on the frame gate (the only suspension point)           │
//! │       └─ Closed -> exit                                             │
//! │                                                                     │
//! │ 2. STEP (GridStore lock held throughout)                            │
//! │    ├─ Copy live grid into the reused snapshot                       │
//! │    ├─ Apply B3/S23 to every cell, reading only the snapshot         │
//! │    └─ Bump the generation counter, wake generation waiters          │
//! │                                                                     │
//! │ 3. RECORD                                                           │
//! │    └─ Step timing into the shared accumulator                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lifegrid_core::{FrameGate, GateEvent, Grid, GridStore};
use parking_lot::Mutex;

/// Timing of a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Generation produced by the step.
    pub generation: u64,
    /// Wall time of the step in microseconds, lock wait included.
    pub step_us: u64,
}

/// Accumulator for step statistics.
#[derive(Clone, Debug)]
pub struct StepStatsAccumulator {
    /// Total steps recorded.
    pub steps_recorded: u64,
    /// Sum of step times.
    pub total_us_sum: u64,
    /// Min step time.
    pub min_step_us: u64,
    /// Max step time.
    pub max_step_us: u64,
    /// Steps that exceeded the budget.
    pub steps_over_budget: u64,
    /// Budget a step is measured against.
    pub budget_us: u64,
    /// Generation of the most recent step.
    pub last_generation: u64,
}

impl StepStatsAccumulator {
    /// Creates an empty accumulator measuring against `budget`.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            steps_recorded: 0,
            total_us_sum: 0,
            min_step_us: u64::MAX,
            max_step_us: 0,
            steps_over_budget: 0,
            budget_us: duration_us(budget),
            last_generation: 0,
        }
    }

    /// Records a step's statistics. Returns true if it was over budget.
    pub fn record(&mut self, stats: StepStats) -> bool {
        self.steps_recorded += 1;
        self.total_us_sum = self.total_us_sum.saturating_add(stats.step_us);
        self.min_step_us = self.min_step_us.min(stats.step_us);
        self.max_step_us = self.max_step_us.max(stats.step_us);
        self.last_generation = stats.generation;

        let over = stats.step_us > self.budget_us;
        if over {
            self.steps_over_budget += 1;
        }
        over
    }

    /// Returns average step time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_step_ms(&self) -> f64 {
        if self.steps_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.steps_recorded as f64) / 1000.0
    }

    /// Returns the fraction of steps over budget.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.steps_recorded == 0 {
            return 0.0;
        }
        self.steps_over_budget as f64 / self.steps_recorded as f64
    }
}

impl Default for StepStatsAccumulator {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl fmt::Display for StepStatsAccumulator {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ STEP STATISTICS ────────────────────────────────────┐")?;
        writeln!(f, "│ Steps Recorded:   {}", self.steps_recorded)?;
        writeln!(f, "│ Last Generation:  {}", self.last_generation)?;
        if self.steps_recorded > 0 {
            writeln!(f, "│ Average Step:     {:.3} ms", self.avg_step_ms())?;
            writeln!(f, "│ Min Step:         {:.3} ms", self.min_step_us as f64 / 1000.0)?;
            writeln!(f, "│ Max Step:         {:.3} ms", self.max_step_us as f64 / 1000.0)?;
        }
        writeln!(f, "│ Budget:           {:.3} ms", self.budget_us as f64 / 1000.0)?;
        writeln!(
            f,
            "│ Over Budget:      {} steps ({:.1}%)",
            self.steps_over_budget,
            self.over_budget_ratio() * 100.0
        )?;
        write!(f, "└──────────────────────────────────────────────────────┘")
    }
}

fn duration_us(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// The background step loop.
///
/// Owns the receiving end of the frame signal and the reusable snapshot
/// buffer; shares the store and the statistics with the consumer.
pub struct SimulationLoop {
    store: Arc<GridStore>,
    gate: FrameGate,
    /// Scratch copy of the previous generation, reused across steps.
    snapshot: Grid,
    stats: Arc<Mutex<StepStatsAccumulator>>,
}

impl SimulationLoop {
    /// Creates a loop over `store`, woken by `gate`.
    #[must_use]
    pub fn new(store: Arc<GridStore>, gate: FrameGate, budget: Duration) -> Self {
        let snapshot = store.snapshot();
        Self {
            store,
            gate,
            snapshot,
            stats: Arc::new(Mutex::new(StepStatsAccumulator::new(budget))),
        }
    }

    /// Shared handle to the step statistics.
    #[must_use]
    pub fn stats_handle(&self) -> Arc<Mutex<StepStatsAccumulator>> {
        Arc::clone(&self.stats)
    }

    /// Computes one generation and records its timing.
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&mut self) -> StepStats {
        let start = Instant::now();
        let generation = self.store.advance(&mut self.snapshot);
        let stats = StepStats {
            generation,
            step_us: duration_us(start.elapsed()),
        };

        let mut accumulator = self.stats.lock();
        if accumulator.record(stats) {
            tracing::warn!(
                "generation {} exceeded step budget: {:.2}ms (budget: {:.2}ms)",
                generation,
                stats.step_us as f64 / 1000.0,
                accumulator.budget_us as f64 / 1000.0
            );
        }
        stats
    }

    /// Waits for frame signals and steps once per signal until the gate
    /// closes.
    pub fn run(mut self) {
        tracing::debug!("simulation loop started");
        while self.gate.wait() == GateEvent::Frame {
            let stats = self.step();
            tracing::trace!(
                generation = stats.generation,
                step_us = stats.step_us,
                "step"
            );
        }
        tracing::debug!(
            "simulation loop stopped after {} steps",
            self.stats.lock().steps_recorded
        );
    }
}
