//! # Frame Pacing
//!
//! Consumer-side tick source. The display decides how fast the simulation
//! runs: one `sync_frame()` per tick.

use std::thread;
use std::time::{Duration, Instant};

/// Slowest allowed frame rate.
pub const MIN_FPS: u32 = 1;

/// Fastest allowed frame rate.
pub const MAX_FPS: u32 = 200;

/// Frame rate at startup.
pub const DEFAULT_FPS: u32 = 10;

/// Fixed-rate tick source with a user-adjustable frame rate.
#[derive(Clone, Debug)]
pub struct FramePacer {
    fps: u32,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    /// Creates a pacer; `fps` is clamped to `MIN_FPS..=MAX_FPS`.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            next_deadline: None,
        }
    }

    /// Current frame rate.
    #[inline]
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }

    /// Sets the frame rate, clamped to `MIN_FPS..=MAX_FPS`.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
    }

    /// One frame per second faster, up to `MAX_FPS`.
    pub fn faster(&mut self) -> u32 {
        self.set_fps(self.fps.saturating_add(1));
        self.fps
    }

    /// One frame per second slower, down to `MIN_FPS`.
    pub fn slower(&mut self) -> u32 {
        self.set_fps(self.fps.saturating_sub(1));
        self.fps
    }

    /// Time between two ticks at the current rate.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Sleeps until the next tick and returns how long it slept.
    ///
    /// The first call returns immediately. A consumer that falls more than a
    /// frame behind is resynchronised instead of bursting to catch up.
    pub fn wait_next(&mut self) -> Duration {
        let now = Instant::now();
        let interval = self.frame_interval();
        let deadline = match self.next_deadline {
            Some(deadline) if deadline + interval >= now => deadline,
            _ => now,
        };

        let slept = deadline.saturating_duration_since(now);
        if !slept.is_zero() {
            thread::sleep(slept);
        }
        self.next_deadline = Some(deadline + interval);
        slept
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
