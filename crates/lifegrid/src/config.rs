//! # Engine Configuration
//!
//! Loaded once at startup from TOML. Every key is optional:
//!
//! ```toml
//! height = 66            # rows
//! width = 160            # columns
//! fps = 10               # initial frame rate, 1..=200
//! random_one_in = 8      # Random Fill: 1 in N cells alive
//! diamond_density = 5    # Diamonds: bands per grid height
//! rng_seed = 42          # omit for a clock-derived seed
//! lock_dimensions = false
//! initial_pattern = "Random Fill"
//! step_budget_ms = 50    # omit to derive from fps
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use lifegrid_core::{Pattern, DEFAULT_DIAMOND_DENSITY, DEFAULT_RANDOM_ONE_IN};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::pacing::{DEFAULT_FPS, MAX_FPS, MIN_FPS};

/// Default grid height when no terminal size is known.
pub const DEFAULT_HEIGHT: usize = 66;

/// Default grid width when no terminal size is known.
pub const DEFAULT_WIDTH: usize = 160;

/// Configuration for the engine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Initial number of rows.
    pub height: usize,
    /// Initial number of columns.
    pub width: usize,
    /// Initial frame rate.
    pub fps: u32,
    /// Random Fill probability denominator.
    pub random_one_in: u32,
    /// Diamonds band count.
    pub diamond_density: usize,
    /// Seed for Random Fill; `None` derives one from the clock.
    pub rng_seed: Option<u64>,
    /// Ignore every resize request (fixed-size runs).
    pub lock_dimensions: bool,
    /// Preset applied when the engine is built.
    pub initial_pattern: Option<String>,
    /// Step duration above which a step counts as over budget.
    pub step_budget_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            fps: DEFAULT_FPS,
            random_one_in: DEFAULT_RANDOM_ONE_IN,
            diamond_density: DEFAULT_DIAMOND_DENSITY,
            rng_seed: None,
            lock_dimensions: false,
            initial_pattern: None,
            step_budget_ms: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// the [`validate`](Self::validate) errors otherwise.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, then the
    /// [`from_toml_str`](Self::from_toml_str) errors.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero dimensions, an fps outside
    /// `MIN_FPS..=MAX_FPS`, a zero random denominator or diamond density, or a
    /// zero step budget; [`ConfigError::Pattern`] for an unknown preset name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.height, self.width
            )));
        }
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::Invalid(format!(
                "fps must be in {MIN_FPS}..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.random_one_in == 0 {
            return Err(ConfigError::Invalid("random_one_in must be at least 1".into()));
        }
        if self.diamond_density == 0 {
            return Err(ConfigError::Invalid("diamond_density must be at least 1".into()));
        }
        if self.step_budget_ms == Some(0) {
            return Err(ConfigError::Invalid("step_budget_ms must be at least 1".into()));
        }
        self.initial_pattern()?;
        Ok(())
    }

    /// Fills a preset's parameters from this configuration.
    #[must_use]
    pub fn configure(&self, pattern: Pattern) -> Pattern {
        match pattern {
            Pattern::Random { .. } => Pattern::Random {
                one_in: self.random_one_in,
            },
            Pattern::Diamonds { .. } => Pattern::Diamonds {
                density: self.diamond_density,
            },
            other => other,
        }
    }

    /// The configured initial preset, with parameters applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if the name is not a known preset.
    pub fn initial_pattern(&self) -> Result<Option<Pattern>, ConfigError> {
        self.initial_pattern
            .as_deref()
            .map(|name| -> Result<Pattern, ConfigError> {
                Ok(self.configure(name.parse::<Pattern>()?))
            })
            .transpose()
    }

    /// Step duration above which a step is logged as slow.
    ///
    /// Defaults to one frame interval at the configured fps.
    #[must_use]
    pub fn step_budget(&self) -> Duration {
        match self.step_budget_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_secs(1) / self.fps.max(1),
        }
    }
}
