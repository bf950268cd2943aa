//! # LIFEGRID Headless Driver
//!
//! Runs the engine without a display: paces frames like a renderer would,
//! logs progress, and prints step statistics on exit.
//!
//! ## Usage
//!
//! ```bash
//! lifegrid_headless --config lifegrid.toml --frames 200 --fps 60 --pattern diamonds
//! RUST_LOG=lifegrid=trace lifegrid_headless -n 20
//! ```

use std::process::ExitCode;
use std::time::Instant;

use lifegrid::core::DEFAULT_RANDOM_ONE_IN;
use lifegrid::{EngineConfig, EngineResult, FramePacer, Pattern, Simulation};
use tracing_subscriber::EnvFilter;

/// Frames to run when `--frames` is not given.
const DEFAULT_FRAMES: u64 = 100;

/// Command line options.
struct Options {
    config: Option<String>,
    frames: u64,
    fps: Option<u32>,
    pattern: Option<String>,
}

fn print_usage() {
    println!("Usage: lifegrid_headless [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>      TOML engine configuration");
    println!("  -n, --frames <NUM>       Frames to run (default: {DEFAULT_FRAMES})");
    println!("  -f, --fps <RATE>         Frame rate, 1..=200 (default: from config)");
    println!("  -p, --pattern <NAME>     Preset to seed before starting");
    println!("  -h, --help               Show this help");
}

/// Parses a flag value, warning and returning `None` if it is missing or
/// malformed.
fn flag_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Option<T> {
    let parsed = value.and_then(|v| v.parse().ok());
    if parsed.is_none() {
        tracing::warn!("invalid or missing value for {flag}: {value:?}, using default");
    }
    parsed
}

/// Parses arguments. Returns `None` when only help was requested.
fn parse_args() -> Option<Options> {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        config: None,
        frames: DEFAULT_FRAMES,
        fps: None,
        pattern: None,
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--config" | "-c" => {
                options.config = value.cloned();
                i += 1;
            }
            "--frames" | "-n" => {
                options.frames = flag_value(&args[i], value).unwrap_or(DEFAULT_FRAMES);
                i += 1;
            }
            "--fps" | "-f" => {
                options.fps = flag_value(&args[i], value);
                i += 1;
            }
            "--pattern" | "-p" => {
                options.pattern = value.cloned();
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                return None;
            }
            other => tracing::warn!("ignoring unknown argument {other}"),
        }
        i += 1;
    }
    Some(options)
}

fn run(options: Options) -> EngineResult<()> {
    let mut config = match &options.config {
        Some(path) => EngineConfig::from_toml_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(fps) = options.fps {
        config.fps = fps;
    }

    let mut pacer = FramePacer::new(config.fps);
    let mut sim = Simulation::new(config)?;

    if let Some(name) = &options.pattern {
        sim.seed(name.parse::<Pattern>()?)?;
    } else if sim.population() == 0 {
        sim.seed(Pattern::Random { one_in: DEFAULT_RANDOM_ONE_IN })?;
    }

    let (height, width) = sim.dimensions();
    tracing::info!(
        "running {} frames on {height}x{width} at {} fps, {} live cells",
        options.frames,
        pacer.fps(),
        sim.population()
    );

    let running = sim.start()?;
    let started = Instant::now();
    for frame in 1..=options.frames {
        pacer.wait_next();
        running.sync_frame()?;
        if frame % u64::from(pacer.fps()) == 0 {
            tracing::info!(
                "generation {}, population {}",
                running.generation(),
                running.population()
            );
        }
    }

    // The last signalled step may still be in flight.
    if !running.wait_for_generation(options.frames, pacer.frame_interval() * 10) {
        tracing::warn!(
            "last step did not finish in time, stopping at generation {}",
            running.generation()
        );
    }
    let elapsed = started.elapsed();
    let final_population = running.population();
    let stats = running.shutdown();

    println!();
    println!("{stats}");
    println!(
        "Final population {final_population} after {:.2}s",
        elapsed.as_secs_f64()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(options) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
