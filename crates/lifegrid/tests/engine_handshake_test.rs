//! # Engine Handshake Integration Test
//!
//! Drives a real simulation thread through the public engine API and checks
//! the frame handshake: one generation per signal, nothing without signals,
//! consistent reads while stepping, and a clean stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use lifegrid::core::{step, GridError};
use lifegrid::{
    EngineConfig, EngineError, Grid, Pattern, RunningSimulation, Simulation, Stroke, StrokeIntent,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn config(height: usize, width: usize) -> EngineConfig {
    EngineConfig {
        height,
        width,
        rng_seed: Some(0x5EED),
        ..EngineConfig::default()
    }
}

fn start_with(sim: Simulation) -> RunningSimulation {
    sim.start().expect("simulation thread starts")
}

/// Test: N frame signals produce exactly N generations, each matching the
/// single-threaded reference step.
#[test]
fn test_n_signals_n_generations() {
    let mut sim = Simulation::new(config(24, 30)).unwrap();
    sim.seed(Pattern::Random { one_in: 3 }).unwrap();

    let mut expected = sim.snapshot();
    let running = start_with(sim);

    for n in 1..=25u64 {
        running.sync_frame().unwrap();
        assert!(running.wait_for_generation(n, TIMEOUT));
        expected = step(&expected);
        assert_eq!(running.snapshot(), expected, "generation {n}");
    }

    // No extra generations appear afterwards.
    thread::sleep(Duration::from_millis(30));
    assert_eq!(running.generation(), 25);
    assert_eq!(running.stats().steps_recorded, 25);
}

/// Test: without signals the loop never advances.
#[test]
fn test_no_signal_no_progress() {
    let mut sim = Simulation::new(config(16, 16)).unwrap();
    sim.seed(Pattern::Checkerboard).unwrap();
    let before = sim.snapshot();

    let running = start_with(sim);
    thread::sleep(Duration::from_millis(50));

    assert!(running.is_running());
    assert_eq!(running.generation(), 0);
    assert_eq!(running.snapshot(), before);
    assert!(!running.wait_for_generation(1, Duration::from_millis(20)));
}

/// Test: shutdown joins the loop, and later signals report `Stopped`.
#[test]
fn test_shutdown_then_signal_is_stopped() {
    let running = start_with(Simulation::new(config(8, 8)).unwrap());
    let trigger = running.trigger();

    trigger.sync_frame().unwrap();
    assert!(running.wait_for_generation(1, TIMEOUT));

    let stats = running.shutdown();
    assert_eq!(stats.steps_recorded, 1);

    let err = trigger.sync_frame().unwrap_err();
    assert!(matches!(EngineError::from(err), EngineError::Stopped));
    assert!(trigger.try_sync_frame().is_err());
}

/// Test: dropping the running engine stops the loop as well.
#[test]
fn test_drop_stops_loop() {
    let running = start_with(Simulation::new(config(8, 8)).unwrap());
    let store = Arc::clone(running.store());
    let trigger = running.trigger();
    drop(running);

    assert!(trigger.sync_frame().is_err());
    assert_eq!(store.generation(), 0);
}

/// Test: edits, strokes, seeding and resets while running are visible at once.
#[test]
fn test_edits_while_running() {
    let mut running = start_with(Simulation::new(config(12, 12)).unwrap());

    running.set_cell(5, 5, true);
    assert!(running.get_cell(5, 5));

    let mut stroke = Stroke::begin(running.store(), (0, 0), StrokeIntent::Add);
    stroke.extend_to((0, 11));
    assert_eq!(running.population(), 13);

    running.seed(Pattern::Edges).unwrap();
    assert!(running.get_cell(11, 11));

    running.sync_frame().unwrap();
    assert!(running.wait_for_generation(1, TIMEOUT));

    running.reset_map();
    assert_eq!(running.population(), 0);
    assert_eq!(running.generation(), 0);

    running.set_cell(-1, 0, true);
    running.set_cell(0, 12, true);
    assert_eq!(running.population(), 0);
}

/// Test: a stepping generation is never observed half-written.
#[test]
fn test_reads_never_tear() {
    let mut sim = Simulation::new(config(9, 9)).unwrap();
    for col in 3..6 {
        sim.set_cell(4, col, true);
    }
    let horizontal = sim.snapshot();
    let vertical = step(&horizontal);
    let running = start_with(sim);

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let store = Arc::clone(running.store());
        let done = Arc::clone(&done);
        let (horizontal, vertical) = (horizontal.clone(), vertical.clone());
        thread::spawn(move || {
            let mut reads = 0u32;
            let mut buffer: Grid = store.snapshot();
            while !done.load(Ordering::Acquire) {
                store.copy_into(&mut buffer);
                assert!(buffer == horizontal || buffer == vertical);
                reads += 1;
            }
            reads
        })
    };

    for n in 1..=200 {
        running.sync_frame().unwrap();
        assert!(running.wait_for_generation(n, TIMEOUT));
    }
    done.store(true, Ordering::Release);

    assert!(reader.join().unwrap() > 0);
    assert_eq!(running.snapshot(), horizontal);
}

/// Test: a trigger handed to another thread drives the loop.
#[test]
fn test_trigger_from_render_thread() {
    let running = start_with(Simulation::new(config(10, 10)).unwrap());
    let trigger = running.trigger();

    let render = thread::spawn(move || {
        for _ in 0..10 {
            trigger.sync_frame().unwrap();
        }
    });
    render.join().unwrap();

    assert!(running.wait_for_generation(10, TIMEOUT));
    thread::sleep(Duration::from_millis(20));
    assert_eq!(running.generation(), 10);
}

/// Test: `try_sync_frame` hands over a frame once the loop is waiting.
#[test]
fn test_try_sync_frame_eventually_accepted() {
    let running = start_with(Simulation::new(config(6, 6)).unwrap());

    let deadline = Instant::now() + TIMEOUT;
    while !running.try_sync_frame().unwrap() {
        assert!(Instant::now() < deadline, "loop never became ready");
        thread::yield_now();
    }
    assert!(running.wait_for_generation(1, TIMEOUT));
}

/// Test: locked dimensions ignore every resize; unlocked grow keeps cells.
#[test]
fn test_resize_while_running() {
    let locked = start_with(
        Simulation::new(EngineConfig {
            lock_dimensions: true,
            ..config(8, 8)
        })
        .unwrap(),
    );
    assert!(!locked.resize(30, 30).grew());
    assert_eq!(locked.dimensions(), (8, 8));

    let running = start_with(Simulation::new(config(8, 8)).unwrap());
    running.set_cell(7, 7, true);
    let outcome = running.resize(10, 6);
    assert_eq!(outcome.rows_added, 2);
    assert!(outcome.shrink_ignored);
    assert_eq!(running.dimensions(), (10, 8));
    assert!(running.get_cell(7, 7));

    assert!(matches!(
        running.try_resize(4, 8),
        Err(GridError::ShrinkRejected { .. })
    ));

    running.sync_frame().unwrap();
    assert!(running.wait_for_generation(1, TIMEOUT));
}
