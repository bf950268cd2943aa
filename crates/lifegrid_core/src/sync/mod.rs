//! # Frame Synchronization
//!
//! The display sets the pace, the simulation guarantees correctness.
//!
//! ## The Problem
//!
//! ```text
//! Thread 1 (Simulation):  WRITE generation N+1
//! Thread 2 (Render):      READ cells for frame N
//!
//! Free-running simulation: generations skipped between frames
//! Unbounded queue:         render races ahead of computation
//! ```
//!
//! ## The Solution: Rendezvous Handshake
//!
//! ```text
//! Render:      ... frame ──sync_frame()──┐        ┌── frame ──sync_frame() (blocks)
//!                                        ▼        │
//! Simulation:  wait() ──────────────── Frame ── step N+1 ── wait()
//! ```
//!
//! A capacity-0 channel: each signal is handed over directly, never queued.
//! A sender that arrives while a step is running blocks until the loop is back
//! at `wait()`, which is the backpressure.

mod frame_signal;

pub use frame_signal::{frame_signal, FrameGate, FrameTrigger, GateCloser, GateEvent, SignalClosed};
