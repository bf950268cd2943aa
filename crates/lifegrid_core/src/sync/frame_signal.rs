//! # Frame Signal
//!
//! Zero-payload rendezvous between the consumer (sending end) and the
//! simulation loop (receiving end), plus a close channel so the loop can be
//! stopped while consumers still hold triggers.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐   bounded(0)   ┌────────────┐
//!   │ FrameTrigger │ ─────────────> │            │
//!   │  (cloneable) │                │ FrameGate  │ ── wait() -> Frame | Closed
//!   └──────────────┘                │            │
//!   ┌──────────────┐   close        │            │
//!   │  GateCloser  │ ─────────────> │            │
//!   └──────────────┘                └────────────┘
//! ```

use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use thiserror::Error;

/// The receiving side is gone: the simulation loop has stopped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("simulation loop is no longer receiving frame signals")]
pub struct SignalClosed;

/// What woke a waiting gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEvent {
    /// One frame signal: compute exactly one generation.
    Frame,
    /// The gate was closed or every trigger was dropped.
    Closed,
}

/// Creates a connected trigger, gate and closer.
#[must_use]
pub fn frame_signal() -> (FrameTrigger, FrameGate, GateCloser) {
    let (frame_tx, frame_rx) = bounded(0);
    let (close_tx, close_rx) = bounded(0);
    (
        FrameTrigger { frames: frame_tx },
        FrameGate {
            frames: frame_rx,
            close: close_rx,
        },
        GateCloser { close: Some(close_tx) },
    )
}

/// Sending end, owned by the consumer. Clones share the same gate.
#[derive(Clone, Debug)]
pub struct FrameTrigger {
    frames: Sender<()>,
}

impl FrameTrigger {
    /// Hands one frame signal to the simulation loop.
    ///
    /// Blocks until the loop is ready to receive, i.e. until the previous
    /// generation is finished.
    ///
    /// # Errors
    ///
    /// Returns [`SignalClosed`] if the loop has stopped.
    pub fn sync_frame(&self) -> Result<(), SignalClosed> {
        self.frames.send(()).map_err(|_| SignalClosed)
    }

    /// Hands over a frame signal only if the loop is waiting right now.
    ///
    /// Returns `Ok(false)` if the loop is still busy with a step; the frame is
    /// dropped rather than queued.
    ///
    /// # Errors
    ///
    /// Returns [`SignalClosed`] if the loop has stopped.
    pub fn try_sync_frame(&self) -> Result<bool, SignalClosed> {
        match self.frames.try_send(()) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(())) => Ok(false),
            Err(TrySendError::Disconnected(())) => Err(SignalClosed),
        }
    }
}

/// Receiving end, owned by the simulation loop.
#[derive(Debug)]
pub struct FrameGate {
    frames: Receiver<()>,
    close: Receiver<()>,
}

impl FrameGate {
    /// Blocks until a frame signal arrives or the gate is closed.
    ///
    /// This is the only suspension point of the simulation loop.
    #[must_use]
    pub fn wait(&self) -> GateEvent {
        select! {
            recv(self.frames) -> msg => match msg {
                Ok(()) => GateEvent::Frame,
                Err(_) => GateEvent::Closed,
            },
            recv(self.close) -> _ => GateEvent::Closed,
        }
    }
}

/// Closes the gate. Dropping the closer closes it too.
#[derive(Debug)]
pub struct GateCloser {
    close: Option<Sender<()>>,
}

impl GateCloser {
    /// Wakes the gate with [`GateEvent::Closed`]. Idempotent.
    pub fn close(&mut self) {
        self.close.take();
    }

    /// Returns true once [`close`](Self::close) was called.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.close.is_none()
    }
}
