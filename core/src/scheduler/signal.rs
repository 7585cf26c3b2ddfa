//! Signals passed from the timer thread to the frame loop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

/// Event consumed by [`super::FrameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// The redraw interval elapsed
    Redraw,
    /// Window closed or Escape pressed
    Quit,
    /// Anything else the platform delivers; ignored
    Other,
}

/// The receiving side of a [`SignalSink`] is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("signal receiver closed")]
pub struct SinkClosed;

/// Destination for timer signals.
///
/// Implemented for `mpsc::Sender` (tests, headless runs) and by the windowed
/// app for its event loop proxy.
pub trait SignalSink: Send + 'static {
    fn post(&self, event: LoopEvent) -> Result<(), SinkClosed>;
}

impl SignalSink for mpsc::Sender<LoopEvent> {
    fn post(&self, event: LoopEvent) -> Result<(), SinkClosed> {
        self.send(event).map_err(|_| SinkClosed)
    }
}

/// Shared "redraw pending" flag.
///
/// The timer arms it before posting; the frame loop releases it when the
/// redraw is consumed. While armed, further ticks are skipped.
#[derive(Debug, Clone, Default)]
pub struct RedrawGate(Arc<AtomicBool>);

impl RedrawGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a redraw as pending. Returns `false` if one already was.
    pub fn try_arm(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
