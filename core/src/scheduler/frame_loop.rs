//! Consumer side of the redraw signal

use std::sync::mpsc::Receiver;
use std::time::Instant;

use tracing::{debug, trace, warn};

use super::signal::{LoopEvent, RedrawGate};
use super::stats::FrameStats;
use crate::frame::FrameCounter;

/// Loop lifecycle. The only transition is `Running -> Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Terminated,
}

/// Draws one frame for a given counter value.
///
/// Returning `Ok` means the frame was presented.
pub trait FrameRenderer {
    fn render_frame(&mut self, frame: FrameCounter) -> anyhow::Result<()>;
}

/// Owns the frame counter and the Running/Terminated state.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frame: FrameCounter,
    gate: RedrawGate,
    stats: FrameStats,
}

impl FrameLoop {
    pub fn new(gate: RedrawGate) -> Self {
        Self {
            state: LoopState::Running,
            frame: FrameCounter::ZERO,
            gate,
            stats: FrameStats::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames presented so far
    pub fn frame(&self) -> FrameCounter {
        self.frame
    }

    pub fn gate(&self) -> &RedrawGate {
        &self.gate
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Process one event and return the resulting state.
    ///
    /// Events arriving after termination are dropped. A redraw renders
    /// exactly one frame; the counter only advances if it presented.
    pub fn handle<R: FrameRenderer + ?Sized>(
        &mut self,
        event: LoopEvent,
        renderer: &mut R,
    ) -> LoopState {
        if self.state == LoopState::Terminated {
            trace!("Ignoring {:?} after termination", event);
            return self.state;
        }

        match event {
            LoopEvent::Quit => {
                debug!("Quit received after {} frames", self.frame);
                self.state = LoopState::Terminated;
            }
            LoopEvent::Redraw => {
                self.gate.release();
                let started = Instant::now();
                match renderer.render_frame(self.frame) {
                    Ok(()) => {
                        self.stats.record(started.elapsed());
                        self.frame.advance();
                        trace!("Presented frame {}", self.frame);
                    }
                    Err(e) => {
                        self.stats.record_failure();
                        warn!("Skipped frame {}: {:#}", self.frame, e);
                    }
                }
                self.stats.maybe_log(self.frame);
            }
            LoopEvent::Other => {}
        }

        self.state
    }

    /// Block on `events` until a quit signal or until every sender is gone.
    ///
    /// Returns the final frame counter.
    pub fn run<R: FrameRenderer + ?Sized>(
        &mut self,
        events: &Receiver<LoopEvent>,
        renderer: &mut R,
    ) -> FrameCounter {
        while self.is_running() {
            let Ok(event) = events.recv() else {
                debug!("Event source closed, stopping");
                self.state = LoopState::Terminated;
                break;
            };
            self.handle(event, renderer);
        }
        self.frame
    }
}
