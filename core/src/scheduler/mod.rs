//! Fixed-rate redraw scheduling
//!
//! A timer thread produces redraw signals; the main thread consumes them and
//! renders one frame per signal.
//!
//! ```text
//! Timer Thread                     Main Thread
//!     │                                │
//! [deadline]                           │
//!     │ gate.try_arm()                 │
//! [post Redraw]──────(sink)─────────►[FrameLoop::handle]
//!     │                              [gate.release()]
//!     │                              [render_frame]
//!     │                              [counter += 1]
//! ```
//!
//! The [`RedrawGate`] keeps at most one redraw in flight, so a slow frame
//! causes skipped ticks instead of a growing queue.

mod frame_loop;
mod signal;
mod stats;
mod timer;

pub use frame_loop::{FrameLoop, FrameRenderer, LoopState};
pub use signal::{LoopEvent, RedrawGate, SignalSink, SinkClosed};
pub use stats::{FRAME_TIME_HISTORY_SIZE, FrameStats};
pub use timer::{TickTimer, TimerStats};

#[cfg(test)]
mod tests;
