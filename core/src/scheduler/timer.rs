//! Redraw timer thread

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::signal::{LoopEvent, RedrawGate, SignalSink};

/// Tick counts reported when the timer stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerStats {
    /// Redraw signals delivered to the sink
    pub posted: u64,
    /// Ticks dropped because a redraw was still pending
    pub skipped: u64,
}

/// Handle to the redraw timer thread.
///
/// Dropping the handle stops the thread and joins it.
pub struct TickTimer {
    interval: Duration,
    /// Dropped to wake and stop the thread (Option to allow explicit drop before join)
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<TimerStats>>,
}

impl TickTimer {
    /// Spawn a thread that posts [`LoopEvent::Redraw`] to `sink` every `interval`.
    ///
    /// Deadlines are fixed-rate (`start + n * interval`). A tick is skipped
    /// while `gate` reports a redraw still pending. The thread exits on its
    /// own once the sink is closed.
    pub fn start<S: SignalSink>(
        interval: Duration,
        sink: S,
        gate: RedrawGate,
    ) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("redraw-timer".into())
            .spawn(move || run_timer(interval, &sink, &gate, &stop_rx))?;

        debug!("Redraw timer started ({:?} interval)", interval);
        Ok(Self {
            interval,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check if the timer thread is still running
    pub fn is_alive(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stop the thread and return its tick counts.
    pub fn stop(mut self) -> TimerStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> TimerStats {
        // Sender first: the thread's recv_timeout() returns Disconnected.
        drop(self.stop_tx.take());

        let Some(handle) = self.handle.take() else {
            return TimerStats::default();
        };
        match handle.join() {
            Ok(stats) => {
                debug!(
                    "Redraw timer stopped: posted={}, skipped={}",
                    stats.posted, stats.skipped
                );
                stats
            }
            Err(_) => {
                tracing::warn!("Redraw timer thread panicked");
                TimerStats::default()
            }
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_timer<S: SignalSink>(
    interval: Duration,
    sink: &S,
    gate: &RedrawGate,
    stop_rx: &mpsc::Receiver<()>,
) -> TimerStats {
    let mut stats = TimerStats::default();
    let mut deadline = Instant::now() + interval;

    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        if gate.try_arm() {
            if sink.post(LoopEvent::Redraw).is_err() {
                debug!("Redraw timer exiting (receiver closed)");
                break;
            }
            stats.posted += 1;
        } else {
            stats.skipped += 1;
            trace!("Redraw still pending, skipping tick");
        }

        deadline += interval;
        let now = Instant::now();
        if now.saturating_duration_since(deadline) > interval {
            trace!("Redraw timer behind by {:?}, resyncing", now - deadline);
            deadline = now + interval;
        }
    }

    stats
}
