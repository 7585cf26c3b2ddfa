//! Frame timing statistics

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::frame::FrameCounter;

/// Number of frame times kept for the rolling average
pub const FRAME_TIME_HISTORY_SIZE: usize = 120;

/// Rolling render-time statistics, logged once per second at debug level.
#[derive(Debug, Clone)]
pub struct FrameStats {
    /// Render times in milliseconds, oldest first
    frame_times: VecDeque<f32>,
    /// Frames that failed to render since the last log
    failures: u32,
    /// Frames presented since the last log
    presented: u32,
    last_log_time: Instant,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(FRAME_TIME_HISTORY_SIZE),
            failures: 0,
            presented: 0,
            last_log_time: Instant::now(),
        }
    }

    /// Record a presented frame's render time.
    pub fn record(&mut self, elapsed: Duration) {
        self.frame_times.push_back(elapsed.as_secs_f32() * 1000.0);
        while self.frame_times.len() > FRAME_TIME_HISTORY_SIZE {
            self.frame_times.pop_front();
        }
        self.presented += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn len(&self) -> usize {
        self.frame_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_times.is_empty()
    }

    pub fn average_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn max_ms(&self) -> f32 {
        self.frame_times.iter().copied().fold(0.0, f32::max)
    }

    /// Log statistics if at least a second has passed since the last log
    pub fn maybe_log(&mut self, frame: FrameCounter) {
        let elapsed = self.last_log_time.elapsed();
        if elapsed.as_secs() >= 1 {
            debug!(
                "frame={} presented={} failed={} avg_render={:.2}ms max_render={:.2}ms",
                frame,
                self.presented,
                self.failures,
                self.average_ms(),
                self.max_ms()
            );
            self.presented = 0;
            self.failures = 0;
            self.last_log_time = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut stats = FrameStats::new();
        for _ in 0..(FRAME_TIME_HISTORY_SIZE + 30) {
            stats.record(Duration::from_millis(2));
        }
        assert_eq!(stats.len(), FRAME_TIME_HISTORY_SIZE);
    }

    #[test]
    fn test_average_and_max() {
        let mut stats = FrameStats::new();
        assert_eq!(stats.average_ms(), 0.0);
        stats.record(Duration::from_millis(2));
        stats.record(Duration::from_millis(4));
        assert!((stats.average_ms() - 3.0).abs() < 1e-3);
        assert!((stats.max_ms() - 4.0).abs() < 1e-3);
    }
}
