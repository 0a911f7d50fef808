use std::thread;
use std::time::{Duration, Instant};

/// Sleeps out the remainder of a fixed frame period
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    frame_started: Instant,
}

impl FramePacer {
    pub fn new(period_secs: f64) -> Self {
        Self {
            period: Duration::from_secs_f64(period_secs.max(0.0)),
            frame_started: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left in the current frame
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.frame_started))
    }

    /// Block until the frame period has passed, then start the next frame
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.frame_started = Instant::now();
    }
}
