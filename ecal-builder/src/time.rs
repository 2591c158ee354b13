use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TimeStamp(Instant);

impl TimeStamp {
    /// Get a new timestamp for "now"
    pub fn now() -> Self {
        TimeStamp(Instant::now())
    }

    /// Returns the elapsed [`Duration`] since the timestamp.
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    /// Get elapsed milliseconds since this timestamp
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
