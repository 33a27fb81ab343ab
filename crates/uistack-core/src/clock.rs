#![forbid(unsafe_code)]

//! Frame delta source for hosts driving `update(dt)`.
//!
//! Uses `web_time::Instant`, which is `std::time::Instant` on native
//! targets and `performance.now()` on wasm.

use std::time::Duration;

use web_time::Instant;

/// Measures the time elapsed between consecutive frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: Duration,
}

impl FrameClock {
    /// Default upper bound for a single frame delta.
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            max_dt: Self::DEFAULT_MAX_DT,
        }
    }

    /// Clamp each delta to `max_dt` so a stalled host does not skip whole
    /// transitions in one tick.
    #[must_use]
    pub fn with_max_dt(mut self, max_dt: Duration) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Time since the previous call (or since construction), clamped.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt.min(self.max_dt)
    }

    /// Restart measurement from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
