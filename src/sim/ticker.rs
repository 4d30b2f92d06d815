//! Fixed-interval event clock
//!
//! Decouples energy regeneration from the render frame rate. Frame deltas
//! accumulate; once the accumulator reaches the interval it wraps by modulo,
//! so a slow frame never leaves a backlog of stale ticks behind.

use serde::{Deserialize, Serialize};

use crate::sanitize_delta;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodicTicker {
    interval: f32,
    accumulated: f32,
    /// Whether the most recent `tick` crossed at least one interval
    fired: bool,
    /// Total intervals crossed since reset
    total: u64,
}

impl PeriodicTicker {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            interval: interval_ms,
            accumulated: 0.0,
            fired: false,
            total: 0,
        }
    }

    /// Advance by one frame delta; returns the number of intervals crossed.
    ///
    /// Callers that only care about "did a tick happen this frame" should use
    /// [`fired`](Self::fired): it reports one logical tick per call no matter
    /// how many intervals the delta spanned.
    pub fn tick(&mut self, delta_ms: f32) -> u32 {
        self.accumulated += sanitize_delta(delta_ms);
        if self.accumulated >= self.interval {
            let crossed = (self.accumulated / self.interval).floor() as u32;
            self.accumulated %= self.interval;
            self.total += crossed as u64;
            self.fired = true;
            crossed
        } else {
            self.fired = false;
            0
        }
    }

    #[inline]
    pub fn fired(&self) -> bool {
        self.fired
    }

    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.total
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.fired = false;
        self.total = 0;
    }
}
