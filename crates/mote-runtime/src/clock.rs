//! Frame clock deriving per-tick deltas from wall-clock time

use std::time::Instant;

/// Tracks elapsed animation time across scheduler ticks
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last tick in seconds
    pub delta_time: f64,
    /// Largest delta a single tick may report
    pub max_delta: f64,
    /// Number of ticks since creation
    pub frame_count: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock that clamps each delta to `max_delta` seconds
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    /// Advance the clock from the wall clock. Call once per scheduler tick.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            self.frame_count += 1;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance the clock by an explicit delta (headless and test drivers)
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        // A tab coming back from the background reports one huge gap
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }
}
