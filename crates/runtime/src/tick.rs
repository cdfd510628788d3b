use std::time::Duration;

/// Metadata for one firing of a repeating timer.
///
/// Ticks of a single timer are strictly sequential: `index` increases by one
/// per firing and a tick is only produced after the previous interval elapsed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick {
    /// 0-based tick index since the timer was started.
    pub index: u64,
    /// Fixed interval between ticks.
    pub interval: Duration,
}

impl Tick {
    pub fn new(index: u64, interval: Duration) -> Self {
        Self { index, interval }
    }

    /// Time since the timer started, as of this tick. Saturates rather than
    /// overflowing on absurdly long-running timers.
    pub fn elapsed(&self) -> Duration {
        u32::try_from(self.index.saturating_add(1))
            .map_or(Duration::MAX, |n| self.interval.saturating_mul(n))
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.interval)
    }
}
