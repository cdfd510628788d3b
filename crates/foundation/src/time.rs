//! Time primitives in epoch milliseconds.

use std::ops::{Add, Sub};

/// A point in time as milliseconds since the Unix epoch (UTC).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochMillis(pub i64);

impl EpochMillis {
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Whole seconds, rounded toward negative infinity.
    pub const fn as_secs(self) -> i64 {
        self.0.div_euclid(1000)
    }

    pub fn now() -> Self {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| Self(d.as_millis() as i64))
            .unwrap_or_default()
    }
}

impl Add<i64> for EpochMillis {
    type Output = EpochMillis;

    fn add(self, rhs: i64) -> Self::Output {
        EpochMillis(self.0.saturating_add(rhs))
    }
}

impl Sub<i64> for EpochMillis {
    type Output = EpochMillis;

    fn sub(self, rhs: i64) -> Self::Output {
        EpochMillis(self.0.saturating_sub(rhs))
    }
}

impl Sub for EpochMillis {
    type Output = i64;

    fn sub(self, rhs: EpochMillis) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl std::fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Closed interval `[start, end]` spanned by a set of timestamps.
///
/// Invariant: `start <= end`. A zero-width window (`start == end`) is valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: EpochMillis,
    pub end: EpochMillis,
}

impl TimeWindow {
    /// Builds a window, swapping the bounds if they arrive reversed.
    pub fn new(a: EpochMillis, b: EpochMillis) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Min/max over `timestamps`, or `None` when there are none.
    pub fn from_timestamps<I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = EpochMillis>,
    {
        let mut iter = timestamps.into_iter();
        let first = iter.next()?;
        let (start, end) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { start, end })
    }

    pub fn width(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, t: EpochMillis) -> bool {
        t >= self.start && t <= self.end
    }

    pub fn clamp(&self, t: EpochMillis) -> EpochMillis {
        t.clamp(self.start, self.end)
    }
}
