use feeds::IdleEvent;
use foundation::time::{EpochMillis, TimeWindow};

/// Events returned by one query, in feed order.
///
/// A dataset is replaced wholesale on every fetch and never mutated in place.
/// Its time window is derived once, at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    events: Vec<IdleEvent>,
    window: Option<TimeWindow>,
}

impl Dataset {
    pub fn new(events: Vec<IdleEvent>) -> Self {
        let window = TimeWindow::from_timestamps(events.iter().map(|e| e.timestamp));
        Self { events, window }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[IdleEvent] {
        &self.events
    }

    /// `None` exactly when the dataset is empty.
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Events with `timestamp <= t`, in feed order.
    pub fn visible_at(&self, t: EpochMillis) -> impl Iterator<Item = &IdleEvent> + '_ {
        self.events.iter().filter(move |e| e.timestamp <= t)
    }

    /// Longest idling duration in the dataset, or 0 when empty.
    pub fn max_duration(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.duration_s())
            .fold(0.0, f64::max)
    }
}
