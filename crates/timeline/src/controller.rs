//! Playhead over a fetched event timeline.
//!
//! States:
//! - `Idle`: no dataset, no current time. Entered when a fetch begins and
//!   after an empty or failed fetch.
//! - `Playing` / `Paused`: a dataset is loaded and `current` lies inside its
//!   window. `tick` only advances while playing.
//!
//! While playing, each tick adds a fixed step to `current`; stepping past the
//! window end wraps to the window start. Playback never terminates.

use std::time::Duration;

use feeds::IdleEvent;
use foundation::time::{EpochMillis, TimeWindow};
use tracing::debug;

use crate::dataset::Dataset;

/// Simulated time added per playback tick.
pub const PLAYBACK_STEP_MS: i64 = 1_000;

/// Wall-clock interval between playback ticks.
pub const PLAYBACK_TICK_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
pub struct TimelineController {
    dataset: Dataset,
    current: Option<EpochMillis>,
    playing: bool,
    loaded: bool,
}

impl Default for TimelineController {
    fn default() -> Self {
        Self {
            dataset: Dataset::empty(),
            current: None,
            playing: false,
            loaded: false,
        }
    }
}

impl TimelineController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        match (self.current, self.playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// False while a fetch is outstanding; true once it settled, even if empty.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn current(&self) -> Option<EpochMillis> {
        self.current
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.dataset.window()
    }

    pub fn start(&self) -> Option<EpochMillis> {
        self.window().map(|w| w.start)
    }

    pub fn end(&self) -> Option<EpochMillis> {
        self.window().map(|w| w.end)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Drops the current dataset and pauses before a new request settles, so
    /// stale data is never animated.
    pub fn begin_fetch(&mut self) {
        self.dataset = Dataset::empty();
        self.current = None;
        self.playing = false;
        self.loaded = false;
    }

    /// Installs a freshly fetched dataset.
    ///
    /// Non-empty: the window spans the event timestamps, `current` starts at
    /// the window start and playback begins. Empty: back to `Idle`.
    pub fn load(&mut self, events: Vec<IdleEvent>) {
        let dataset = Dataset::new(events);
        self.loaded = true;
        match dataset.window() {
            Some(window) => {
                debug!(
                    "timeline loaded {} events over {}..{}",
                    dataset.len(),
                    window.start,
                    window.end
                );
                self.current = Some(window.start);
                self.playing = true;
                self.dataset = dataset;
            }
            None => self.clear_loaded(),
        }
    }

    /// Recovery path for a failed fetch; identical to an empty result.
    pub fn fail(&mut self) {
        self.loaded = true;
        self.clear_loaded();
    }

    fn clear_loaded(&mut self) {
        self.dataset = Dataset::empty();
        self.current = None;
        self.playing = false;
    }

    /// Advances the playhead by one step.
    ///
    /// Returns the new current time, or `None` when nothing moved (idle or
    /// paused). A zero-width window holds its position.
    pub fn tick(&mut self) -> Option<EpochMillis> {
        if !self.playing {
            return None;
        }
        let (current, window) = (self.current?, self.window()?);
        let next = current + PLAYBACK_STEP_MS;
        let next = if next > window.end { window.start } else { next };
        self.current = Some(next);
        Some(next)
    }

    /// Flips between playing and paused. Ignored while idle.
    pub fn toggle(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.playing = !self.playing;
        true
    }

    /// Moves the playhead to `t` (clamped into the window) and pauses.
    /// Playback does not resume on its own.
    pub fn scrub(&mut self, t: EpochMillis) -> Option<EpochMillis> {
        let window = self.window()?;
        let t = window.clamp(t);
        self.current = Some(t);
        self.playing = false;
        Some(t)
    }

    /// Events with `timestamp <= current`; empty while idle.
    pub fn visible(&self) -> Vec<&IdleEvent> {
        match self.current {
            Some(t) => self.dataset.visible_at(t).collect(),
            None => Vec::new(),
        }
    }

    /// Playhead position as a fraction of the window, for slider display.
    pub fn progress(&self) -> Option<f64> {
        let (current, window) = (self.current?, self.window()?);
        if window.is_zero_width() {
            return Some(0.0);
        }
        Some((current - window.start) as f64 / window.width() as f64)
    }

    pub fn max_duration(&self) -> f64 {
        self.dataset.max_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::{PlaybackState, TimelineController};
    use crate::testing::event_at;
    use foundation::time::EpochMillis;
    use pretty_assertions::assert_eq;

    const T0: i64 = 1_709_294_400_000;

    fn loaded(ts: &[i64]) -> TimelineController {
        let mut tl = TimelineController::new();
        tl.begin_fetch();
        tl.load(ts.iter().map(|&t| event_at(t)).collect());
        tl
    }

    fn visible_ts(tl: &TimelineController) -> Vec<i64> {
        tl.visible().iter().map(|e| e.timestamp.0).collect()
    }

    #[test]
    fn load_sets_window_and_starts_playing() {
        let tl = loaded(&[T0 + 9_000, T0, T0 + 5_000]);
        assert_eq!(tl.start(), Some(EpochMillis(T0)));
        assert_eq!(tl.end(), Some(EpochMillis(T0 + 9_000)));
        assert_eq!(tl.current(), Some(EpochMillis(T0)));
        assert_eq!(tl.state(), PlaybackState::Playing);
        assert!(tl.is_loaded());
    }

    #[test]
    fn filter_at_midpoint_contains_first_two() {
        let mut tl = loaded(&[T0, T0 + 5_000, T0 + 9_000]);
        tl.scrub(EpochMillis(T0 + 5_000));
        assert_eq!(visible_ts(&tl), vec![T0, T0 + 5_000]);
        assert_eq!(visible_ts(&tl), visible_ts(&tl));
    }

    #[test]
    fn empty_load_is_idle_but_loaded() {
        let mut tl = loaded(&[T0]);
        tl.begin_fetch();
        assert!(!tl.is_loaded());
        tl.load(Vec::new());
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.window(), None);
        assert_eq!(tl.current(), None);
        assert!(!tl.is_playing());
        assert!(tl.is_loaded());
        assert!(tl.visible().is_empty());
    }

    #[test]
    fn failure_matches_empty_result() {
        let mut tl = loaded(&[T0, T0 + 1_000]);
        tl.begin_fetch();
        tl.fail();
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert!(tl.dataset().is_empty());
        assert!(tl.is_loaded());
        assert!(!tl.is_playing());
    }

    #[test]
    fn begin_fetch_pauses_and_clears_current() {
        let mut tl = loaded(&[T0, T0 + 3_000]);
        tl.begin_fetch();
        assert_eq!(tl.current(), None);
        assert!(!tl.is_playing());
        assert_eq!(tl.tick(), None);
    }

    #[test]
    fn tick_wraps_to_start_without_drift() {
        let mut tl = loaded(&[T0, T0 + 3_000]);
        // start, +1s, +2s, +3s (= end), wrap.
        let period = 3_000 / super::PLAYBACK_STEP_MS + 1;
        for lap in 0..3 {
            for _ in 0..period {
                tl.tick();
            }
            assert_eq!(tl.current(), Some(EpochMillis(T0)), "lap {lap}");
        }
    }

    #[test]
    fn tick_reaches_end_before_wrapping() {
        let mut tl = loaded(&[T0, T0 + 2_000]);
        assert_eq!(tl.tick(), Some(EpochMillis(T0 + 1_000)));
        assert_eq!(tl.tick(), Some(EpochMillis(T0 + 2_000)));
        assert_eq!(tl.tick(), Some(EpochMillis(T0)));
    }

    #[test]
    fn zero_width_window_holds_position() {
        let mut tl = loaded(&[T0, T0, T0]);
        assert_eq!(tl.start(), tl.end());
        for _ in 0..5 {
            tl.tick();
            assert_eq!(tl.current(), Some(EpochMillis(T0)));
        }
        assert_eq!(tl.progress(), Some(0.0));
        assert_eq!(tl.visible().len(), 3);
    }

    #[test]
    fn scrub_clamps_and_pauses() {
        let mut tl = loaded(&[T0, T0 + 9_000]);
        assert_eq!(tl.scrub(EpochMillis(T0 + 60_000)), Some(EpochMillis(T0 + 9_000)));
        assert_eq!(tl.state(), PlaybackState::Paused);
        assert_eq!(tl.tick(), None);
        assert_eq!(tl.current(), Some(EpochMillis(T0 + 9_000)));
    }

    #[test]
    fn scrub_while_idle_is_ignored() {
        let mut tl = TimelineController::new();
        assert_eq!(tl.scrub(EpochMillis(T0)), None);
        assert_eq!(tl.state(), PlaybackState::Idle);
    }

    #[test]
    fn toggle_flips_only_with_data() {
        let mut tl = TimelineController::new();
        assert!(!tl.toggle());
        assert!(!tl.is_playing());

        let mut tl = loaded(&[T0, T0 + 1_000]);
        assert!(tl.toggle());
        assert_eq!(tl.state(), PlaybackState::Paused);
        assert!(tl.toggle());
        assert_eq!(tl.state(), PlaybackState::Playing);
    }

    #[test]
    fn progress_tracks_playhead() {
        let mut tl = loaded(&[T0, T0 + 4_000]);
        tl.tick();
        assert_eq!(tl.progress(), Some(0.25));
    }
}
