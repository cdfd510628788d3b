use camera::{Gesture, Viewport, ViewportController};
use catalog::DEFAULT_CITY_CODE;
use feeds::{FetchOutcome, IdleQuery};
use foundation::ids::{RequestSeq, SequenceCounter};
use foundation::time::{EpochMillis, TimeWindow};
use layers::EventLayerSnapshot;
use runtime::EventBus;
use timeline::{PlaybackState, TimelineController};
use tracing::{debug, info, warn};

use crate::context::{DashboardContext, Theme};
use crate::keyboard::{action_for, KeyAction};
use crate::selection::CitySelection;

/// A request the owner wants issued. The caller runs it and hands the
/// outcome back through [`Dashboard::complete_fetch`] with the same `seq`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub seq: RequestSeq,
    pub query: IdleQuery,
}

/// What [`Dashboard::complete_fetch`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Dataset replaced; carries the event count.
    Loaded(usize),
    Empty,
    Failed,
    /// Superseded by a later request and dropped.
    Stale,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFrame {
    pub viewport: Viewport,
    pub minimap: Viewport,
    pub layer: EventLayerSnapshot,
    pub window: Option<TimeWindow>,
    pub current: Option<EpochMillis>,
    /// Playhead position in `[0, 1]` for the slider.
    pub progress: Option<f64>,
    pub playback: PlaybackState,
    pub loaded: bool,
    pub theme: Theme,
    pub map_style: &'static str,
    pub selected: Option<String>,
}

/// Page-level state owner.
///
/// Holds the dataset, playhead, camera and interaction flags, and is the
/// only place they change. All methods are synchronous; scheduling lives in
/// [`crate::session`].
#[derive(Debug)]
pub struct Dashboard {
    context: DashboardContext,
    timeline: TimelineController,
    camera: ViewportController,
    requests: SequenceCounter,
    selected: Option<CitySelection>,
    bus: EventBus,
}

impl Dashboard {
    pub fn new(context: DashboardContext) -> Self {
        let camera = ViewportController::new().with_band(context.config.zoom_band);
        Self {
            context,
            timeline: TimelineController::new(),
            camera,
            requests: SequenceCounter::default(),
            selected: None,
            bus: EventBus::new(),
        }
    }

    /// Initial load: the default agency, no lower time bound.
    pub fn mount(&mut self) -> PendingFetch {
        info!("dashboard mounted ({:?} theme)", self.context.theme);
        self.issue(IdleQuery::for_agency(DEFAULT_CITY_CODE))
    }

    /// Flies to the selected city and requests its last 24 hours.
    ///
    /// Re-selecting the current city is not de-duplicated: the camera resets
    /// and a fresh request goes out.
    pub fn select_city(&mut self, selection: CitySelection, now: EpochMillis) -> PendingFetch {
        info!(
            "city selected: {} at ({}, {})",
            selection.code, selection.coordinates.lon, selection.coordinates.lat
        );
        self.camera.reset_to(selection.coordinates);
        let query = IdleQuery::last_24h(selection.code.clone(), now);
        self.selected = Some(selection);
        self.issue(query)
    }

    fn issue(&mut self, query: IdleQuery) -> PendingFetch {
        let seq = self.requests.next();
        self.timeline.begin_fetch();
        debug!("fetch {seq} issued: {query}");
        PendingFetch { seq, query }
    }

    /// Applies a fetch outcome, unless a later request has been issued since.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> FetchApplied {
        let FetchOutcome { seq, query, result } = outcome;
        if !self.requests.is_latest(seq) {
            debug!("dropping stale fetch {seq} for {query}");
            self.bus.emit("fetch_stale", format!("{seq} {query} superseded"));
            return FetchApplied::Stale;
        }

        match result {
            Ok(events) if events.is_empty() => {
                info!("fetch {seq} for {query}: no events");
                self.timeline.load(events);
                FetchApplied::Empty
            }
            Ok(events) => {
                let n = events.len();
                info!("fetch {seq} for {query}: {n} events");
                self.timeline.load(events);
                FetchApplied::Loaded(n)
            }
            Err(err) => {
                warn!("fetch {seq} for {query} failed: {err}");
                self.bus.emit("fetch_failed", format!("{query}: {err}"));
                self.timeline.fail();
                FetchApplied::Failed
            }
        }
    }

    /// Returns whether the key was bound.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match action_for(code) {
            Some(KeyAction::TogglePlayback) => {
                self.play_pause_button();
                true
            }
            None => false,
        }
    }

    /// Returns whether playback is running afterwards.
    pub fn play_pause_button(&mut self) -> bool {
        if self.timeline.toggle() {
            debug!("playback toggled, playing={}", self.timeline.is_playing());
        }
        self.timeline.is_playing()
    }

    /// Slider input. Always pauses.
    pub fn scrub(&mut self, t: EpochMillis) -> Option<EpochMillis> {
        self.timeline.scrub(t)
    }

    pub fn view_change(&mut self, requested: Viewport, gesture: Gesture) -> Viewport {
        let was_rotating = self.camera.auto_rotating();
        let applied = self.camera.apply_view_change(requested, gesture);
        if was_rotating && !self.camera.auto_rotating() {
            debug!("manual interaction; auto-rotation stopped");
        }
        applied
    }

    pub fn playback_tick(&mut self) -> Option<EpochMillis> {
        self.timeline.tick()
    }

    pub fn rotation_tick(&mut self) -> bool {
        self.camera.rotate_tick()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.context.toggle_theme()
    }

    pub fn frame(&self) -> DashboardFrame {
        let viewport = self.camera.viewport();
        DashboardFrame {
            viewport,
            minimap: viewport.minimap(),
            layer: EventLayerSnapshot::extract(&self.timeline),
            window: self.timeline.window(),
            current: self.timeline.current(),
            progress: self.timeline.progress(),
            playback: self.timeline.state(),
            loaded: self.timeline.is_loaded(),
            theme: self.context.theme,
            map_style: self.context.theme.map_style(),
            selected: self.selected.as_ref().map(|s| s.code.clone()),
        }
    }

    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    pub fn timeline(&self) -> &TimelineController {
        &self.timeline
    }

    pub fn camera(&self) -> &ViewportController {
        &self.camera
    }

    pub fn selected(&self) -> Option<&CitySelection> {
        self.selected.as_ref()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardContext::default())
    }
}
