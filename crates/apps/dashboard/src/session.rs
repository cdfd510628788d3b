//! Event loop around a [`Dashboard`].
//!
//! One task owns the dashboard and multiplexes three inputs: user commands,
//! timer wakes and fetch completions. Fetches run on their own tasks and
//! report back through a channel, so a slow request never blocks input.
//! Timers are started and cancelled after every input to match the state:
//! playback runs only while playing, rotation only until the user takes over.

use std::sync::Arc;

use camera::{Gesture, Viewport};
use feeds::{EventSource, FetchOutcome};
use foundation::time::EpochMillis;
use runtime::{RepeatingTimer, Tick};
use timeline::PlaybackState;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};
use uuid::Uuid;

use crate::context::DashboardContext;
use crate::dashboard::{Dashboard, DashboardFrame, PendingFetch};
use crate::selection::{CitySelection, SelectionBridge};

#[derive(Debug)]
pub enum Command {
    SelectCity(CitySelection),
    /// Keyboard event, by key code.
    Key(String),
    PlayPause,
    Scrub(EpochMillis),
    ViewChange { viewport: Viewport, gesture: Gesture },
    ToggleTheme,
    Frame(oneshot::Sender<DashboardFrame>),
    Unmount,
}

#[derive(Debug, Clone, Copy)]
enum Wake {
    Playback(u64, Tick),
    Rotation(u64, Tick),
}

pub struct DashboardSession {
    pub session_id: String,
    dashboard: Dashboard,
    source: Arc<dyn EventSource>,
    commands: mpsc::UnboundedReceiver<Command>,
    playback: RepeatingTimer,
    rotation: RepeatingTimer,
    wake_tx: mpsc::UnboundedSender<Wake>,
    wake_rx: mpsc::UnboundedReceiver<Wake>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl DashboardSession {
    pub fn new(
        context: DashboardContext,
        source: Arc<dyn EventSource>,
        commands: mpsc::UnboundedReceiver<Command>,
    ) -> Self {
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            session_id: Uuid::new_v4().to_string(),
            dashboard: Dashboard::new(context),
            source,
            commands,
            playback: RepeatingTimer::new("playback"),
            rotation: RepeatingTimer::new("rotation"),
            wake_tx,
            wake_rx,
            fetch_tx,
            fetch_rx,
        }
    }

    /// Mounts, then runs until `Unmount` or until every command sender is
    /// gone. Returns the final dashboard state.
    pub async fn run(mut self) -> Dashboard {
        info!("dashboard session {} started", self.session_id);
        let pending = self.dashboard.mount();
        self.dispatch(pending);
        self.sync_timers();

        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(Command::Unmount) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                Some(wake) = self.wake_rx.recv() => self.handle_wake(wake),
                Some(outcome) = self.fetch_rx.recv() => {
                    self.dashboard.complete_fetch(outcome);
                }
            }
            self.sync_timers();
        }

        self.playback.cancel();
        self.rotation.cancel();
        info!("dashboard session {} unmounted", self.session_id);
        self.dashboard
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SelectCity(selection) => {
                let pending = self.dashboard.select_city(selection, EpochMillis::now());
                self.dispatch(pending);
            }
            Command::Key(code) => {
                if !self.dashboard.handle_key(&code) {
                    debug!("unbound key {code}");
                }
            }
            Command::PlayPause => {
                self.dashboard.play_pause_button();
            }
            Command::Scrub(t) => {
                self.dashboard.scrub(t);
            }
            Command::ViewChange { viewport, gesture } => {
                self.dashboard.view_change(viewport, gesture);
            }
            Command::ToggleTheme => {
                let theme = self.dashboard.toggle_theme();
                debug!("theme now {theme:?}");
            }
            Command::Frame(reply) => {
                let _ = reply.send(self.dashboard.frame());
            }
            Command::Unmount => {}
        }
    }

    fn handle_wake(&mut self, wake: Wake) {
        match wake {
            Wake::Playback(generation, tick) if self.playback.is_current(generation) => {
                let looped = self.dashboard.playback_tick().is_some()
                    && self.dashboard.timeline().current() == self.dashboard.timeline().start();
                if looped {
                    debug!("playback looped after {:?} of wall time", tick.elapsed());
                }
            }
            Wake::Rotation(generation, _) if self.rotation.is_current(generation) => {
                self.dashboard.rotation_tick();
            }
            _ => debug!("dropping wake from cancelled timer: {wake:?}"),
        }
    }

    /// Superseded fetches are left to finish; their outcomes are dropped by
    /// sequence number on arrival.
    fn dispatch(&self, pending: PendingFetch) {
        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let PendingFetch { seq, query } = pending;
            let result = source.fetch(&query).await;
            let _ = tx.send(FetchOutcome { seq, query, result });
        });
    }

    fn sync_timers(&mut self) {
        let config = &self.dashboard.context().config;
        let (playback_every, rotation_every) = (config.playback_interval, config.rotation_interval);

        let want_playback = self.dashboard.timeline().state() == PlaybackState::Playing;
        if want_playback && !self.playback.is_running() {
            self.playback.start(playback_every, self.wake_tx.clone(), Wake::Playback);
        } else if !want_playback {
            self.playback.cancel();
        }

        let want_rotation = self.dashboard.camera().auto_rotating();
        if want_rotation && !self.rotation.is_running() {
            self.rotation.start(rotation_every, self.wake_tx.clone(), Wake::Rotation);
        } else if !want_rotation {
            self.rotation.cancel();
        }
    }
}

/// Handle to a running [`DashboardSession`].
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<Dashboard>,
}

impl SessionHandle {
    /// Spawns a session on the current runtime.
    pub fn spawn(context: DashboardContext, source: Arc<dyn EventSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = DashboardSession::new(context, source, rx);
        let task = tokio::spawn(session.run());
        Self { tx, task }
    }

    pub fn bridge(&self) -> SelectionBridge {
        SelectionBridge::new(self.tx.clone())
    }

    /// Returns `false` once the session has stopped.
    pub fn send(&self, cmd: Command) -> bool {
        self.tx.send(cmd).is_ok()
    }

    pub async fn frame(&self) -> Option<DashboardFrame> {
        let (reply, rx) = oneshot::channel();
        if !self.send(Command::Frame(reply)) {
            return None;
        }
        rx.await.ok()
    }

    pub async fn unmount(self) -> Result<Dashboard, JoinError> {
        let _ = self.tx.send(Command::Unmount);
        self.task.await
    }
}
