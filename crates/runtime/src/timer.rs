//! Cancellable fixed-interval timers.
//!
//! A [`RepeatingTimer`] owns at most one running tokio task. Starting it again
//! cancels the previous task first, so a timer never has two schedules alive.
//! Every start bumps a generation counter that is stamped on each message;
//! consumers compare it with [`RepeatingTimer::is_current`] to drop ticks that
//! were already buffered in the channel when the timer was cancelled.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::tick::Tick;

#[derive(Debug, Default)]
pub struct RepeatingTimer {
    name: &'static str,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl RepeatingTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: 0,
            task: None,
        }
    }

    /// Starts (or restarts) the timer.
    ///
    /// The first tick fires one full `interval` after the call. Each tick sends
    /// `make(generation, tick)` to `tx`; the task ends on its own once the
    /// receiver is gone. Must be called from within a tokio runtime.
    pub fn start<M, F>(&mut self, interval: Duration, tx: UnboundedSender<M>, make: F) -> u64
    where
        M: Send + 'static,
        F: Fn(u64, Tick) -> M + Send + 'static,
    {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let name = self.name;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick = Tick::new(0, interval);
            loop {
                ticker.tick().await;
                if tx.send(make(generation, tick)).is_err() {
                    tracing::debug!("timer {name} receiver dropped; stopping");
                    break;
                }
                tick = tick.next();
            }
        });

        tracing::debug!("timer {} started (gen {generation}, {interval:?})", self.name);
        self.task = Some(task);
        generation
    }

    /// Stops the timer. Returns `true` if it was running.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                tracing::debug!("timer {} cancelled (gen {})", self.name, self.generation);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a message stamped with `generation` came from the live schedule.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
