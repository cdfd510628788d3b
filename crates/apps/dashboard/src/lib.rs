//! Page-level state for the idling dashboard.
//!
//! [`Dashboard`] is the single owner of dataset, playhead, camera and flags.
//! [`DashboardSession`] drives it from commands, timers and fetch completions
//! on one task, so no locking is needed around the state.

pub mod config;
pub mod context;
pub mod dashboard;
pub mod keyboard;
pub mod selection;
pub mod session;

pub use config::{ConfigError, DashboardConfig};
pub use context::{DashboardContext, Theme};
pub use dashboard::{Dashboard, DashboardFrame, FetchApplied, PendingFetch};
pub use keyboard::KeyAction;
pub use selection::{CitySelection, SelectionBridge, SelectionError};
pub use session::{Command, DashboardSession, SessionHandle};
