pub mod event_bus;
pub mod tick;
pub mod timer;

pub use event_bus::*;
pub use tick::*;
pub use timer::*;
