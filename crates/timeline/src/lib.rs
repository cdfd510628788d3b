pub mod controller;
pub mod dataset;

pub use controller::*;
pub use dataset::*;
