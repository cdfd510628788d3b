pub mod controller;
pub mod viewport;

pub use controller::*;
pub use viewport::*;
