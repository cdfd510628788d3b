//! Data handed to the map renderer: per-event colors, elevations and hover text.
//! Nothing here draws; the renderer owns geometry and styling.

pub mod objects;
pub mod symbology;
pub mod tooltip;

pub use objects::*;
pub use symbology::*;
pub use tooltip::*;
