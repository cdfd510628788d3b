//! Idle-event feed: query building, HTTP fetching and feature-collection parsing.

pub mod error;
pub mod event;
pub mod query;
pub mod source;

pub use error::FeedError;
pub use event::*;
pub use query::IdleQuery;
pub use source::*;
