use thiserror::Error;

/// Failures while fetching or decoding an idle-event collection.
///
/// None of these are fatal to a dashboard: every variant collapses to the same
/// "empty dataset" recovery path.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection, TLS or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream HTTP {0}")]
    Status(u16),

    #[error("payload too large ({0} bytes)")]
    TooLarge(usize),

    /// Success status but the body is not a usable feature collection.
    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("invalid feed url: {0}")]
    InvalidUrl(String),
}

impl FeedError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
