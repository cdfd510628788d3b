//! Event sources.
//!
//! [`EventSource`] is the seam between the dashboard and wherever idle events
//! come from. Methods return boxed futures so sources can live behind
//! `Arc<dyn EventSource>` and be driven from spawned tasks.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use foundation::ids::RequestSeq;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::error::FeedError;
use crate::event::{parse_collection, IdleEvent};
use crate::query::IdleQuery;

/// Upper bound on a response body.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EventSource: Send + Sync {
    /// Fetches the events matching `query`, in feed order.
    fn fetch(&self, query: &IdleQuery) -> BoxFuture<'_, Result<Vec<IdleEvent>, FeedError>>;
}

/// Result of one fetch, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: RequestSeq,
    pub query: IdleQuery,
    pub result: Result<Vec<IdleEvent>, FeedError>,
}

/// HTTP source for `GET <base>/idle?iata_id=..&start_datetime=..`.
pub struct HttpEventSource {
    base_url: String,
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpEventSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl EventSource for HttpEventSource {
    fn fetch(&self, query: &IdleQuery) -> BoxFuture<'_, Result<Vec<IdleEvent>, FeedError>> {
        let url = query.url(&self.base_url);
        Box::pin(async move {
            let url = url?;
            debug!("GET {url}");

            let mut resp = self.client.get(url).send().await?;
            if !resp.status().is_success() {
                return Err(FeedError::Status(resp.status().as_u16()));
            }

            if let Some(declared) = resp.content_length() {
                let declared = usize::try_from(declared).unwrap_or(usize::MAX);
                if declared > self.max_body_bytes {
                    return Err(FeedError::TooLarge(declared));
                }
            }

            // Content-Length may be absent or wrong; enforce the cap while reading.
            let mut body = Vec::new();
            while let Some(chunk) = resp.chunk().await? {
                let read = body.len() + chunk.len();
                if read > self.max_body_bytes {
                    return Err(FeedError::TooLarge(read));
                }
                body.extend_from_slice(&chunk);
            }

            parse_collection(&body)
        })
    }
}

/// Canned reply for a [`StaticEventSource`].
#[derive(Debug, Clone)]
pub enum StaticReply {
    Body(String),
    Status(u16),
}

/// In-memory source keyed by agency code, for demos and tests.
///
/// Bodies go through the same parser as HTTP responses. Unknown agencies
/// answer with an empty collection.
#[derive(Debug, Default)]
pub struct StaticEventSource {
    replies: RwLock<HashMap<String, StaticReply>>,
    requests: Mutex<Vec<IdleQuery>>,
}

impl StaticEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_body(&self, agency: &str, body: impl Into<String>) {
        self.replies
            .write()
            .insert(agency.to_string(), StaticReply::Body(body.into()));
    }

    pub fn set_status(&self, agency: &str, status: u16) {
        self.replies
            .write()
            .insert(agency.to_string(), StaticReply::Status(status));
    }

    /// Every query received so far, oldest first.
    pub fn requests(&self) -> Vec<IdleQuery> {
        self.requests.lock().clone()
    }
}

impl EventSource for StaticEventSource {
    fn fetch(&self, query: &IdleQuery) -> BoxFuture<'_, Result<Vec<IdleEvent>, FeedError>> {
        self.requests.lock().push(query.clone());
        let reply = self.replies.read().get(&query.agency).cloned();
        Box::pin(async move {
            match reply {
                Some(StaticReply::Body(body)) => parse_collection(body.as_bytes()),
                Some(StaticReply::Status(code)) => Err(FeedError::Status(code)),
                None => Ok(Vec::new()),
            }
        })
    }
}
