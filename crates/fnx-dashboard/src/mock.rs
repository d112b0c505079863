//! Mock health source for testing without a running backend.
//!
//! Replays scripted outcomes and records every endpoint it was asked for,
//! so tests can count requests per mount.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use fnx_protocol::{HealthEndpoint, HealthResponse};

use crate::error::{FetchError, FetchResult};
use crate::source::HealthSource;

/// Mock implementation of the `HealthSource` trait.
///
/// Queued outcomes are returned first, in order; once the queue is empty
/// every request gets the fallback outcome.
pub struct MockHealthSource {
    queued: Mutex<VecDeque<FetchResult<HealthResponse>>>,
    fallback: FetchResult<HealthResponse>,
    requests: Mutex<Vec<HealthEndpoint>>,
    delay: Option<Duration>,
}

impl MockHealthSource {
    /// Every request succeeds with `response`.
    pub fn healthy(response: HealthResponse) -> Self {
        Self::with_fallback(Ok(response))
    }

    /// Every request fails as if the connection was refused.
    pub fn unreachable() -> Self {
        Self::with_fallback(Err(FetchError::new("connection refused")))
    }

    pub fn with_fallback(fallback: FetchResult<HealthResponse>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Hold every response for `delay` before returning it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a one-shot outcome ahead of the fallback.
    pub fn push_outcome(&self, outcome: FetchResult<HealthResponse>) {
        self.queued.lock().unwrap().push_back(outcome);
    }

    /// All endpoints requested so far.
    pub fn requests(&self) -> Vec<HealthEndpoint> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HealthSource for MockHealthSource {
    async fn fetch(&self, endpoint: &HealthEndpoint) -> FetchResult<HealthResponse> {
        self.requests.lock().unwrap().push(endpoint.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.queued.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.fallback.clone())
    }
}
