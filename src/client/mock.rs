//! Mock transport for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::transport::{HttpRequest, HttpResponse, Transport};
use super::AdsError;

/// A transport that records requests and replays queued responses.
///
/// Responses are returned in the order they were queued. When the queue is
/// empty, requests fail with [`AdsError::Transport`].
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, AdsError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        lock(&self.responses).push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: AdsError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

/// Lock, ignoring poisoning
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AdsError> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(AdsError::Transport("no mock response queued".to_string())))
    }
}
