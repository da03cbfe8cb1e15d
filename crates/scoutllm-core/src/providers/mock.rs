//! Mock transport for testing
//!
//! Replays scripted replies in order and records every request, so tests can
//! assert on wire shapes and on how many network calls were made.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with a JSON body
    Json { status: u16, body: Value },
    /// Respond with a raw text body
    Text { status: u16, body: String },
    /// Fail before any response, like a connection error
    Fail(String),
    /// Fail with a timeout
    Timeout,
}

impl MockReply {
    /// 200 with a JSON body
    pub fn ok(body: Value) -> Self {
        MockReply::Json { status: 200, body }
    }

    /// Error status with a JSON body
    pub fn error(status: u16, body: Value) -> Self {
        MockReply::Json { status, body }
    }
}

/// Scripted `HttpTransport`
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a transport with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that will play `replies` in order
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another reply
    pub fn push(&self, reply: MockReply) {
        self.replies.lock().push_back(reply);
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);

        let reply = self.replies.lock().pop_front();
        match reply {
            Some(MockReply::Json { status, body }) => Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            Some(MockReply::Text { status, body }) => Ok(HttpResponse { status, body }),
            Some(MockReply::Fail(message)) => Err(TransportError::Request(message)),
            Some(MockReply::Timeout) => Err(TransportError::Timeout),
            None => Err(TransportError::Request("no scripted reply".to_string())),
        }
    }
}
