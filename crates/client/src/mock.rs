//! Mock Transport Implementation
//!
//! Programmable backend for controller tests:
//! - replies are registered per method and path and served in order
//! - the last reply for a route keeps being served once the queue drains
//! - every request is recorded for assertions

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::Method;

use crate::error::ApiError;
use crate::request::{HttpRequest, HttpResponse};
use crate::Transport;

/// What the mock answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Respond(HttpResponse),
    /// Simulate a request that never reached the backend
    Unreachable(String),
}

impl MockReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        MockReply::Respond(HttpResponse::new(status, body.to_string().into_bytes()))
    }

    pub fn no_content() -> Self {
        MockReply::Respond(HttpResponse::new(204, Vec::new()))
    }

    /// Error response in the backend's `{"detail": ...}` shape
    pub fn detail(status: u16, detail: &str) -> Self {
        Self::json(status, serde_json::json!({ "detail": detail }))
    }

    pub fn raw(status: u16, body: &str) -> Self {
        MockReply::Respond(HttpResponse::new(status, body.as_bytes().to_vec()))
    }
}

#[derive(Debug)]
struct MockRoute {
    method: Method,
    path: String,
    replies: VecDeque<MockReply>,
}

/// Mock transport with programmable replies and request recording
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<Vec<MockRoute>>>,
    history: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`
    pub fn on(&self, method: Method, path: &str, reply: MockReply) -> &Self {
        let mut routes = self.routes.lock().expect("routes lock poisoned - prior test panicked");
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(MockRoute {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            }),
        }
        self
    }

    /// Return all recorded requests
    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.history
            .lock()
            .expect("history lock poisoned - prior test panicked")
            .clone()
    }

    /// Recorded requests for one backend path
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.recorded_requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.history
            .lock()
            .expect("history lock poisoned - prior test panicked")
            .len()
    }

    /// Forget recorded requests and registered replies
    pub fn reset(&self) {
        self.history
            .lock()
            .expect("history lock poisoned - prior test panicked")
            .clear();
        self.routes
            .lock()
            .expect("routes lock poisoned - prior test panicked")
            .clear();
    }

    fn next_reply(&self, method: &Method, path: &str) -> Result<Option<MockReply>, ApiError> {
        let mut routes = self
            .routes
            .lock()
            .map_err(|e| ApiError::Transport(format!("routes lock poisoned: {e}")))?;
        let Some(route) = routes
            .iter_mut()
            .find(|r| &r.method == method && r.path == path)
        else {
            return Ok(None);
        };
        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        };
        Ok(reply)
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "Mock transport: recording request");

        let method = request.method.clone();
        let path = request.path.clone();
        self.history
            .lock()
            .map_err(|e| ApiError::Transport(format!("history lock poisoned: {e}")))?
            .push(request);

        match self.next_reply(&method, &path)? {
            Some(MockReply::Respond(response)) => Ok(response),
            Some(MockReply::Unreachable(reason)) => Err(ApiError::Transport(reason)),
            None => Ok(HttpResponse::new(
                404,
                serde_json::json!({ "detail": format!("No mock reply for {} {}", method, path) })
                    .to_string()
                    .into_bytes(),
            )),
        }
    }
}
