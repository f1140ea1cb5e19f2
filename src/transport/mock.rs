//! Scripted transport for tests
//!
//! [`MockTransport`] answers every request from a closure and remembers
//! the method and URL of each request it was given.

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::{Method, Request, Response, StatusCode, Url};
use std::sync::{Arc, Mutex};

type ResponderFn = dyn Fn(&Request) -> Result<Response, TransportError> + Send + Sync;

/// Transport that returns scripted responses instead of touching the network
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<ResponderFn>,
    requests: Arc<Mutex<Vec<(Method, Url)>>>,
}

impl MockTransport {
    /// Answer each request with the result of `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Request) -> Result<Response, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every request with the same status and body
    pub fn respond(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_| Ok(mock_response(status, body.clone())))
    }

    /// Fail every request with a transport error carrying `message`
    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(TransportError::Other(anyhow::anyhow!(message.clone()))))
    }

    /// Method and URL of every request seen so far, oldest first
    pub fn requests(&self) -> Vec<(Method, Url)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("requests", &self.requests())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push((request.method().clone(), request.url().clone()));
        }
        (self.responder)(&request)
    }
}

/// Build a `reqwest::Response` with the given status and body
pub fn mock_response(status: StatusCode, body: impl Into<String>) -> Response {
    let mut response = ::http::Response::new(body.into());
    *response.status_mut() = status;
    Response::from(response)
}
