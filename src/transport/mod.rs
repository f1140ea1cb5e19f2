//! HTTP transport abstraction
//!
//! The ACL client never talks to `reqwest::Client` directly. It hands a
//! prepared request to a [`Transport`], which lets tests substitute a
//! scripted implementation without a live network.

pub mod http;
pub mod mock;

pub use self::http::{DEFAULT_TIMEOUT_SECS, HttpTransport};
pub use mock::{MockTransport, mock_response};

use crate::error::TransportError;
// async_trait required for dyn-compatibility with Arc<dyn Transport>
use async_trait::async_trait;
use reqwest::{Request, Response};
use std::sync::Arc;

/// Issues an HTTP request and returns the response or a transport failure.
///
/// Any status code is a successful execution; interpreting it is the
/// caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

/// Shared transport handle
pub type SharedTransport = Arc<dyn Transport>;
