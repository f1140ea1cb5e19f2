//! reqwest-backed transport

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::time::Duration;
use tracing::{Instrument, debug, field, info_span};

/// Default request timeout for the identity service
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Production transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a transport with the default 10 second timeout
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with a custom overall request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(format!("acl-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }

    /// Wrap an already configured client
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let span = info_span!(
            "http.request",
            method = %request.method(),
            url = %request.url(),
            status = field::Empty,
        );

        async {
            let response = self.http.execute(request).await?;
            tracing::Span::current().record("status", response.status().as_u16());
            debug!("Received response");
            Ok::<_, TransportError>(response)
        }
        .instrument(span)
        .await
    }
}
