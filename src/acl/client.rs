//! ACL client
//!
//! Fetches the access control list of a user or robot from the identity
//! service and maps the HTTP outcome onto [`AclError`].

use crate::acl::types::Acl;
use crate::config::AclConfig;
use crate::error::{AclError, AclResult, AppError, BodyError, ConfigError, TransportError};
use crate::transport::{HttpTransport, SharedTransport, Transport};
use async_trait::async_trait;
use reqwest::{Method, Request, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{Dispatch, debug, instrument};

/// Source of entity ACLs
#[async_trait]
pub trait AclClient: Send + Sync {
    /// Fetch the ACL for `entity_id` (a numeric user ID or a robot UUID).
    ///
    /// Cancelling `cancel` aborts an in-flight call with
    /// [`AclError::RequestFailed`].
    async fn get_acl(&self, cancel: &CancellationToken, entity_id: &str) -> AclResult<Acl>;

    /// Like [`AclClient::get_acl`], but treats a missing ACL as an empty one
    async fn get_acl_or_empty(
        &self,
        cancel: &CancellationToken,
        entity_id: &str,
    ) -> AclResult<Acl> {
        match self.get_acl(cancel, entity_id).await {
            Err(AclError::NotFound) => Ok(Acl::default()),
            other => other,
        }
    }
}

/// Shared ACL client handle
pub type SharedAclClient = Arc<dyn AclClient>;

/// ACL client backed by the external identity service
pub struct ExternalClient {
    host: Url,
    transport: SharedTransport,
    logger: Option<Dispatch>,
}

impl std::fmt::Debug for ExternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalClient")
            .field("host", &self.host.as_str())
            .field("custom_logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl ExternalClient {
    /// Create a client for `host` with the default transport and logger
    pub fn new(host: Url) -> Result<Self, reqwest::Error> {
        Self::builder(host).build()
    }

    /// Start building a client for `host`
    pub fn builder(host: Url) -> ExternalClientBuilder {
        ExternalClientBuilder {
            host,
            transport: None,
            logger: None,
            timeout: Duration::from_secs(crate::transport::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &AclConfig) -> Result<Self, ConfigError> {
        let host = config.host_url()?;
        let client = Self::builder(host)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(client)
    }

    /// Base URL requests are issued against
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// URL of the ACL document for `entity_id`
    ///
    /// The entity ID is inserted as one opaque, percent-encoded segment.
    /// The base path is replaced; its query string is kept.
    pub fn acl_url(&self, entity_id: &str) -> Result<Url, TransportError> {
        let mut url = self.host.clone();
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.host.to_string()))?
            .clear()
            .extend(["v1", "entities", entity_id, "acl"]);
        Ok(url)
    }

    /// Emit a debug event to the configured logger, or the default subscriber
    fn log_debug(&self, emit: impl FnOnce()) {
        match &self.logger {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, emit),
            None => emit(),
        }
    }

    async fn fetch(&self, entity_id: &str) -> AclResult<Acl> {
        let url = self.acl_url(entity_id).inspect_err(|e| {
            self.log_debug(|| debug!(error = %e, "could not create ACL request"));
        })?;

        let response = self
            .transport
            .execute(Request::new(Method::GET, url))
            .await
            .inspect_err(|e| self.log_debug(|| debug!(error = %e, "ACL request failed")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            self.log_debug(|| debug!("could not find ACL"));
            return Err(AclError::NotFound);
        }
        if !status.is_success() {
            self.log_debug(|| {
                debug!(status = status.as_u16(), "ACL request was not successful");
            });
            return Err(AclError::UnsuccessfulResponse {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            self.log_debug(|| debug!(error = %e, "could not read ACL response body"));
            AclError::InvalidResponseBody(BodyError::Read(e))
        })?;

        serde_json::from_slice::<Acl>(&body).map_err(|e| {
            self.log_debug(|| debug!(error = %e, "invalid ACL response body"));
            AclError::InvalidResponseBody(BodyError::Decode(e))
        })
    }
}

#[async_trait]
impl AclClient for ExternalClient {
    #[instrument(skip(self, cancel))]
    async fn get_acl(&self, cancel: &CancellationToken, entity_id: &str) -> AclResult<Acl> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.log_debug(|| debug!("ACL request cancelled"));
                Err(AclError::RequestFailed(TransportError::Cancelled))
            }
            result = self.fetch(entity_id) => result,
        }
    }
}

/// Build a client from `config` and fetch the ACL for `entity_id`.
///
/// With `empty_on_not_found`, a missing ACL yields an empty one.
pub async fn fetch_with_config(
    config: &AclConfig,
    cancel: &CancellationToken,
    entity_id: &str,
    empty_on_not_found: bool,
) -> Result<Acl, AppError> {
    let client = ExternalClient::from_config(config)?;
    let acl = if empty_on_not_found {
        client.get_acl_or_empty(cancel, entity_id).await?
    } else {
        client.get_acl(cancel, entity_id).await?
    };
    Ok(acl)
}

/// Builder for [`ExternalClient`]
///
/// Options apply in call order; setting one twice keeps the last value.
pub struct ExternalClientBuilder {
    host: Url,
    transport: Option<SharedTransport>,
    logger: Option<Dispatch>,
    timeout: Duration,
}

impl ExternalClientBuilder {
    /// Send diagnostics to `logger` instead of the default subscriber
    pub fn logger(mut self, logger: Dispatch) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Use `transport` instead of the default reqwest transport
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use an already shared transport
    pub fn shared_transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Request timeout of the default transport. Ignored for custom transports.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Finish building. Fails only if the default HTTP client cannot be created.
    pub fn build(self) -> Result<ExternalClient, reqwest::Error> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_timeout(self.timeout)?),
        };

        Ok(ExternalClient {
            host: self.host,
            transport,
            logger: self.logger,
        })
    }
}
