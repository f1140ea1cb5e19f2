//! Error types for acl-client
//!
//! This module defines the error hierarchy used throughout the crate.
//! `AclError` is the taxonomy callers of [`crate::acl::AclClient`] match on;
//! the remaining types cover transport, configuration and the binary.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ACL error: {0}")]
    Acl(#[from] AclError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors produced while fetching an ACL.
///
/// The four kinds are mutually exclusive. `NotFound` is a legitimate
/// outcome ("no ACL for this entity"); the others are operational failures.
#[derive(Error, Debug)]
pub enum AclError {
    /// The request could not be built or sent, or no response arrived.
    #[error("ACL request failed: {0}")]
    RequestFailed(#[from] TransportError),

    /// The identity service answered 404.
    #[error("could not find ACL")]
    NotFound,

    /// Any other status outside 200..=299.
    #[error("ACL request was not successful (HTTP {status})")]
    UnsuccessfulResponse { status: u16 },

    /// Successful status but the body could not be read or decoded.
    #[error("invalid ACL response body: {0}")]
    InvalidResponseBody(#[from] BodyError),
}

/// Why a successful response's body was rejected
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("failed to read body: {0}")]
    Read(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl BodyError {
    /// Whether decoding hit the end of input before a complete document
    pub fn is_eof(&self) -> bool {
        match self {
            BodyError::Decode(e) => e.is_eof(),
            BodyError::Read(_) => false,
        }
    }
}

impl AclError {
    /// Whether the identity service reported that no ACL exists
    pub fn is_not_found(&self) -> bool {
        matches!(self, AclError::NotFound)
    }

    /// HTTP status carried by the error, if the service responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            AclError::NotFound => Some(404),
            AclError::UnsuccessfulResponse { status } => Some(*status),
            AclError::RequestFailed(_) | AclError::InvalidResponseBody(_) => None,
        }
    }
}

/// Failures raised by a [`crate::transport::Transport`]
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("cannot build request URL from base '{0}'")]
    InvalidUrl(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for ACL operations
pub type AclResult<T> = std::result::Result<T, AclError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_is_not_found() {
        assert!(AclError::NotFound.is_not_found());
        assert!(!AclError::UnsuccessfulResponse { status: 500 }.is_not_found());
        assert!(!AclError::RequestFailed(TransportError::Cancelled).is_not_found());
    }

    #[test]
    fn test_status() {
        assert_eq!(AclError::NotFound.status(), Some(404));
        assert_eq!(
            AclError::UnsuccessfulResponse { status: 503 }.status(),
            Some(503)
        );
        assert_eq!(
            AclError::RequestFailed(TransportError::Cancelled).status(),
            None
        );
    }

    #[test]
    fn test_request_failed_keeps_cause() {
        let err = AclError::from(TransportError::Other(anyhow::anyhow!("boom")));
        assert_eq!(err.to_string(), "ACL request failed: boom");

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_invalid_body_keeps_cause() {
        let parse_err = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let err = AclError::from(BodyError::from(parse_err));
        assert!(err.to_string().starts_with("invalid ACL response body:"));

        let source = err
            .source()
            .and_then(|s| s.downcast_ref::<BodyError>())
            .unwrap();
        assert!(source.is_eof());
        assert!(matches!(source, BodyError::Decode(_)));
    }

    #[test]
    fn test_unsuccessful_message() {
        let err = AclError::UnsuccessfulResponse { status: 500 };
        assert_eq!(err.to_string(), "ACL request was not successful (HTTP 500)");
    }
}
