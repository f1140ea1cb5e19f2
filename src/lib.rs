//! Entity ACL client
//!
//! Fetches the access control list (ACL) of an authenticated user or robot
//! from the identity service.
//!
//! ## Wire Contract
//!
//! ```text
//! GET {host}/v1/entities/{entityID}/acl
//!
//! {
//!   "accounts": [ { "id": 1, "name": "alice", "perm": "owner" } ],
//!   "teams":    [ { "id": "fc5105af-e023-47eb-9e45-7d07872f0fbc", "perm": "member" } ]
//! }
//! ```
//!
//! | Outcome                         | Result                              |
//! |---------------------------------|-------------------------------------|
//! | transport failure / cancelled   | `AclError::RequestFailed`           |
//! | HTTP 404                        | `AclError::NotFound`                |
//! | other non-2xx                   | `AclError::UnsuccessfulResponse`    |
//! | 2xx, unreadable or bad body     | `AclError::InvalidResponseBody`     |
//! | 2xx, valid body                 | `Ok(Acl)`                           |
//!
//! No retries happen at this layer.
//!
//! ## Example
//!
//! ```no_run
//! use acl_client::acl::{AclClient, ExternalClient};
//! use reqwest::Url;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ExternalClient::new(Url::parse("http://api-private:8081")?)?;
//! let acl = client.get_acl(&CancellationToken::new(), "1").await?;
//! println!("{} accounts", acl.accounts.len());
//! # Ok(())
//! # }
//! ```

pub mod acl;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main types
pub use acl::{Acl, AclClient, ExternalClient, MockAclClient, Permission};
pub use config::{AppConfig, load_config};
pub use error::{AclError, AclResult, AppError, BodyError, Result};
