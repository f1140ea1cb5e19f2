//! Entity ACL module
//!
//! Provides the ACL data model, the [`AclClient`] trait, the client for the
//! external identity service and a closure-backed mock.

pub mod client;
pub mod mock;
pub mod types;

pub use client::{
    AclClient, ExternalClient, ExternalClientBuilder, SharedAclClient, fetch_with_config,
};
pub use mock::MockAclClient;
pub use types::*;
