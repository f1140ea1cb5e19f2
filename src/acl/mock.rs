//! Closure-backed ACL client for tests of code that consumes [`AclClient`]

use crate::acl::client::AclClient;
use crate::acl::types::Acl;
use crate::error::AclResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type GetAclFn = dyn Fn(&str) -> AclResult<Acl> + Send + Sync;

/// ACL client whose answers come from a closure
#[derive(Clone)]
pub struct MockAclClient {
    get_acl_fn: Arc<GetAclFn>,
}

impl MockAclClient {
    /// Answer every `get_acl` call with `get_acl_fn(entity_id)`
    pub fn new<F>(get_acl_fn: F) -> Self
    where
        F: Fn(&str) -> AclResult<Acl> + Send + Sync + 'static,
    {
        Self {
            get_acl_fn: Arc::new(get_acl_fn),
        }
    }
}

impl std::fmt::Debug for MockAclClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAclClient").finish_non_exhaustive()
    }
}

#[async_trait]
impl AclClient for MockAclClient {
    async fn get_acl(&self, _cancel: &CancellationToken, entity_id: &str) -> AclResult<Acl> {
        (self.get_acl_fn)(entity_id)
    }
}
