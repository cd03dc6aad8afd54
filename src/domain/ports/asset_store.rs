use crate::domain::error::DomainError;
use async_trait::async_trait;
use std::time::Duration;

/// Object storage holding display assets.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// Issues a URL granting read access to `key` for `ttl`.
    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String, DomainError>;
}
