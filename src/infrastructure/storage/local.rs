use crate::domain::error::DomainError;
use crate::domain::ports::asset_store::AssetStore;
use crate::infrastructure::storage::signing::{SignatureError, UrlSigner};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Url;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Directory-backed asset store whose signed URLs point at the web front
/// end's `/assets` route.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    public_url: Url,
    signer: UrlSigner,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>, public_url: &str, signer: UrlSigner) -> Result<Self, DomainError> {
        let public_url = Url::parse(public_url)
            .map_err(|e| DomainError::Config(format!("invalid public URL {public_url}: {e}")))?;
        if public_url.cannot_be_a_base() {
            return Err(DomainError::Config(format!("public URL {public_url} cannot be a base")));
        }
        Ok(Self {
            root: root.into(),
            public_url,
            signer,
        })
    }

    /// Maps an object key to a path under the root, rejecting traversal.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(DomainError::InvalidInput(format!("invalid asset key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    pub fn verify(&self, key: &str, expires: i64, signature: &str) -> Result<(), SignatureError> {
        self.signer.verify(key, expires, signature, Utc::now().timestamp())
    }

    pub async fn read(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DomainError::NotFound(key.to_string())),
            Err(e) => Err(DomainError::Storage(format!("failed to read {key}: {e}"))),
        }
    }

    fn url_for(&self, key: &str, expires: i64) -> Result<String, DomainError> {
        let mut url = self.public_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DomainError::Config("public URL cannot be a base".into()))?;
            segments.pop_if_empty().push("assets");
            for part in key.split('/') {
                segments.push(part);
            }
        }
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &self.signer.sign(key, expires));
        Ok(url.to_string())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let path = self.path_for(key)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String, DomainError> {
        self.path_for(key)?;
        let expires = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|secs| Utc::now().timestamp().checked_add(secs))
            .ok_or_else(|| DomainError::Storage(format!("URL lifetime of {}s is out of range", ttl.as_secs())))?;
        self.url_for(key, expires)
    }
}
