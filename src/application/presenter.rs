use crate::domain::ports::asset_store::AssetStore;
use std::sync::Arc;
use std::time::Duration;

/// Attaches a signed image URL to a chosen candidate.
pub struct Presenter {
    assets: Arc<dyn AssetStore>,
    ttl: Duration,
}

impl Presenter {
    pub fn new(assets: Arc<dyn AssetStore>, ttl: Duration) -> Self {
        Self { assets, ttl }
    }

    /// Signed URL for the candidate's image, or `None` when there is none.
    ///
    /// Never fails: a missing asset or a signing error both yield `None`.
    pub async fn attach_asset(&self, name: &str) -> Option<String> {
        let key = asset_key(name);
        match self.assets.exists(&key).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(%key, "image asset not found");
                return None;
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "image existence check failed");
                return None;
            }
        }

        match self.assets.signed_url(&key, self.ttl).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to sign image URL");
                None
            }
        }
    }
}

/// Object key for a candidate's image: `images/<lowercased-name>.png`.
pub fn asset_key(name: &str) -> String {
    format!("images/{}.png", name.to_lowercase())
}
