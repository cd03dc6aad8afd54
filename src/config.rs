use crate::domain::error::DomainError;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmbeddingBackend {
    Gemini,
    #[value(name = "openai")]
    OpenAi,
    Hashing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelBackend {
    Gemini,
    #[value(name = "openai")]
    OpenAi,
    None,
}

/// Runtime configuration. Every option can also be set through the
/// environment variable named in its `env` attribute.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// SQLite database holding candidates and embeddings
    #[arg(long, global = true, env = "POKEFINDER_DB", default_value = "./pokefinder.db")]
    pub db: String,

    /// Embedding backend
    #[arg(long, global = true, env = "POKEFINDER_EMBEDDING_PROVIDER", value_enum, default_value = "hashing")]
    pub embedding_provider: EmbeddingBackend,

    /// Embedding model name
    #[arg(long, global = true, env = "POKEFINDER_EMBEDDING_MODEL")]
    pub embedding_model: Option<String>,

    /// Dimensionality of stored and query embeddings
    #[arg(long, global = true, env = "POKEFINDER_EMBEDDING_DIM", default_value_t = 768)]
    pub embedding_dim: usize,

    /// Language model backend used to pick among candidates
    #[arg(long, global = true, env = "POKEFINDER_LLM_PROVIDER", value_enum, default_value = "none")]
    pub llm_provider: ModelBackend,

    /// Language model name
    #[arg(long, global = true, env = "POKEFINDER_LLM_MODEL")]
    pub llm_model: Option<String>,

    /// API key for the embedding and language model services
    #[arg(long, global = true, env = "POKEFINDER_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Override for the provider base URL
    #[arg(long, global = true, env = "POKEFINDER_BASE_URL")]
    pub base_url: Option<String>,

    /// Number of nearest candidates handed to the model
    #[arg(long, global = true, env = "POKEFINDER_TOP_K", default_value_t = 3)]
    pub top_k: usize,

    /// Directory holding `images/<name>.png` assets
    #[arg(long, global = true, env = "POKEFINDER_ASSET_DIR", default_value = "./assets")]
    pub asset_dir: PathBuf,

    /// Public base URL used when building signed asset links
    #[arg(long, global = true, env = "POKEFINDER_PUBLIC_URL", default_value = "http://localhost:8080")]
    pub public_url: String,

    /// Secret for signing asset URLs; a per-process secret is used when unset
    #[arg(long, global = true, env = "POKEFINDER_SIGNING_SECRET", hide_env_values = true)]
    pub signing_secret: Option<String>,

    /// Lifetime of signed asset URLs in seconds
    #[arg(long, global = true, env = "POKEFINDER_URL_TTL_SECS", default_value_t = 900)]
    pub url_ttl_secs: u64,

    /// Timeout for each outbound service call in seconds
    #[arg(long, global = true, env = "POKEFINDER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum embedding calls in flight during ingestion
    #[arg(long, global = true, env = "POKEFINDER_INGEST_CONCURRENCY", default_value_t = 4)]
    pub ingest_concurrency: usize,
}

impl Settings {
    pub fn url_ttl(&self) -> Duration {
        Duration::from_secs(self.url_ttl_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects values that would make every query fail.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.top_k == 0 {
            return Err(DomainError::Config("top_k must be at least 1".into()));
        }
        if self.embedding_dim == 0 {
            return Err(DomainError::Config("embedding_dim must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db: "./pokefinder.db".into(),
            embedding_provider: EmbeddingBackend::Hashing,
            embedding_model: None,
            embedding_dim: 768,
            llm_provider: ModelBackend::None,
            llm_model: None,
            api_key: String::new(),
            base_url: None,
            top_k: 3,
            asset_dir: PathBuf::from("./assets"),
            public_url: "http://localhost:8080".into(),
            signing_secret: None,
            url_ttl_secs: 900,
            timeout_secs: 30,
            ingest_concurrency: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let settings = Settings {
            top_k: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_zero_embedding_dim_rejected() {
        let settings = Settings {
            embedding_dim: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(DomainError::Config(_))));
    }
}
