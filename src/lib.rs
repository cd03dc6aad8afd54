pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod web;

use crate::application::arbiter::Arbiter;
use crate::application::ingest::{IngestReport, IngestUseCase};
use crate::application::presenter::Presenter;
use crate::application::resolve::ResolveUseCase;
use crate::config::{EmbeddingBackend, ModelBackend, Settings};
use crate::domain::error::DomainError;
use crate::domain::ports::asset_store::AssetStore;
use crate::domain::ports::candidate_store::CandidateStore;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::language_model::LanguageModel;
use crate::domain::values::resolution::Resolution;
use crate::infrastructure::embeddings::gemini::GeminiProvider;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::http::build_client;
use crate::infrastructure::llm::gemini::GeminiModel;
use crate::infrastructure::llm::noop::NoopModel;
use crate::infrastructure::llm::openai::OpenAiChatModel;
use crate::infrastructure::sqlite::candidate_store::SqliteCandidateStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::storage::local::LocalAssetStore;
use crate::infrastructure::storage::signing::UrlSigner;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub struct PokeFinder {
    resolve_uc: ResolveUseCase,
    ingest_uc: IngestUseCase,
    store: Arc<dyn CandidateStore>,
}

impl PokeFinder {
    /// Builds every provider from `settings`. Asset storage is passed in so
    /// the web front end can share it for serving signed URLs.
    pub fn new(settings: &Settings, assets: Arc<dyn AssetStore>) -> Result<Self, DomainError> {
        settings.validate()?;
        let client = build_client(settings.timeout())?;
        let key = settings.api_key.clone();
        let base_url = settings.base_url.clone();

        let embedder: Arc<dyn EmbeddingProvider> = match settings.embedding_provider {
            EmbeddingBackend::Gemini => Arc::new(GeminiProvider::new(
                client.clone(),
                key.clone(),
                settings.embedding_model.clone(),
                base_url.clone(),
                settings.embedding_dim,
            )),
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
                client.clone(),
                key.clone(),
                settings.embedding_model.clone(),
                base_url.clone(),
                settings.embedding_dim,
            )),
            EmbeddingBackend::Hashing => Arc::new(HashingProvider::new(settings.embedding_dim)),
        };

        let model: Arc<dyn LanguageModel> = match settings.llm_provider {
            ModelBackend::Gemini => Arc::new(GeminiModel::new(client, key, settings.llm_model.clone(), base_url)),
            ModelBackend::OpenAi => Arc::new(OpenAiChatModel::new(client, key, settings.llm_model.clone(), base_url)),
            ModelBackend::None => Arc::new(NoopModel),
        };

        if key_required(settings) && settings.api_key.is_empty() {
            tracing::warn!("no API key configured; provider calls will likely be rejected");
        }

        Self::with_providers(settings, embedder, model, assets)
    }

    pub fn with_providers(
        settings: &Settings,
        embedder: Arc<dyn EmbeddingProvider>,
        model: Arc<dyn LanguageModel>,
        assets: Arc<dyn AssetStore>,
    ) -> Result<Self, DomainError> {
        settings.validate()?;
        if embedder.dimension() == 0 {
            return Err(DomainError::Config("embedding provider reports dimension 0".into()));
        }
        let conn = Connection::open(&settings.db).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let store: Arc<dyn CandidateStore> = Arc::new(SqliteCandidateStore::new(conn));

        let provider_dim = embedder.dimension();
        if let Ok(Some(stored_dim)) = store.stored_dimension() {
            if stored_dim != provider_dim {
                tracing::warn!(
                    stored_dim,
                    provider_dim,
                    "stored vectors do not match the embedding dimension; re-run ingestion"
                );
            }
        }

        Ok(Self {
            resolve_uc: ResolveUseCase::new(
                embedder.clone(),
                store.clone(),
                Arbiter::new(model),
                Presenter::new(assets, settings.url_ttl()),
                settings.top_k,
            ),
            ingest_uc: IngestUseCase::new(embedder, store.clone(), settings.ingest_concurrency),
            store,
        })
    }

    pub async fn recommend(&self, query: &str) -> Resolution {
        self.resolve_uc.execute(query).await
    }

    pub async fn ingest(&self, pattern: &str) -> Result<IngestReport, DomainError> {
        self.ingest_uc.execute(pattern).await
    }

    pub fn candidate_count(&self) -> Result<usize, DomainError> {
        self.store.count()
    }
}

/// Asset store rooted at the configured directory.
///
/// Without a configured secret, one is derived from the process and clock, so
/// signed URLs stop verifying after a restart.
pub fn build_asset_store(settings: &Settings) -> Result<LocalAssetStore, DomainError> {
    let secret = match &settings.signing_secret {
        Some(s) if !s.is_empty() => s.as_bytes().to_vec(),
        _ => {
            tracing::warn!("no signing secret configured; using a per-process secret");
            let seed = format!(
                "{}:{}:{}",
                std::process::id(),
                chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default(),
                settings.db
            );
            Sha256::digest(seed.as_bytes()).to_vec()
        }
    };
    LocalAssetStore::new(&settings.asset_dir, &settings.public_url, UrlSigner::new(secret))
}

fn key_required(settings: &Settings) -> bool {
    settings.embedding_provider != EmbeddingBackend::Hashing || settings.llm_provider != ModelBackend::None
}
