//! Shared test helpers: scripted fakes for every port.

#![allow(dead_code)]

use async_trait::async_trait;
use pokefinder::application::arbiter::Arbiter;
use pokefinder::application::presenter::Presenter;
use pokefinder::application::resolve::ResolveUseCase;
use pokefinder::config::Settings;
use pokefinder::domain::entities::candidate::{Candidate, CandidateRecord};
use pokefinder::domain::error::DomainError;
use pokefinder::domain::ports::asset_store::AssetStore;
use pokefinder::domain::ports::candidate_store::CandidateStore;
use pokefinder::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use pokefinder::domain::ports::language_model::LanguageModel;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

pub fn pokemon() -> Vec<Candidate> {
    vec![
        Candidate::new("Pikachu", "A small electric mouse that is very fast."),
        Candidate::new("Raichu", "The evolved form of Pikachu with stronger shocks."),
        Candidate::new("Zapdos", "A legendary bird that controls lightning."),
    ]
}

pub fn in_memory_settings() -> Settings {
    Settings {
        db: ":memory:".into(),
        ..Settings::default()
    }
}

/// Returns a fixed vector (or error) and counts calls.
pub struct ScriptedEmbedder {
    pub vector: Result<Vec<f32>, String>,
    pub dimension: usize,
    pub calls: AtomicUsize,
}

impl ScriptedEmbedder {
    pub fn ok(dimension: usize) -> Arc<Self> {
        Arc::new(Self {
            vector: Ok(vec![0.5; dimension]),
            dimension,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            vector: Err("service unavailable".into()),
            dimension: 4,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn wrong_dimension(dimension: usize, actual: usize) -> Arc<Self> {
        Arc::new(Self {
            vector: Ok(vec![0.5; actual]),
            dimension,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.vector {
            Ok(v) => Ok(texts.iter().map(|_| v.clone()).collect()),
            Err(e) => Err(DomainError::Embedding(e.clone())),
        }
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Returns a fixed candidate list regardless of the query vector.
pub struct FakeStore {
    pub candidates: Vec<Candidate>,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub written: Mutex<Vec<CandidateRecord>>,
    pub search_thread: Mutex<Option<ThreadId>>,
}

impl FakeStore {
    pub fn with(candidates: Vec<Candidate>) -> Arc<Self> {
        Arc::new(Self {
            candidates,
            fail: false,
            calls: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
            search_thread: Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            candidates: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
            search_thread: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CandidateStore for FakeStore {
    fn nearest(&self, _vector: &[f32], k: usize) -> Result<Vec<Candidate>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.search_thread.lock().unwrap() = Some(thread::current().id());
        if self.fail {
            return Err(DomainError::Database("connection refused".into()));
        }
        Ok(self.candidates.iter().take(k).cloned().collect())
    }

    fn upsert(&self, records: &[CandidateRecord]) -> Result<usize, DomainError> {
        self.written.lock().unwrap().extend_from_slice(records);
        Ok(records.len())
    }

    fn count(&self) -> Result<usize, DomainError> {
        Ok(self.candidates.len())
    }

    fn stored_dimension(&self) -> Result<Option<usize>, DomainError> {
        Ok(None)
    }
}

/// Language model answering with a scripted response.
pub struct ScriptedModel {
    pub response: Result<Option<String>, String>,
    pub calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
}

impl ScriptedModel {
    pub fn answering(text: &str) -> Arc<Self> {
        Self::new(Ok(Some(text.to_string())))
    }

    pub fn silent() -> Arc<Self> {
        Self::new(Ok(None))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(Err("quota exceeded".into()))
    }

    fn new(response: Result<Option<String>, String>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.response.clone().map_err(DomainError::Completion)
    }
}

/// Asset store holding a fixed set of keys.
pub struct FakeAssets {
    pub present: HashSet<String>,
    pub fail_lookup: bool,
    pub fail_signing: bool,
    pub calls: AtomicUsize,
}

impl FakeAssets {
    pub fn with(keys: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            present: keys.iter().map(|k| k.to_string()).collect(),
            fail_lookup: false,
            fail_signing: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            present: HashSet::new(),
            fail_lookup: true,
            fail_signing: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn broken_signer(keys: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            present: keys.iter().map(|k| k.to_string()).collect(),
            fail_lookup: false,
            fail_signing: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for FakeAssets {
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup {
            return Err(DomainError::Storage("bucket unreachable".into()));
        }
        Ok(self.present.contains(key))
    }

    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String, DomainError> {
        if self.fail_signing {
            return Err(DomainError::Storage("credentials expired".into()));
        }
        Ok(format!("https://assets.test/{key}?ttl={}", ttl.as_secs()))
    }
}

pub fn resolver(
    embedder: Arc<ScriptedEmbedder>,
    store: Arc<FakeStore>,
    model: Arc<ScriptedModel>,
    assets: Arc<FakeAssets>,
) -> ResolveUseCase {
    ResolveUseCase::new(
        embedder,
        store,
        Arbiter::new(model),
        Presenter::new(assets, Duration::from_secs(900)),
        3,
    )
}
