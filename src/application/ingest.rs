use crate::domain::entities::candidate::CandidateRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::candidate_store::CandidateStore;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Batch pipeline: match files, read, embed, write.
pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn CandidateStore>,
    concurrency: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngestFailure {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct IngestReport {
    pub files_matched: usize,
    pub records_written: usize,
    pub failures: Vec<IngestFailure>,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn CandidateStore>, concurrency: usize) -> Self {
        Self {
            embedder,
            store,
            concurrency: concurrency.max(1),
        }
    }

    /// Runs the pipeline over every file matching `pattern`.
    ///
    /// Per-file problems are collected into the report; only a bad pattern,
    /// zero matches or a store error abort the run.
    pub async fn execute(&self, pattern: &str) -> Result<IngestReport, DomainError> {
        let paths = match_files(pattern)?;
        if paths.is_empty() {
            tracing::error!(%pattern, "no files matched the input pattern");
            return Err(DomainError::NotFound(format!("no files match {pattern}")));
        }
        for path in &paths {
            tracing::info!(path = %path.display(), "matched file");
        }

        let outcomes: Vec<Result<CandidateRecord, IngestFailure>> = stream::iter(paths.iter())
            .map(|path| self.process(path))
            .buffered(self.concurrency)
            .collect()
            .await;

        // Outcomes follow the sorted path order, so the first file claiming a name keeps it.
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (path, outcome) in paths.iter().zip(outcomes) {
            let outcome = outcome.and_then(|record| {
                if seen.insert(record.name.clone()) {
                    Ok(record)
                } else {
                    Err(IngestFailure {
                        path: path.display().to_string(),
                        reason: format!("Duplicate name {} for {}", record.name, path.display()),
                    })
                }
            });
            match outcome {
                Ok(record) => records.push(record),
                Err(failure) => {
                    tracing::error!(path = %failure.path, reason = %failure.reason, "failed record");
                    failures.push(failure);
                }
            }
        }
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        let records_written = if records.is_empty() { 0 } else { self.store.upsert(&records)? };
        tracing::info!(
            matched = paths.len(),
            written = records_written,
            failed = failures.len(),
            "ingestion finished"
        );

        Ok(IngestReport {
            files_matched: paths.len(),
            records_written,
            failures,
        })
    }

    async fn process(&self, path: &Path) -> Result<CandidateRecord, IngestFailure> {
        let shown = path.display().to_string();
        let fail = |reason: String| IngestFailure {
            path: shown.clone(),
            reason,
        };
        tracing::info!(path = %shown, "processing file");

        let name = name_from_path(path).ok_or_else(|| fail(format!("Name extraction failed for {shown}")))?;

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| fail(format!("Could not read {shown}: {e}")))?;
        let description = content.trim().to_string();
        if description.is_empty() {
            tracing::warn!(path = %shown, "file is empty");
            return Err(fail(format!("Empty content for {shown}")));
        }

        let embedding = self
            .embedder
            .embed_one(&description, InputType::Document)
            .await
            .map_err(|e| fail(format!("Embedding failed for {shown}: {e}")))?;

        tracing::info!(%name, "processed file");
        Ok(CandidateRecord {
            name,
            description,
            embedding,
        })
    }
}

/// Expands a glob pattern into a sorted list of regular files.
pub fn match_files(pattern: &str) -> Result<Vec<PathBuf>, DomainError> {
    let entries = glob::glob(pattern).map_err(|e| DomainError::InvalidInput(format!("bad pattern {pattern}: {e}")))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable path while matching");
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Display name derived from a file stem: `pikachu.txt` becomes `Pikachu`.
pub fn name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?.trim();
    let mut chars = stem.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect())
}
