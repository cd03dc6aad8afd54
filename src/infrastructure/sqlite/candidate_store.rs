use crate::domain::entities::candidate::{Candidate, CandidateRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::candidate_store::CandidateStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Candidates with their embeddings stored as little-endian `f32` blobs.
/// Nearest-neighbour search scans every row.
pub struct SqliteCandidateStore {
    conn: Mutex<Connection>,
}

impl SqliteCandidateStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))
    }

    /// `1 - cosine similarity`; `None` when lengths differ or a vector has zero norm.
    pub fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f64> {
        if a.len() != b.len() || a.is_empty() {
            return None;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 {
            None
        } else {
            Some(1.0 - dot / denom)
        }
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }
}

impl CandidateStore for SqliteCandidateStore {
    fn nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Candidate>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT name, description, embedding FROM candidates")?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let description: String = row.get(1)?;
            let blob: Vec<u8> = row.get(2)?;
            Ok((name, description, blob))
        })?;

        let mut scored: Vec<(f64, Candidate)> = Vec::new();
        let mut wrong_dim = 0usize;
        let mut zero_norm = 0usize;
        for row in rows {
            let (name, description, blob) = row?;
            let stored = Self::deserialize_vector(&blob);
            if stored.len() != vector.len() {
                wrong_dim += 1;
                continue;
            }
            match Self::cosine_distance(vector, &stored) {
                Some(distance) => scored.push((distance, Candidate { name, description })),
                None => zero_norm += 1,
            }
        }
        if wrong_dim > 0 {
            tracing::warn!(skipped = wrong_dim, query_dim = vector.len(), "skipped stored vectors with incompatible dimension");
        }
        if zero_norm > 0 {
            tracing::warn!(skipped = zero_norm, "skipped zero-norm vectors");
        }

        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored.into_iter().map(|(_, c)| c).collect())
    }

    fn upsert(&self, records: &[CandidateRecord]) -> Result<usize, DomainError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO candidates (name, description, embedding) VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.name,
                    record.description,
                    Self::serialize_vector(&record.embedding)
                ])
                .map_err(|e| DomainError::Database(format!("Failed to store {}: {e}", record.name)))?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM candidates", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    fn stored_dimension(&self) -> Result<Option<usize>, DomainError> {
        let conn = self.lock()?;
        let bytes: Option<i64> = conn
            .query_row("SELECT length(embedding) FROM candidates LIMIT 1", [], |r| r.get(0))
            .optional()?;
        Ok(bytes.map(|b| b as usize / 4))
    }
}
