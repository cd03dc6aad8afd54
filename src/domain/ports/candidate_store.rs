use crate::domain::entities::candidate::{Candidate, CandidateRecord};
use crate::domain::error::DomainError;

pub trait CandidateStore: Send + Sync {
    /// Up to `k` candidates ordered by ascending cosine distance to `vector`.
    fn nearest(&self, vector: &[f32], k: usize) -> Result<Vec<Candidate>, DomainError>;
    /// Inserts or replaces records by name. Returns the number written.
    fn upsert(&self, records: &[CandidateRecord]) -> Result<usize, DomainError>;
    fn count(&self) -> Result<usize, DomainError>;
    fn stored_dimension(&self) -> Result<Option<usize>, DomainError>;
}
