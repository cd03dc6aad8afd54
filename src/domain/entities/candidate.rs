use serde::{Deserialize, Serialize};

/// A stored record returned by nearest-neighbour retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub description: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A candidate together with its embedding, as written by ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub name: String,
    pub description: String,
    pub embedding: Vec<f32>,
}
