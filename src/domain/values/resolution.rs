use crate::domain::entities::recommendation::Recommendation;

/// Outcome of resolving one query.
///
/// Only [`Resolution::Recommended`] carries a result; every other variant maps
/// to a fixed user-facing message that never includes internal error text.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Recommended(Recommendation),
    EmptyQuery,
    EmbeddingFailed,
    NoMatch,
    RetrievalFailed,
}

impl Resolution {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Resolution::Recommended(_) => None,
            Resolution::EmptyQuery => Some("Please describe the Pokemon you're looking for."),
            Resolution::EmbeddingFailed => {
                Some("Failed to process your query (embedding generation failed).")
            }
            Resolution::NoMatch => Some("Could not find any potentially matching Pokemon."),
            Resolution::RetrievalFailed => Some("A database error occurred."),
        }
    }

    /// True for outcomes caused by a failing upstream service.
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Resolution::EmbeddingFailed | Resolution::RetrievalFailed)
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            Resolution::Recommended(r) => Some(r),
            _ => None,
        }
    }
}
