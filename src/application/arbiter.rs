//! LLM arbitration over the nearest-neighbour shortlist.
//!
//! The model is asked to name one candidate on the first line of its answer
//! and justify it on the following lines. Whatever the model does, the
//! arbiter returns a [`Choice`] whose name belongs to the candidate set:
//! errors, empty answers and unknown names all fall back to the closest
//! candidate with a fixed explanation.

use crate::domain::entities::candidate::Candidate;
use crate::domain::error::DomainError;
use crate::domain::ports::language_model::LanguageModel;
use crate::domain::values::choice::{Choice, ChoiceSource};
use crate::domain::values::query::{preview, Query};
use std::fmt::Write;
use std::sync::Arc;

pub struct Arbiter {
    model: Arc<dyn LanguageModel>,
}

impl Arbiter {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Picks one candidate for `query`.
    ///
    /// Fails only when `candidates` is empty; callers treat that case as
    /// "no match" before getting here.
    pub async fn choose(&self, query: &Query, candidates: &[Candidate]) -> Result<Choice, DomainError> {
        if candidates.is_empty() {
            return Err(DomainError::InvalidInput("no candidates to choose from".into()));
        }

        let prompt = build_prompt(query, candidates);
        tracing::info!(model = self.model.name(), query = %query.preview(), "asking model to choose");
        let response = self.model.generate(&prompt).await;

        let choice = settle(response, candidates);
        if choice.source.is_fallback() {
            tracing::warn!(source = %choice.source, name = %choice.name, "falling back to closest candidate");
        } else {
            tracing::info!(name = %choice.name, "model recommended candidate");
        }
        Ok(choice)
    }
}

/// Builds the selection prompt listing every candidate with its description.
pub fn build_prompt(query: &Query, candidates: &[Candidate]) -> String {
    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();

    let mut prompt = format!(
        "You are a helpful Pokemon expert assistant.\n\
         A user is looking for a starter Pokemon and has provided the following request:\n\
         User Request: \"{query}\"\n\n\
         Based on their request, a search found the following top {} potential matches:\n",
        candidates.len()
    );
    for (i, candidate) in candidates.iter().enumerate() {
        let _ = write!(
            prompt,
            "\n{}. {}:\n   Description: {}\n---",
            i + 1,
            candidate.name,
            candidate.description
        );
    }
    let _ = write!(
        prompt,
        "\n\nAnalyze the user's request (\"{query}\") and the descriptions of the Pokemon provided.\n\
         Determine which *single* Pokemon from the list ({}) is the *best fit* for the user's request.\n\n\
         Your Response Format:\n\
         1. First line: ONLY the name of the recommended Pokemon.\n\
         2. Subsequent lines: A brief explanation (2-3 sentences) of *why* you recommend that specific Pokemon, \
         referencing the user's request and the Pokemon's description. Example:\n\
         Pikachu\n\
         Because you asked for something fast and electric, Pikachu fits perfectly with its speed and electric shocks.\n",
        names.join(", ")
    );
    prompt
}

/// Splits a model answer into `(name, explanation)`.
///
/// Returns `None` for blank text. A missing explanation is replaced by the
/// generic one.
pub fn parse_response(text: &str) -> Option<(String, String)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let name = first.trim().to_string();
    let explanation = match rest.trim() {
        "" => ChoiceSource::Model.fallback_explanation(&name),
        e => e.to_string(),
    };
    Some((name, explanation))
}

/// Applies the fallback ladder to a model response. Pure and deterministic.
///
/// `candidates` must be non-empty.
pub fn settle(response: Result<Option<String>, DomainError>, candidates: &[Candidate]) -> Choice {
    let top = &candidates[0];
    let fallback = |source: ChoiceSource| Choice {
        name: top.name.clone(),
        explanation: source.fallback_explanation(&top.name),
        source,
    };

    let text = match response {
        Err(e) => {
            tracing::error!(error = %e, "model call failed");
            return fallback(ChoiceSource::ModelError);
        }
        Ok(None) => return fallback(ChoiceSource::EmptyResponse),
        Ok(Some(text)) => text,
    };

    let Some((name, explanation)) = parse_response(&text) else {
        return fallback(ChoiceSource::EmptyResponse);
    };

    if candidates.iter().any(|c| c.name == name) {
        Choice {
            name,
            explanation,
            source: ChoiceSource::Model,
        }
    } else {
        let valid: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        tracing::warn!(recommended = %preview(&name), ?valid, "model chose a name outside the candidate set");
        fallback(ChoiceSource::InvalidSelection)
    }
}
