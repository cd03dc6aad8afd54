use serde::Serialize;
use std::fmt;

/// Which rung of the arbitration ladder produced a [`Choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceSource {
    /// The model picked a valid candidate.
    Model,
    /// The model call failed.
    ModelError,
    /// The model answered with no usable text.
    EmptyResponse,
    /// The model named something outside the candidate set.
    InvalidSelection,
}

impl ChoiceSource {
    /// Explanation used when this source forces a fallback to the top candidate.
    pub fn fallback_explanation(&self, name: &str) -> String {
        match self {
            ChoiceSource::ModelError => format!(
                "Based on similarity, {name} seems like a good starting point (LLM refinement failed)."
            ),
            ChoiceSource::EmptyResponse => {
                format!("Based on similarity, {name} seems like a good starting point.")
            }
            ChoiceSource::InvalidSelection => {
                format!("{name} had the closest description match to your request.")
            }
            ChoiceSource::Model => {
                "This Pokemon seems like a good match for your request.".to_string()
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, ChoiceSource::Model)
    }
}

impl fmt::Display for ChoiceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceSource::Model => write!(f, "model"),
            ChoiceSource::ModelError => write!(f, "model_error"),
            ChoiceSource::EmptyResponse => write!(f, "empty_response"),
            ChoiceSource::InvalidSelection => write!(f, "invalid_selection"),
        }
    }
}

/// The arbiter's pick: always a name drawn from the candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: String,
    pub explanation: String,
    pub source: ChoiceSource,
}
