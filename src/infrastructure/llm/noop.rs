use crate::domain::error::DomainError;
use crate::domain::ports::language_model::LanguageModel;

/// Stand-in when no model is configured. Always answers with no text, so the
/// arbiter settles on the closest candidate.
pub struct NoopModel;

#[async_trait::async_trait]
impl LanguageModel for NoopModel {
    fn name(&self) -> &str {
        "noop"
    }

    async fn generate(&self, _prompt: &str) -> Result<Option<String>, DomainError> {
        Ok(None)
    }
}
