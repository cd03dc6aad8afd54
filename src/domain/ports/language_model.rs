use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Free-text generation backend used by the arbiter.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Name of the backing model, for logging.
    fn name(&self) -> &str;

    /// Generates a completion for `prompt`.
    ///
    /// `Ok(None)` means the call succeeded but produced no usable text
    /// (no candidates, blocked output, empty parts).
    async fn generate(&self, prompt: &str) -> Result<Option<String>, DomainError>;
}
