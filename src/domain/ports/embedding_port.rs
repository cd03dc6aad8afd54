use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Document,
    Query,
}

#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Dimensionality every returned vector must have.
    fn dimension(&self) -> usize;

    /// Embeds a single text and checks it against [`EmbeddingProvider::dimension`].
    /// A vector of the wrong length or an all-zero vector is an error.
    async fn embed_one(&self, text: &str, input_type: InputType) -> Result<Vec<f32>, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::InvalidInput("cannot embed empty text".into()));
        }
        let vector = self
            .embed(&[text.to_string()], input_type)
            .await?
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DomainError::Embedding("provider returned no embedding".into()))?;

        let expected = self.dimension();
        if vector.len() != expected {
            tracing::warn!(expected, actual = vector.len(), "embedding dimension mismatch");
            return Err(DomainError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        if vector.iter().all(|x| *x == 0.0) {
            return Err(DomainError::Embedding("provider returned a zero vector".into()));
        }
        Ok(vector)
    }
}
