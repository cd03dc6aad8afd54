use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::infrastructure::http::error_for_status;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Google Generative Language `embedContent` client.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    dimension: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'static str,
    output_dimensionality: usize,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Option<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiProvider {
    pub fn new(client: Client, api_key: String, model: Option<String>, base_url: Option<String>, dimension: usize) -> Self {
        let model = model.unwrap_or_else(|| "text-embedding-004".to_string());
        Self {
            client,
            api_key,
            model: model.strip_prefix("models/").unwrap_or(&model).to_string(),
            base_url: base_url.unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
            dimension,
        }
    }

    async fn embed_single(&self, text: &str, input_type: InputType) -> Result<Vec<f32>, DomainError> {
        let task_type = match input_type {
            InputType::Document => "RETRIEVAL_DOCUMENT",
            InputType::Query => "RETRIEVAL_QUERY",
        };
        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        tracing::debug!(model = %self.model, chars = text.len(), "requesting embedding");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&EmbedRequest {
                model: format!("models/{}", self.model),
                content: Content { parts: [Part { text }] },
                task_type,
                output_dimensionality: self.dimension,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Gemini API error: {e}")))?;

        let resp = error_for_status(resp, "Gemini").await.map_err(DomainError::Embedding)?;
        let result: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        Ok(result.embedding.map(|e| e.values).unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for GeminiProvider {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        // embedContent takes one text per call
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_single(text, input_type).await?);
        }
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
