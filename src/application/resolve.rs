use crate::application::arbiter::Arbiter;
use crate::application::presenter::Presenter;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::ports::candidate_store::CandidateStore;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::values::query::Query;
use crate::domain::values::resolution::Resolution;
use std::sync::Arc;
use tracing::Instrument;

/// Query resolution: embed, retrieve, arbitrate, present.
///
/// Only an empty query, an embedding failure or a failed/empty retrieval end
/// the flow early. Arbitration and presentation degrade internally and always
/// produce a recommendation.
pub struct ResolveUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn CandidateStore>,
    arbiter: Arbiter,
    presenter: Presenter,
    top_k: usize,
}

impl ResolveUseCase {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn CandidateStore>,
        arbiter: Arbiter,
        presenter: Presenter,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            arbiter,
            presenter,
            top_k,
        }
    }

    pub async fn execute(&self, text: &str) -> Resolution {
        let query = match Query::parse(text) {
            Ok(q) => q,
            Err(_) => {
                tracing::info!("rejected empty query");
                return Resolution::EmptyQuery;
            }
        };

        let span = tracing::info_span!("resolve", query = %query.preview());
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: Query) -> Resolution {
        let vector = match self
            .embedder
            .embed_one(query.as_str(), InputType::Query)
            .instrument(tracing::info_span!("stage", name = "embedding"))
            .await
        {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(stage = "embedding", error = %e, "could not embed query");
                return Resolution::EmbeddingFailed;
            }
        };

        // The store is synchronous and scans every row.
        let store = self.store.clone();
        let top_k = self.top_k;
        let candidates = match tokio::task::spawn_blocking(move || store.nearest(&vector, top_k)).await {
            Ok(Ok(c)) => c,
            Ok(Err(e)) => {
                tracing::error!(stage = "retrieving", error = %e, "candidate retrieval failed");
                return Resolution::RetrievalFailed;
            }
            Err(e) => {
                tracing::error!(stage = "retrieving", error = %e, "retrieval task failed");
                return Resolution::RetrievalFailed;
            }
        };
        tracing::info!(stage = "retrieving", found = candidates.len(), "vector search complete");
        if candidates.is_empty() {
            return Resolution::NoMatch;
        }

        let choice = match self
            .arbiter
            .choose(&query, &candidates)
            .instrument(tracing::info_span!("stage", name = "arbitrating"))
            .await
        {
            Ok(c) => c,
            Err(_) => return Resolution::NoMatch,
        };

        // The arbiter only returns names from the candidate set.
        let description = candidates
            .iter()
            .find(|c| c.name == choice.name)
            .map(|c| c.description.clone())
            .unwrap_or_default();

        let image_url = self
            .presenter
            .attach_asset(&choice.name)
            .instrument(tracing::info_span!("stage", name = "presenting"))
            .await;

        Resolution::Recommended(Recommendation {
            name: choice.name,
            description,
            explanation: choice.explanation,
            image_url,
        })
    }
}
