use crate::domain::error::DomainError;
use crate::domain::values::query::preview;
use crate::domain::values::resolution::Resolution;
use crate::web::render;
use crate::web::AppState;
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetParams {
    pub expires: i64,
    pub signature: String,
}

pub async fn index() -> Html<String> {
    Html(render::page("", None, None))
}

pub async fn recommend(State(state): State<AppState>, Form(form): Form<QueryForm>) -> (StatusCode, Html<String>) {
    tracing::info!(query = %preview(&form.query_text), "received query");
    let resolution = state.finder.recommend(&form.query_text).await;

    let status = if resolution.is_service_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    let body = match &resolution {
        Resolution::Recommended(r) => render::page(&form.query_text, Some(r), None),
        other => render::page(&form.query_text, None, other.message()),
    };
    (status, Html(body))
}

pub async fn asset(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<AssetParams>,
) -> Response {
    if let Err(e) = state.assets.verify(&key, params.expires, &params.signature) {
        tracing::warn!(%key, error = %e, "rejected asset request");
        return StatusCode::FORBIDDEN.into_response();
    }
    match state.assets.read(&key).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(DomainError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(DomainError::InvalidInput(_)) => StatusCode::BAD_REQUEST.into_response(),
        Err(e) => {
            tracing::error!(%key, error = %e, "failed to read asset");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
