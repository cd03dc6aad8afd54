use crate::domain::error::DomainError;
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client for outbound provider calls, with a per-request timeout.
pub fn build_client(timeout: Duration) -> Result<Client, DomainError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pokefinder/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DomainError::Config(format!("failed to create HTTP client: {e}")))
}

/// Turns a non-2xx response into an error carrying status and body.
pub async fn error_for_status(resp: reqwest::Response, service: &str) -> Result<reqwest::Response, String> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(format!("{service} API {status}: {body}"))
}
