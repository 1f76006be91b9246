pub mod iss_position;
pub mod sun_times;

#[cfg(test)]
pub(crate) mod fake_provider;

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} unavailable: {reason}")]
    Unavailable { provider: &'static str, reason: String },
    #[error("{provider} returned an unexpected response: {reason}")]
    Malformed { provider: &'static str, reason: String },
}

impl ProviderError {
    fn unavailable(provider: &'static str, reason: impl ToString) -> Self {
        Self::Unavailable { provider, reason: reason.to_string() }
    }

    fn malformed(provider: &'static str, reason: impl ToString) -> Self {
        Self::Malformed { provider, reason: reason.to_string() }
    }
}

/// Shared HTTP client for both providers.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::unavailable("http client", e))
}

/// GET `url` and decode the JSON body. Transport errors and non-2xx statuses
/// are `Unavailable`; an undecodable body is `Malformed`.
async fn get_json<T: serde::de::DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let resp = request
        .send()
        .await
        .map_err(|e| ProviderError::unavailable(provider, e))?;

    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(provider, status = ?status, "Non-success response");
        return Err(ProviderError::unavailable(provider, format!("HTTP {status}")));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| ProviderError::unavailable(provider, e))?;
    serde_json::from_str(&body).map_err(|e| ProviderError::malformed(provider, e))
}
