pub mod gemini;
pub mod openai;
pub mod provider;


pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{select_provider, Provider, ProviderKind};

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};
use trendseed_core::{CoreError, LlmError};

pub trait LlmProvider {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, CoreError>;
}

fn http_client(timeout: Duration) -> Result<Client, CoreError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Sends `body` as JSON and returns the raw response text of a 2xx reply.
///
/// Transport errors are stripped of their URL, since the Gemini key travels
/// in the query string.
async fn post_json<B: Serialize>(
    request: RequestBuilder,
    provider: &str,
    body: &B,
) -> Result<String, CoreError> {
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| CoreError::Network(e.without_url()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| CoreError::Network(e.without_url()))?;

    if !status.is_success() {
        error!("HTTP error from {}: {}", provider, status);
        return Err(LlmError::HttpStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: text,
        }
        .into());
    }

    debug!("Received {} bytes from {}", text.len(), provider);
    Ok(text)
}

fn invalid_response(provider: &str, details: impl Into<String>) -> CoreError {
    LlmError::InvalidResponseFormat {
        provider: provider.to_string(),
        details: details.into(),
    }
    .into()
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
