use tracing::info;
use trendseed_core::{ConfigError, CoreError, Credentials, KeywordConfig};

use crate::{GeminiProvider, LlmProvider, OpenAiProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

/// Picks the provider for the credentials at hand. Gemini wins when both
/// keys are set.
pub fn select_provider(credentials: &Credentials) -> Result<(ProviderKind, &str), ConfigError> {
    if let Some(key) = credentials.gemini_api_key.as_deref() {
        return Ok((ProviderKind::Gemini, key));
    }
    if let Some(key) = credentials.openai_api_key.as_deref() {
        return Ok((ProviderKind::OpenAi, key));
    }
    Err(credentials.missing_error())
}

pub enum Provider {
    Gemini(GeminiProvider),
    OpenAi(OpenAiProvider),
}

impl Provider {
    pub fn from_config(
        config: &KeywordConfig,
        credentials: &Credentials,
    ) -> Result<Self, CoreError> {
        let (kind, api_key) = select_provider(credentials)?;
        let provider = match kind {
            ProviderKind::Gemini => Provider::Gemini(GeminiProvider::new(
                api_key.to_string(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
                config.request_timeout(),
            )?),
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiProvider::new(
                api_key.to_string(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
                config.request_timeout(),
            )?),
        };

        info!(
            kind = ?provider.kind(),
            "Using {} API to generate keywords",
            provider.name()
        );
        Ok(provider)
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Gemini(_) => ProviderKind::Gemini,
            Provider::OpenAi(_) => ProviderKind::OpenAi,
        }
    }
}

impl LlmProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::Gemini(p) => p.name(),
            Provider::OpenAi(p) => p.name(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, CoreError> {
        match self {
            Provider::Gemini(p) => p.generate(prompt).await,
            Provider::OpenAi(p) => p.generate(prompt).await,
        }
    }
}
