use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use trendseed_core::CoreError;

use crate::{http_client, invalid_response, join_url, post_json, LlmProvider};

const PROVIDER_NAME: &str = "Gemini";

pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            api_key,
            model,
            base_url,
            client: http_client(timeout)?,
        })
    }

    fn endpoint(&self) -> String {
        join_url(
            &self.base_url,
            &format!("/v1beta/models/{}:generateContent", self.model),
        )
    }
}

// === Request Structs ===
#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

// === Response Structs ===
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPartOwned>,
}

#[derive(Deserialize)]
struct TextPartOwned {
    text: Option<String>,
}

fn extract_text(raw: &str) -> Result<String, CoreError> {
    let parsed: GeminiResponse = serde_json::from_str(raw)
        .map_err(|e| invalid_response(PROVIDER_NAME, e.to_string()))?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| invalid_response(PROVIDER_NAME, "missing candidates[0].content.parts[0].text"))
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, CoreError> {
        debug!("Querying Gemini with a {} character prompt", prompt.chars().count());

        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let request = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())]);
        let raw = post_json(request, PROVIDER_NAME, &request_body).await?;

        extract_text(&raw)
    }
}
