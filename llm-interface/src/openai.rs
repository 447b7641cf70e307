use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use trendseed_core::CoreError;

use crate::{http_client, invalid_response, join_url, post_json, LlmProvider};

const PROVIDER_NAME: &str = "OpenAI";

pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
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
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_content(raw: &str) -> Result<String, CoreError> {
    let parsed: ChatResponse = serde_json::from_str(raw)
        .map_err(|e| invalid_response(PROVIDER_NAME, e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| invalid_response(PROVIDER_NAME, "missing choices[0].message.content"))
}

impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, CoreError> {
        debug!("Querying OpenAI with a {} character prompt", prompt.chars().count());

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let request = self
            .client
            .post(join_url(&self.base_url, "/v1/chat/completions"))
            .bearer_auth(&self.api_key);
        let raw = post_json(request, PROVIDER_NAME, &request_body).await?;

        extract_content(&raw)
    }
}
