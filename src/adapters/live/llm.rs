//! Live adapter for the `LlmClient` port using the Anthropic messages API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::PortError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Live LLM client that calls the Anthropic Claude API.
pub struct LiveLlmClient {
    client: Client,
    api_key: String,
}

impl LiveLlmClient {
    /// Creates a new live LLM client authenticating with `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { client: Client::new(), api_key: api_key.into() }
    }
}

/// Request body sent to the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<AnthropicMessage<'a>>,
}

/// A single message in the Anthropic API request.
#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

/// A content block in the Anthropic response. Non-text blocks carry no `text`.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Token usage reported by the Anthropic API.
#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Error response from the Anthropic API.
#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

/// Detail inside an Anthropic error response.
#[derive(Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = AnthropicRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                temperature: request.temperature,
                messages: vec![AnthropicMessage { role: "user", content: &request.prompt }],
            };

            tracing::debug!(
                model = %request.model,
                prompt_chars = request.prompt.chars().count(),
                "sending Anthropic messages request"
            );

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> PortError { format!("Anthropic API request failed: {e}").into() })?;

            let status = response.status();
            let response_text = response.text().await.map_err(|e| -> PortError {
                format!("Failed to read Anthropic API response: {e}").into()
            })?;

            parse_response(status, &response_text)
        })
    }
}

/// Turns a raw Anthropic HTTP response into a [`CompletionResponse`].
///
/// Only the first content block is used.
fn parse_response(status: StatusCode, body: &str) -> Result<CompletionResponse, PortError> {
    if !status.is_success() {
        let msg = serde_json::from_str::<AnthropicError>(body)
            .map_or_else(|_| body.to_string(), |e| e.error.message);
        return Err(format!("Anthropic API error ({}): {msg}", status.as_u16()).into());
    }

    let api_response: AnthropicResponse = serde_json::from_str(body)
        .map_err(|e| -> PortError { format!("Failed to parse Anthropic API response: {e}").into() })?;

    let first = api_response
        .content
        .into_iter()
        .next()
        .ok_or_else(|| -> PortError { "Anthropic API response contained no content".into() })?;
    let text = first.text.ok_or_else(|| -> PortError {
        format!("first Anthropic content block is `{}`, not text", first.kind).into()
    })?;

    tracing::debug!(
        input_tokens = api_response.usage.input_tokens,
        output_tokens = api_response.usage.output_tokens,
        "Anthropic response received"
    );

    Ok(CompletionResponse {
        text,
        prompt_tokens: api_response.usage.input_tokens,
        completion_tokens: api_response.usage.output_tokens,
    })
}
