//! LLM client port for language-model completions.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Error type shared by every port.
pub type PortError = Box<dyn Error + Send + Sync>;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, PortError>> + Send + 'a>>;

/// A request to generate a completion from an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model identifier (e.g. `"claude-sonnet-4-20250514"`).
    pub model: String,
    /// The prompt sent as a single user message.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature; `0.0` for deterministic output.
    pub temperature: f32,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Text of the first content block.
    pub text: String,
    /// Number of prompt tokens consumed.
    pub prompt_tokens: u32,
    /// Number of completion tokens generated.
    pub completion_tokens: u32,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit, etc.).
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
