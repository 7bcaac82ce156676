//! Service context bundling all port trait objects.

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::llm::LiveLlmClient;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. [`ServiceContext::live`]
/// wires the real adapters; tests build the struct directly from fakes.
pub struct ServiceContext {
    /// Clock for sidecar timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for reading sources and writing summaries.
    pub fs: Box<dyn FileSystem>,
    /// LLM client for language-model completions.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context talking to the real disk, clock and Anthropic API.
    #[must_use]
    pub fn live(api_key: &str) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            llm: Box::new(LiveLlmClient::new(api_key)),
        }
    }
}
