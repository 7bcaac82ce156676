//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the summary generator and an
//! external system (time, filesystem, LLM). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod llm;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient, PortError};
