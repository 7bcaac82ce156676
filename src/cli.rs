//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Top-level CLI parser for `encyclopedia`.
#[derive(Debug, Parser)]
#[command(name = "encyclopedia", version, about = "Generate codebase summaries")]
pub struct Cli {
    /// Workspace root path.
    #[arg(long)]
    pub workspace: PathBuf,

    /// Path to the file list (one path per line).
    #[arg(long)]
    pub files: PathBuf,

    /// Anthropic API key (or set `ANTHROPIC_API_KEY`).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model used for every summary.
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum output tokens per summary.
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}
