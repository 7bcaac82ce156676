//! Run configuration: API key resolution, file lists and model settings.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Environment variable consulted when `--api-key` is not given.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Model used when `--model` is not given.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Output token cap used when `--max-tokens` is not given.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Settings applied to every completion request in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Model identifier.
    pub model: String,
    /// Maximum output tokens per summary.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self { model: DEFAULT_MODEL.to_string(), max_tokens: DEFAULT_MAX_TOKENS, temperature: 0.0 }
    }
}

/// Picks the API key from the argument, falling back to the environment value.
///
/// Empty values count as missing.
///
/// # Errors
///
/// Returns an error when neither source provides a key.
pub fn resolve_api_key(arg: Option<&str>, env_value: Option<String>) -> Result<String, String> {
    arg.map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| env_value.filter(|key| !key.trim().is_empty()))
        .ok_or_else(|| format!("ERROR: API key required. Set {API_KEY_ENV} or use --api-key"))
}

/// Rewrites `\r\n` and lone `\r` line breaks as `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits a newline-delimited file list, trimming entries and dropping blanks.
///
/// Any line-break convention is accepted.
#[must_use]
pub fn parse_file_list(contents: &str) -> Vec<String> {
    normalize_newlines(contents)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads and parses the file list at `path`.
///
/// # Errors
///
/// Returns an error if the list cannot be read or contains no entries.
pub fn load_file_list(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>, String> {
    let contents = fs
        .read_to_string(path)
        .map_err(|e| format!("ERROR: Failed to read file list {}: {e}", path.display()))?;
    let files = parse_file_list(&contents);
    if files.is_empty() {
        return Err("ERROR: No files to process".to_string());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_wins_over_environment() {
        let key = resolve_api_key(Some("from-arg"), Some("from-env".into())).unwrap();
        assert_eq!(key, "from-arg");
    }

    #[test]
    fn falls_back_to_environment() {
        let key = resolve_api_key(None, Some("from-env".into())).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn empty_argument_falls_back_to_environment() {
        let key = resolve_api_key(Some(""), Some("from-env".into())).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(err.contains("API key required"));
        assert!(resolve_api_key(None, Some("  ".into())).is_err());
    }

    #[test]
    fn file_list_skips_blank_lines_and_trims() {
        let files = parse_file_list("src/a.rs\n\n   \n  src/b.rs  \r\nsrc/c.rs");
        assert_eq!(files, vec!["src/a.rs", "src/b.rs", "src/c.rs"]);
    }

    #[test]
    fn file_list_splits_on_lone_carriage_returns() {
        let files = parse_file_list("src/a.rs\rsrc/b.rs\r\rsrc/c.rs\r\n");
        assert_eq!(files, vec!["src/a.rs", "src/b.rs", "src/c.rs"]);
    }

    #[test]
    fn normalize_newlines_handles_crlf_and_lone_cr() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize_newlines("\r\r\n"), "\n\n");
    }

    #[test]
    fn blank_only_file_list_is_empty() {
        assert!(parse_file_list("\n \n\t\n").is_empty());
    }

    #[test]
    fn default_settings_are_deterministic() {
        let settings = RunSettings::default();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.max_tokens, 4096);
        assert!(settings.temperature.abs() < f32::EPSILON);
    }
}
