//! Sidecar metadata written next to each summary.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::layout;

/// Provenance record stored as `<name>.json` beside `<name>.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// Source path relative to the workspace.
    pub source_file: String,
    /// Summary path relative to the docs root.
    pub summary_file: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
}

impl SummaryMetadata {
    /// Builds the record for a workspace-relative source generated at `at`.
    #[must_use]
    pub fn new(relative: &Path, at: DateTime<Utc>) -> Self {
        Self {
            source_file: relative.display().to_string(),
            summary_file: layout::summary_relative(relative).display().to_string(),
            generated_at: at.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("failed to serialize metadata: {e}"))
    }
}
