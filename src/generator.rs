//! Summary generation: the per-file read, prompt, complete and save loop.
//!
//! Files are processed one at a time in list order. A failure on one file is
//! reported and skipped; it never stops the batch.

use std::path::{Path, PathBuf};

use crate::config::{self, RunSettings};
use crate::context::ServiceContext;
use crate::layout::{self, SourceEntry};
use crate::metadata::SummaryMetadata;
use crate::ports::llm::CompletionRequest;
use crate::prompt;

/// A file that could not be summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// The file-list entry as given.
    pub file: String,
    /// What went wrong.
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of entries in the file list.
    pub total: usize,
    /// Number of summaries written.
    pub succeeded: usize,
    /// Entries that failed, in list order.
    pub failures: Vec<FileFailure>,
}

/// Generates summaries for files under one workspace.
pub struct SummaryGenerator<'a> {
    ctx: &'a ServiceContext,
    workspace: PathBuf,
    docs_root: PathBuf,
    settings: RunSettings,
}

impl<'a> SummaryGenerator<'a> {
    /// Creates a generator writing under `<workspace>/docs/codebase`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, workspace: &Path, settings: RunSettings) -> Self {
        Self {
            ctx,
            workspace: workspace.to_path_buf(),
            docs_root: layout::docs_root(workspace),
            settings,
        }
    }

    /// Directory summaries are written under.
    #[must_use]
    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Summarizes every entry of `files` in order, printing progress to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error only if the docs root cannot be created. Per-file
    /// failures are logged to stderr and collected in the report.
    pub async fn generate_summaries(&self, files: &[String]) -> Result<RunReport, String> {
        self.ctx.fs.create_dir_all(&self.docs_root).map_err(|e| {
            format!("ERROR: Failed to create output directory {}: {e}", self.docs_root.display())
        })?;

        let total = files.len();
        let mut report = RunReport { total, ..RunReport::default() };

        for (idx, file) in files.iter().enumerate() {
            match self.generate_one(idx + 1, total, file).await {
                Ok(()) => report.succeeded += 1,
                Err(message) => {
                    eprintln!("ERROR: Failed to process {file}: {message}");
                    report.failures.push(FileFailure { file: file.clone(), message });
                }
            }
        }

        tracing::info!(
            total,
            succeeded = report.succeeded,
            failed = report.failures.len(),
            "summary run finished"
        );
        Ok(report)
    }

    async fn generate_one(&self, idx: usize, total: usize, file: &str) -> Result<(), String> {
        let entry = layout::resolve_entry(&self.workspace, file)?;
        println!("Processing {idx}/{total}: {}", entry.relative.display());

        let summary = self.process(&entry).await?;
        self.save(&entry.relative, &summary)
    }

    /// Reads one source file, asks the model for a summary, and returns its text.
    ///
    /// Undecodable bytes in the source are dropped and line breaks are
    /// normalized to `\n` before the prompt budget is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the completion fails.
    pub async fn process(&self, entry: &SourceEntry) -> Result<String, String> {
        let bytes = self.ctx.fs.read(&entry.source).map_err(|e| e.to_string())?;
        let content = config::normalize_newlines(&decode_ignoring_invalid(&bytes));

        let relative = entry.relative.display().to_string();
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt: prompt::build_analysis_prompt(&relative, &entry.extension(), &content),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self.ctx.llm.complete(&request).await.map_err(|e| e.to_string())?;
        tracing::debug!(
            file = %relative,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "summary generated"
        );
        Ok(response.text)
    }

    /// Writes `summary` verbatim and its metadata sidecar for a
    /// workspace-relative source path.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save(&self, relative: &Path, summary: &str) -> Result<(), String> {
        let (summary_path, sidecar_path) = layout::output_paths(&self.docs_root, relative);

        self.ctx
            .fs
            .write(&summary_path, summary)
            .map_err(|e| format!("failed to write {}: {e}", summary_path.display()))?;

        let metadata = SummaryMetadata::new(relative, self.ctx.clock.now()).to_json()?;
        self.ctx
            .fs
            .write(&sidecar_path, &metadata)
            .map_err(|e| format!("failed to write {}: {e}", sidecar_path.display()))
    }
}

/// Decodes UTF-8, silently skipping invalid byte sequences.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
