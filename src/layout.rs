//! Output layout: where each source file's summary and sidecar live.
//!
//! ```text
//! <workspace>/
//!   └── docs/codebase/
//!         └── src/foo/
//!               ├── bar.md     (summary)
//!               └── bar.json   (sidecar metadata)
//! ```

use std::path::{Component, Path, PathBuf};

/// A file-list entry resolved against the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Path used to read the file.
    pub source: PathBuf,
    /// Path relative to the workspace root, mirrored under the docs root.
    pub relative: PathBuf,
}

impl SourceEntry {
    /// The source file's extension with its leading dot, or empty.
    #[must_use]
    pub fn extension(&self) -> String {
        self.relative
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// Returns the directory summaries are written under.
#[must_use]
pub fn docs_root(workspace: &Path) -> PathBuf {
    workspace.join("docs").join("codebase")
}

/// Resolves a file-list entry against `workspace`.
///
/// Entries under the workspace are made relative to it. Other relative entries
/// are taken as already relative to the workspace.
///
/// # Errors
///
/// Returns an error if an absolute entry lies outside the workspace, or if the
/// relative path is empty or climbs out with `..`.
pub fn resolve_entry(workspace: &Path, entry: &str) -> Result<SourceEntry, String> {
    let path = Path::new(entry);
    let (source, relative) = if let Ok(stripped) = path.strip_prefix(workspace) {
        (path.to_path_buf(), stripped.to_path_buf())
    } else if path.is_relative() {
        (workspace.join(path), path.to_path_buf())
    } else {
        return Err(format!("{entry} is not under workspace {}", workspace.display()));
    };

    let relative: PathBuf =
        relative.components().filter(|c| !matches!(c, Component::CurDir)).collect();
    if relative.as_os_str().is_empty() {
        return Err(format!("{entry} does not name a file inside the workspace"));
    }
    if relative.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(format!("{entry} escapes the workspace"));
    }

    Ok(SourceEntry { source, relative })
}

/// Relative path of the summary for `relative` (extension replaced by `.md`).
#[must_use]
pub fn summary_relative(relative: &Path) -> PathBuf {
    relative.with_extension("md")
}

/// Absolute summary path and sidecar path for a workspace-relative source.
#[must_use]
pub fn output_paths(docs_root: &Path, relative: &Path) -> (PathBuf, PathBuf) {
    let summary = docs_root.join(summary_relative(relative));
    let sidecar = summary.with_extension("json");
    (summary, sidecar)
}
