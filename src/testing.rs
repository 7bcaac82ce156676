//! In-memory port fakes shared by unit tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::context::ServiceContext;
use crate::ports::{
    Clock, CompletionFuture, CompletionRequest, CompletionResponse, FileSystem, LlmClient,
    PortError,
};

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Filesystem held in a shared map so tests can inspect it after a run.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    pub files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
    pub dirs: Arc<Mutex<Vec<PathBuf>>>,
    /// Writes to paths containing this fragment fail.
    pub fail_writes_containing: Option<String>,
}

impl MemoryFileSystem {
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.lock().unwrap().insert(path.into(), contents.into());
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("No such file or directory: {}", path.display()).into())
    }

    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(fragment) = &self.fail_writes_containing {
            if path.to_string_lossy().contains(fragment.as_str()) {
                return Err(format!("Permission denied: {}", path.display()).into());
            }
        }
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// LLM fake that records every request and answers with a canned summary.
#[derive(Clone, Default)]
pub struct RecordingLlm {
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Requests whose prompt contains this fragment fail.
    pub fail_when_prompt_contains: Option<String>,
}

impl RecordingLlm {
    pub fn prompts(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.prompt.clone()).collect()
    }
}

impl LlmClient for RecordingLlm {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        self.requests.lock().unwrap().push(request.clone());
        let fail = self
            .fail_when_prompt_contains
            .as_ref()
            .is_some_and(|fragment| request.prompt.contains(fragment.as_str()));
        let call = self.requests.lock().unwrap().len();

        Box::pin(async move {
            if fail {
                return Err(PortError::from("Anthropic API error (529): Overloaded"));
            }
            Ok(CompletionResponse {
                text: format!("# summary {call}\n"),
                prompt_tokens: 10,
                completion_tokens: 5,
            })
        })
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-06-15T10:00:00Z").unwrap().with_timezone(&Utc)
}

pub fn context(fs: &MemoryFileSystem, llm: &RecordingLlm) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock(fixed_time())),
        fs: Box::new(fs.clone()),
        llm: Box::new(llm.clone()),
    }
}
