//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        Ok(std::fs::read(path)?)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), bytes = contents.len(), "writing file");
        Ok(std::fs::write(path, contents)?)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::create_dir_all(path)?)
    }
}
