//! Filesystem port for file I/O operations.

use std::path::Path;

use super::PortError;

/// Provides filesystem access for reading sources and writing summaries.
pub trait FileSystem: Send + Sync {
    /// Reads the raw bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError>;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating parent directories and
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Creates a directory and all of its missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;
}
