/// File handling utilities
///
/// This module validates the input path and reads the source text in one go.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

/// Reasons the source text could not be obtained
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No input path was given
    #[error("missing input path")]
    MissingInputPath,

    /// The path exists but is not a regular file (directory, device, fifo)
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },

    /// The file could not be opened or read
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the whole source file into memory.
///
/// The handle is closed before this returns, on success and on error.
/// Content that is not valid UTF-8 is reported as unreadable.
pub fn read_source(file_path: &Path) -> Result<String, SourceError> {
    if file_path.as_os_str().is_empty() {
        return Err(SourceError::MissingInputPath);
    }
    // A path that cannot be stat'ed is left to the read below.
    if let Ok(metadata) = fs::metadata(file_path) {
        if !metadata.is_file() {
            return Err(SourceError::NotAFile {
                path: file_path.to_path_buf(),
            });
        }
    }

    let content = fs::read_to_string(file_path).map_err(|source| SourceError::Unreadable {
        path: file_path.to_path_buf(),
        source,
    })?;

    info!("Read {} bytes from {}", content.len(), file_path.display());
    Ok(content)
}
