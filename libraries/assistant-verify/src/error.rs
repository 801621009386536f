/// Verification errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `VerifyError`
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Verification error types
///
/// A missing file is a finding, not an error; these all end the run.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// An existing file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to list files: {0}")]
    Walk(#[from] walkdir::Error),

    /// A worker of the files stage failed
    #[error(transparent)]
    Task(#[from] assistant_tasks::TaskError),
}

impl VerifyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
