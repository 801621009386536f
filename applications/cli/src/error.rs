/// Application error types
use assistant_tasks::FatalError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Everything that makes the process exit with status 1
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected before any task is scheduled
    #[error("Error: {0}")]
    Config(String),

    #[error(transparent)]
    Fatal(#[from] FatalError),

    #[error("Error: failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Error: failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
