/// Task runner errors
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias using `TaskError`
pub type Result<T> = std::result::Result<T, TaskError>;

/// Errors raised by the runner itself rather than by task work
#[derive(Error, Debug)]
pub enum TaskError {
    /// A handle this task waited on resolved with a failure
    #[error("dependency failed: {0}")]
    DependencyFailed(TaskFailure),

    /// Task work panicked
    #[error("task panicked: {0}")]
    Panicked(String),

    /// A blocking worker of a files stage could not be joined
    #[error("worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Failure a handle resolves with
///
/// Cheap to clone, since every dependent awaiting the handle receives a copy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Task \"{task}\" failed: {message}")]
pub struct TaskFailure {
    pub task: Arc<str>,
    pub message: Arc<str>,
}

impl TaskFailure {
    pub(crate) fn new(task: &Arc<str>, message: impl fmt::Display) -> Self {
        Self {
            task: Arc::clone(task),
            message: message.to_string().into(),
        }
    }
}

/// The single failure that ends a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    pub task: String,
    pub details: String,
    /// Full error chain, only kept in debug mode
    pub trace: Option<String>,
}

impl FatalError {
    pub fn new(task: impl Into<String>, error: &anyhow::Error, debug: bool) -> Self {
        let message = format!("{error:#}");
        let details = if message.trim().is_empty() {
            format!("{:?}", error.root_cause())
        } else {
            message
        };

        Self {
            task: task.into(),
            details,
            trace: debug.then(|| format!("{error:?}")),
        }
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: Task \"{}\" failed: {}", self.task, self.details)?;
        if let Some(trace) = &self.trace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FatalError {}
