use std::fmt;

/// Lifecycle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Spawned, waiting for dependencies or for the work to signal start
    Waiting,
    Running,
    Completed,
    Error,
}

impl TaskState {
    /// Whether `next` may follow `self`.
    ///
    /// States only move forward and both terminal states are final.
    pub fn can_transition_to(self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (TaskState::Waiting, TaskState::Running)
                | (
                    TaskState::Waiting | TaskState::Running,
                    TaskState::Completed | TaskState::Error
                )
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Error)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Waiting => "WAITING",
            TaskState::Running => "RUNNING",
            TaskState::Completed => "COMPLETED",
            TaskState::Error => "ERROR",
        };
        f.write_str(name)
    }
}
