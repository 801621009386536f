//! Per-task progress line and the scope handed to task work

use crate::files::FilesProgress;
use crate::runner::RunnerContext;
use crate::state::TaskState;
use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub(crate) const TICK_INTERVAL: Duration = Duration::from_millis(125);
const SPINNER_FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

fn line_style(state: TaskState) -> ProgressStyle {
    let template = match state {
        TaskState::Waiting => "  {prefix:.dim} {wide_msg:.dim}",
        TaskState::Running => "{spinner:.cyan} {prefix} {wide_msg:.dim}",
        TaskState::Completed => "{prefix:.green} {wide_msg:.dim}",
        TaskState::Error => "{prefix:.red} {wide_msg:.red}",
    };
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_FRAMES)
}

fn line_prefix(state: TaskState, name: &str) -> String {
    match state {
        TaskState::Completed => format!("✔ {name}"),
        TaskState::Error => format!("✖ {name}"),
        TaskState::Waiting | TaskState::Running => name.to_string(),
    }
}

/// One spinner line and the state it displays
#[derive(Clone)]
pub(crate) struct TaskLine {
    name: Arc<str>,
    bar: ProgressBar,
    state: Arc<Mutex<TaskState>>,
}

impl TaskLine {
    pub(crate) fn new(bar: ProgressBar, name: Arc<str>) -> Self {
        bar.set_style(line_style(TaskState::Waiting));
        bar.set_prefix(line_prefix(TaskState::Waiting, &name));
        Self {
            name,
            bar,
            state: Arc::new(Mutex::new(TaskState::Waiting)),
        }
    }

    pub(crate) fn state(&self) -> TaskState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `next`; a backwards or repeated transition is ignored
    pub(crate) fn transition(&self, next: TaskState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.can_transition_to(next) {
            return false;
        }
        *state = next;

        self.bar.set_style(line_style(next));
        self.bar.set_prefix(line_prefix(next, &self.name));
        match next {
            TaskState::Waiting => {}
            TaskState::Running => self.bar.enable_steady_tick(TICK_INTERVAL),
            TaskState::Completed => self.bar.finish(),
            TaskState::Error => self.bar.abandon(),
        }

        tracing::debug!(task = %self.name, state = %next, "Task state changed");
        true
    }

    pub(crate) fn fail(&self, message: impl Into<Cow<'static, str>>) {
        self.bar.set_message(message);
        self.transition(TaskState::Error);
    }

    pub(crate) fn set_message(&self, message: impl Into<Cow<'static, str>>) {
        self.bar.set_message(message);
    }
}

/// Handle given to a task's work
///
/// Cloneable and usable from blocking threads.
#[derive(Clone)]
pub struct TaskScope {
    line: TaskLine,
    context: Arc<RunnerContext>,
}

impl TaskScope {
    pub(crate) fn new(line: TaskLine, context: Arc<RunnerContext>) -> Self {
        Self { line, context }
    }

    pub fn name(&self) -> &str {
        &self.line.name
    }

    /// Switch the line from waiting to its running spinner
    pub fn started(&self) {
        self.line.transition(TaskState::Running);
    }

    /// Show a free-text status next to the task name
    pub fn update(&self, message: impl Into<Cow<'static, str>>) {
        self.line.set_message(message);
    }

    pub fn state(&self) -> TaskState {
        self.line.state()
    }

    /// Add a files progress bar below the task lines
    pub fn files_progress(&self, total_files: usize, total_bytes: Option<u64>) -> FilesProgress {
        self.context.files_progress(total_files, total_bytes)
    }
}
