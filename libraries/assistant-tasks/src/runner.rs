//! Task scheduling, fatal escalation and the run session

use crate::error::{FatalError, TaskError, TaskFailure};
use crate::files::FilesProgress;
use crate::handle::{Dependencies, TaskHandle};
use crate::scope::{TaskLine, TaskScope};
use crate::state::TaskState;
use futures_util::FutureExt;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::any::Any;
use std::future::Future;
use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Keep the full error chain in the fatal error
    pub debug: bool,
    /// Parallel workers per files stage
    pub concurrency: usize,
    /// Draw to stderr; otherwise the renderer is hidden
    pub show_progress: bool,
    /// Time the renderer gets to draw its last frame after a fatal error
    pub grace_period: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            debug: false,
            concurrency: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            show_progress: true,
            grace_period: Duration::from_millis(100),
        }
    }
}

/// State shared by the runner, its scopes and its tasks
pub(crate) struct RunnerContext {
    progress: MultiProgress,
    options: RunnerOptions,
    fatal: watch::Sender<Option<FatalError>>,
}

impl RunnerContext {
    fn add_line(&self, name: Arc<str>) -> TaskLine {
        let bar = self.progress.add(ProgressBar::new_spinner());
        TaskLine::new(bar, name)
    }

    pub(crate) fn files_progress(
        &self,
        total_files: usize,
        total_bytes: Option<u64>,
    ) -> FilesProgress {
        let bar = self.progress.add(ProgressBar::new(0));
        FilesProgress::new(bar, total_files, total_bytes, self.options.concurrency)
    }

    /// Record a fatal failure; only the first one is kept
    fn escalate(&self, error: FatalError) {
        let task = error.task.clone();
        let first = self.fatal.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(error);
            true
        });

        if first {
            tracing::debug!(task = %task, "Fatal task failure");
        } else {
            tracing::debug!(task = %task, "Ignoring failure after an earlier fatal error");
        }
    }
}

/// Schedules tasks and drives one run
#[derive(Clone)]
pub struct TaskRunner {
    context: Arc<RunnerContext>,
}

impl TaskRunner {
    pub fn new(options: RunnerOptions) -> Self {
        let target = if options.show_progress {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let (fatal, _) = watch::channel(None);

        Self {
            context: Arc::new(RunnerContext {
                progress: MultiProgress::with_draw_target(target),
                options: RunnerOptions {
                    concurrency: options.concurrency.max(1),
                    ..options
                },
                fatal,
            }),
        }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.context.options
    }

    /// Start building a task; tasks are fatal unless marked otherwise
    pub fn task(&self, name: impl Into<String>) -> TaskBuilder<'_> {
        TaskBuilder {
            runner: self,
            name: name.into(),
            fatal: true,
        }
    }

    /// Spawn a fatal task
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<D, T, F, Fut>(
        &self,
        name: impl Into<String>,
        dependencies: D,
        work: F,
    ) -> TaskHandle<T>
    where
        D: Dependencies,
        T: Send + Sync + 'static,
        F: FnOnce(TaskScope, D::Output) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.task(name).spawn(dependencies, work)
    }

    pub fn files_progress(&self, total_files: usize, total_bytes: Option<u64>) -> FilesProgress {
        self.context.files_progress(total_files, total_bytes)
    }

    /// The fatal error of this run, if one was escalated
    pub fn fatal_error(&self) -> Option<FatalError> {
        self.context.fatal.borrow().clone()
    }

    /// Drive `root` until it finishes or a task fails fatally
    ///
    /// On a fatal failure `root` is dropped, the renderer gets the grace
    /// period to draw its last frame and is then stopped. Tasks still in
    /// flight keep running in the background.
    pub async fn run<R, Fut>(&self, root: Fut) -> Result<R, FatalError>
    where
        Fut: Future<Output = anyhow::Result<R>>,
    {
        let mut fatal = self.context.fatal.subscribe();

        let outcome = tokio::select! {
            biased;
            error = wait_for_fatal(&mut fatal) => Err(error),
            result = root => result.map_err(|error| {
                self.fatal_error()
                    .unwrap_or_else(|| self.root_failure(&error))
            }),
        };

        if outcome.is_err() {
            tokio::time::sleep(self.context.options.grace_period).await;
        }
        self.context.progress.set_draw_target(ProgressDrawTarget::hidden());

        outcome
    }

    fn root_failure(&self, error: &anyhow::Error) -> FatalError {
        let debug = self.context.options.debug;
        match error.downcast_ref::<TaskFailure>() {
            Some(failure) => FatalError {
                task: failure.task.to_string(),
                details: failure.message.to_string(),
                trace: debug.then(|| format!("{error:?}")),
            },
            None => FatalError::new("main", error, debug),
        }
    }
}

async fn wait_for_fatal(receiver: &mut watch::Receiver<Option<FatalError>>) -> FatalError {
    loop {
        let current = receiver.borrow_and_update().clone();
        if let Some(error) = current {
            return error;
        }
        if receiver.changed().await.is_err() {
            return std::future::pending().await;
        }
    }
}

/// Options for a task before it is spawned
#[must_use = "a task only runs once spawned"]
pub struct TaskBuilder<'a> {
    runner: &'a TaskRunner,
    name: String,
    fatal: bool,
}

impl TaskBuilder<'_> {
    /// A failure only fails this task's handle instead of ending the run
    pub fn non_fatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Spawn the task on the current tokio runtime
    pub fn spawn<D, T, F, Fut>(self, dependencies: D, work: F) -> TaskHandle<T>
    where
        D: Dependencies,
        T: Send + Sync + 'static,
        F: FnOnce(TaskScope, D::Output) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let name: Arc<str> = self.name.into();
        let context = Arc::clone(&self.runner.context);
        let line = context.add_line(Arc::clone(&name));
        let scope = TaskScope::new(line.clone(), Arc::clone(&context));
        let fatal = self.fatal;

        let task_line = line.clone();
        let task_name = Arc::clone(&name);
        let join = tokio::spawn(async move {
            let resolved = match dependencies.resolve().await {
                Ok(resolved) => resolved,
                Err(failure) => {
                    tracing::debug!(task = %task_name, dependency = %failure.task, "Dependency failed");
                    task_line.fail("dependency failed");
                    return Err(TaskFailure::new(
                        &task_name,
                        TaskError::DependencyFailed(failure),
                    ));
                }
            };

            let outcome = AssertUnwindSafe(async move { work(scope, resolved).await })
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(anyhow::Error::new(TaskError::Panicked(panic_message(&*panic))))
                });

            match outcome {
                Ok(value) => {
                    task_line.transition(TaskState::Completed);
                    Ok(Arc::new(value))
                }
                Err(error) => {
                    let message = format!("{error:#}");
                    task_line.fail(message.clone());
                    if fatal {
                        context.escalate(FatalError::new(
                            task_name.as_ref(),
                            &error,
                            context.options.debug,
                        ));
                    } else {
                        tracing::warn!(task = %task_name, error = %message, "Task failed");
                    }
                    Err(TaskFailure::new(&task_name, message))
                }
            }
        });

        TaskHandle::new(name, line, join)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
