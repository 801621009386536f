//! Task handles and the dependency values built from them

use crate::error::{TaskError, TaskFailure};
use crate::scope::TaskLine;
use crate::state::TaskState;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::task::JoinHandle;

type TaskOutcome<T> = Result<Arc<T>, TaskFailure>;
type SharedOutcome<T> = Shared<BoxFuture<'static, TaskOutcome<T>>>;

/// The eventual result of a scheduled task
///
/// Clones share one outcome, so any number of dependents can await the
/// same task. Dropping every handle does not cancel the task.
pub struct TaskHandle<T> {
    name: Arc<str>,
    line: TaskLine,
    outcome: SharedOutcome<T>,
}

impl<T: Send + Sync + 'static> TaskHandle<T> {
    pub(crate) fn new(name: Arc<str>, line: TaskLine, join: JoinHandle<TaskOutcome<T>>) -> Self {
        let task = Arc::clone(&name);
        let outcome = async move {
            match join.await {
                Ok(outcome) => outcome,
                Err(e) => Err(TaskFailure::new(&task, TaskError::Worker(e))),
            }
        }
        .boxed()
        .shared();

        Self {
            name,
            line,
            outcome,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TaskState {
        self.line.state()
    }

    /// Wait for the task without consuming the handle
    pub async fn result(&self) -> TaskOutcome<T> {
        self.outcome.clone().await
    }
}

impl<T> Clone for TaskHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            line: self.line.clone(),
            outcome: self.outcome.clone(),
        }
    }
}

impl<T> fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("name", &self.name)
            .field("state", &self.line.state())
            .finish_non_exhaustive()
    }
}

impl<T> IntoFuture for TaskHandle<T> {
    type Output = TaskOutcome<T>;
    type IntoFuture = SharedOutcome<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.outcome
    }
}

/// What a task waits for before its work runs
///
/// Implemented for `()`, a single [`TaskHandle`] and tuples of up to four
/// handles. Handles are awaited in order; the first failure is returned.
pub trait Dependencies: Send + 'static {
    type Output: Send + 'static;

    fn resolve(self) -> BoxFuture<'static, Result<Self::Output, TaskFailure>>;
}

impl Dependencies for () {
    type Output = ();

    fn resolve(self) -> BoxFuture<'static, Result<Self::Output, TaskFailure>> {
        futures_util::future::ready(Ok(())).boxed()
    }
}

impl<A: Send + Sync + 'static> Dependencies for TaskHandle<A> {
    type Output = Arc<A>;

    fn resolve(self) -> BoxFuture<'static, Result<Self::Output, TaskFailure>> {
        self.outcome.boxed()
    }
}

macro_rules! impl_dependencies_for_tuple {
    ($($ty:ident $handle:ident),+) => {
        impl<$($ty: Send + Sync + 'static),+> Dependencies for ($(TaskHandle<$ty>,)+) {
            type Output = ($(Arc<$ty>,)+);

            fn resolve(self) -> BoxFuture<'static, Result<Self::Output, TaskFailure>> {
                let ($($handle,)+) = self;
                async move { Ok(($($handle.await?,)+)) }.boxed()
            }
        }
    };
}

impl_dependencies_for_tuple!(A a, B b);
impl_dependencies_for_tuple!(A a, B b, C c);
impl_dependencies_for_tuple!(A a, B b, C c, D d);
