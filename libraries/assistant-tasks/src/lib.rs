//! Immich Assistant Tasks
//!
//! A small task runner for command pipelines. Each task is spawned on the
//! tokio runtime, waits for the handles it was given, then runs its work
//! while a spinner line shows its state.
//!
//! There is no task graph: awaiting handles is the only ordering. A failing
//! task ends the whole run unless it was built with
//! [`TaskBuilder::non_fatal`].
//!
//! # Example
//!
//! ```rust,no_run
//! use assistant_tasks::{RunnerOptions, TaskRunner};
//!
//! # async fn example() {
//! let runner = TaskRunner::new(RunnerOptions::default());
//!
//! let numbers = runner.schedule("Listing numbers", (), |scope, ()| async move {
//!     scope.started();
//!     Ok(vec![1, 2, 3])
//! });
//! let sum = runner.schedule("Summing", numbers, |scope, numbers| async move {
//!     scope.started();
//!     Ok(numbers.iter().sum::<i32>())
//! });
//!
//! match runner.run(async move { Ok(*sum.await?) }).await {
//!     Ok(total) => println!("{total}"),
//!     Err(fatal) => eprintln!("{fatal}"),
//! }
//! # }
//! ```

mod error;
mod files;
mod handle;
mod runner;
mod scope;
mod state;

pub use error::{FatalError, Result, TaskError, TaskFailure};
pub use files::FilesProgress;
pub use handle::{Dependencies, TaskHandle};
pub use runner::{RunnerOptions, TaskBuilder, TaskRunner};
pub use scope::TaskScope;
pub use state::TaskState;
