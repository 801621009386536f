//! Immich Assistant
//!
//! Command-line audits of an Immich library: catalog entries against the
//! files on disk, disk against the catalog, and asset timezones against
//! known travel periods.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::ImmichConfig;
pub use error::{CliError, Result};

use assistant_tasks::TaskRunner;
use cli::{Command, FixCommand, VerifyCommand};
use std::future::Future;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr, filtered by `RUST_LOG`
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "immich_assistant=debug,assistant_=debug"
    } else {
        "immich_assistant=warn,assistant_=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Drive `future` on a fresh multi-threaded runtime
///
/// Returns as soon as `future` does. Tasks and blocking jobs it left behind,
/// such as a filesystem walk whose run already failed, are not waited for.
pub fn block_on_detached<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

/// Run one parsed command to completion
pub async fn run(cli: Cli) -> Result<()> {
    let runner = TaskRunner::new(cli.global.runner_options());
    tracing::debug!(options = ?runner.options(), "Starting run");

    match cli.command {
        Command::Verify(VerifyCommand::Dir(args)) => commands::verify_dir::run(&runner, args).await,
        Command::Verify(VerifyCommand::Consistency(args)) => {
            commands::consistency::run(&runner, args).await
        }
        Command::Verify(VerifyCommand::Orphaned(args)) => {
            commands::orphaned::run(&runner, args).await
        }
        Command::Fix(FixCommand::Timezone(args)) => commands::fix_timezone::run(&runner, args).await,
    }
}
