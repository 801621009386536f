//! One module per subcommand, plus the catalog tasks they share

pub mod consistency;
pub mod fix_timezone;
pub mod orphaned;
pub mod verify_dir;

use crate::config::ImmichConfig;
use anyhow::Context;
use assistant_catalog::{connect, select_all, CatalogEntity};
use assistant_core::PathWithSize;
use assistant_tasks::{TaskHandle, TaskRunner};
use assistant_verify::list_files;
use sqlx::PgPool;
use std::path::PathBuf;

/// Open the catalog pool every listing task reads through
pub(crate) fn connect_task(runner: &TaskRunner, config: &ImmichConfig) -> TaskHandle<PgPool> {
    let settings = config.connection_settings();
    runner.schedule("Connecting to DB", (), move |scope, ()| async move {
        scope.started();
        connect(&settings)
            .await
            .with_context(|| format!("Cannot reach {}:{}", settings.host, settings.port))
    })
}

/// List a whole catalog table once the pool is up
pub(crate) fn listing_task<T>(
    runner: &TaskRunner,
    name: &str,
    db: &TaskHandle<PgPool>,
) -> TaskHandle<Vec<T>>
where
    T: CatalogEntity + Sync + 'static,
{
    runner.schedule(name, db.clone(), |scope, pool| async move {
        scope.started();
        let rows = select_all::<T>(&pool).await?;
        scope.update(format!("({} rows)", rows.len()));
        Ok(rows)
    })
}

/// Walk a listing on the blocking pool, counting files and bytes as they come
pub(crate) fn files_task<I>(runner: &TaskRunner, name: &str, listing: I) -> TaskHandle<Vec<PathWithSize>>
where
    I: Iterator<Item = assistant_verify::Result<PathBuf>> + Send + 'static,
{
    runner.schedule(name, (), move |scope, ()| async move {
        scope.started();
        let files = tokio::task::spawn_blocking(move || list_files(listing, &scope)).await??;
        Ok(files)
    })
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
