//! `verify orphaned`: which files on disk does no catalog entry reference?

use super::{connect_task, files_task, listing_task, print_lines};
use crate::cli::OrphanedArgs;
use crate::error::Result;
use crate::output;
use assistant_core::{Asset, AssetFile, Person};
use assistant_tasks::TaskRunner;
use assistant_verify::{find_orphans, referenced_paths};

pub async fn run(runner: &TaskRunner, args: OrphanedArgs) -> Result<()> {
    args.immich.validate()?;
    let layout = args.immich.storage_layout();
    let filters = args.filters.filters(None);

    let db = connect_task(runner, &args.immich);
    let assets = listing_task::<Asset>(runner, "Listing assets", &db);
    let asset_files = listing_task::<AssetFile>(runner, "Listing assets files", &db);
    let people = listing_task::<Person>(runner, "Listing people", &db);
    let files = files_task(
        runner,
        "Listing files (may take a while)",
        filters.filesystem_files(&layout),
    );

    let orphans = runner.schedule(
        "Detecting orphaned files",
        (assets, asset_files, people, files),
        move |scope, (assets, asset_files, people, files)| async move {
            scope.started();
            let referenced = referenced_paths(&assets, &asset_files, &people, &layout);
            let orphans = find_orphans(&files, &referenced);
            scope.update(format!("({} of {} files)", orphans.len(), files.len()));
            Ok(orphans)
        },
    );

    let orphans = runner.run(async move { Ok(orphans.await?) }).await?;
    print_lines(&output::orphans_summary(&orphans));
    Ok(())
}
