//! `verify consistency`: does every file the catalog tracks exist, intact?

use super::{connect_task, listing_task, print_lines};
use crate::cli::ConsistencyArgs;
use crate::error::Result;
use crate::output;
use assistant_core::{Asset, AssetFile, Person};
use assistant_tasks::TaskRunner;
use assistant_verify::verify_consistency;

pub async fn run(runner: &TaskRunner, args: ConsistencyArgs) -> Result<()> {
    args.immich.validate()?;
    let layout = args.immich.storage_layout();
    let filters = args.filters.filters(args.limit);
    let verify_checksums = !args.skip_checksums;

    let db = connect_task(runner, &args.immich);
    let assets = listing_task::<Asset>(runner, "Listing assets", &db);
    let asset_files = listing_task::<AssetFile>(runner, "Listing assets files", &db);
    let people = listing_task::<Person>(runner, "Listing people", &db);

    let verified = runner.schedule(
        "Verifying files",
        (assets, asset_files, people),
        move |scope, (assets, asset_files, people)| async move {
            let files = filters.tracked_files(&assets, &asset_files, &people, &layout);
            if files.is_empty() {
                return Ok(None);
            }

            scope.started();
            scope.update(format!("({} files)", files.len()));
            let progress = scope.files_progress(files.len(), None);
            progress.set_label(if verify_checksums {
                "Checking files and checksums"
            } else {
                "Checking files"
            });
            Ok(Some(verify_consistency(&progress, files, verify_checksums).await?))
        },
    );

    let report = runner.run(async move { Ok(verified.await?) }).await?;
    match &*report {
        Some(report) => print_lines(&output::consistency_summary(report, verify_checksums)),
        None => println!("{}", output::nothing_to_validate()),
    }
    Ok(())
}
