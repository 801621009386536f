//! `verify dir`: is every file of a directory already in the catalog?

use super::{connect_task, files_task, listing_task, print_lines};
use crate::cli::VerifyDirArgs;
use crate::config::validate_readable_dir;
use crate::error::Result;
use crate::output;
use assistant_core::{Asset, TotalSize};
use assistant_tasks::TaskRunner;
use assistant_verify::{checksum_index, verify_dir, walk_files};
use std::sync::Arc;

pub async fn run(runner: &TaskRunner, args: VerifyDirArgs) -> Result<()> {
    args.immich.validate()?;
    validate_readable_dir(&args.directory, "Directory")?;

    let db = connect_task(runner, &args.immich);
    let assets = listing_task::<Asset>(runner, "Listing assets", &db);
    let files = files_task(runner, "Listing files", walk_files(&args.directory));

    let index = runner.schedule("Indexing checksums", assets, |scope, assets| async move {
        scope.started();
        let index = checksum_index(&assets);
        scope.update(format!("({} checksums)", index.len()));
        Ok(index)
    });

    let verified = runner.schedule(
        "Verifying files",
        (files, index),
        |scope, (files, index)| async move {
            scope.started();
            let progress = scope.files_progress(files.len(), Some(files.total_size()));
            progress.set_label("Hashing files");
            Ok(verify_dir(&progress, files.as_ref().clone(), index).await?)
        },
    );

    let report = runner.run(async move { Ok(verified.await?) }).await?;
    print_lines(&output::dir_summary(&report));
    Ok(())
}
