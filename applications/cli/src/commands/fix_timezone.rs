//! `fix timezone`: which assets would get a different timezone?

use super::{connect_task, listing_task, print_lines};
use crate::cli::FixTimezoneArgs;
use crate::error::{CliError, Result};
use crate::output::TimezoneSummary;
use assistant_core::{Asset, ExifData};
use assistant_tasks::{TaskHandle, TaskRunner};
use assistant_timezone::{TimezoneRanges, TimezoneResolver};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub async fn run(runner: &TaskRunner, args: FixTimezoneArgs) -> Result<()> {
    args.immich.validate()?;
    let ranges = TimezoneRanges::new(args.timezone_ranges.clone())
        .map_err(|e| CliError::config(e.to_string()))?;
    let resolver = TimezoneResolver::new(ranges, args.override_timezones);
    let include_invisible = args.include_invisible();

    if !args.dry_run {
        tracing::warn!("Timezones are never written back to the catalog; reporting changes only");
    }

    let db = connect_task(runner, &args.immich);
    let assets = listing_task::<Asset>(runner, "Listing assets", &db);
    let exif = listing_task::<ExifData>(runner, "Listing exif data", &db);

    let resolved = schedule_resolution(runner, resolver, include_invisible, assets, exif);

    let summary = runner.run(async move { Ok(resolved.await?) }).await?;
    print_lines(&summary.lines());

    if let Some(target) = &args.list_edited_assets {
        write_edited_assets(target, &summary.edited)?;
    }
    Ok(())
}

/// Resolve every selected asset once both listings are in
pub fn schedule_resolution(
    runner: &TaskRunner,
    resolver: TimezoneResolver,
    include_invisible: bool,
    assets: TaskHandle<Vec<Asset>>,
    exif: TaskHandle<Vec<ExifData>>,
) -> TaskHandle<TimezoneSummary> {
    runner.schedule(
        "Detecting timezones",
        (assets, exif),
        move |scope, (assets, exif)| async move {
            scope.started();
            let outcomes = resolver.resolve_all(&assets, &exif, include_invisible)?;
            scope.update(format!("({} assets)", outcomes.len()));
            Ok(TimezoneSummary::from_outcomes(&outcomes))
        },
    )
}

/// `-` means stdout; any other path is created or truncated
pub fn write_edited_assets(target: &Path, lines: &[String]) -> io::Result<()> {
    if target == Path::new("-") {
        let stdout = io::stdout();
        return write_lines(&mut stdout.lock(), lines);
    }
    let mut file = BufWriter::new(File::create(target)?);
    write_lines(&mut file, lines)?;
    file.flush()
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_edited_assets_written_to_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("edited.txt");
        std::fs::write(&target, "stale\nstale\nstale\n").unwrap();

        let lines = vec!["a1 (??? --> Europe/Rome): /u/a1.jpg".to_string()];
        write_edited_assets(&target, &lines).unwrap();

        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "a1 (??? --> Europe/Rome): /u/a1.jpg\n"
        );
    }
}
