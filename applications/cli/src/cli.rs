/// Command-line surface
use crate::config::ImmichConfig;
use assistant_tasks::RunnerOptions;
use assistant_timezone::{OverridePolicy, TimezoneRange};
use assistant_verify::VerifyFilters;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "immich-assistant")]
#[command(version, about = "Audits an Immich library against its catalog", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Prints the full error chain and trace of failures
    #[arg(long, global = true)]
    pub debug: bool,

    /// Files checked in parallel [default: available parallelism]
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<NonZeroUsize>,

    /// Do not draw progress lines
    #[arg(long, global = true)]
    pub no_progress: bool,
}

impl GlobalOptions {
    pub fn runner_options(&self) -> RunnerOptions {
        let defaults = RunnerOptions::default();
        RunnerOptions {
            debug: self.debug,
            concurrency: self.concurrency.map_or(defaults.concurrency, NonZeroUsize::get),
            show_progress: !self.no_progress && console::Term::stderr().is_term(),
            ..defaults
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare the catalog with the files on disk
    #[command(subcommand)]
    Verify(VerifyCommand),

    /// Compute corrections to catalog metadata
    #[command(subcommand)]
    Fix(FixCommand),
}

#[derive(Subcommand, Debug)]
pub enum VerifyCommand {
    /// Check that every file of a directory is known to the catalog
    Dir(VerifyDirArgs),

    /// Check that every file the catalog tracks exists and is intact
    Consistency(ConsistencyArgs),

    /// Find files in the storage directories the catalog does not reference
    Orphaned(OrphanedArgs),
}

#[derive(Subcommand, Debug)]
pub enum FixCommand {
    /// Detect wrong or missing timezones from known travel periods
    #[command(alias = "tz")]
    Timezone(FixTimezoneArgs),
}

#[derive(Args, Debug)]
pub struct VerifyDirArgs {
    /// Directory to look for in the catalog
    pub directory: PathBuf,

    #[command(flatten)]
    pub immich: ImmichConfig,
}

/// Role and media type switches shared by `consistency` and `orphaned`
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[command(next_help_heading = "Filters")]
pub struct FilterArgs {
    /// Skip original files
    #[arg(long)]
    pub skip_originals: bool,

    /// Skip thumbnails
    #[arg(long)]
    pub skip_thumbnails: bool,

    /// Skip previews
    #[arg(long)]
    pub skip_previews: bool,

    /// Skip transcoded videos
    #[arg(long)]
    pub skip_encoded_videos: bool,

    /// Skip image assets
    #[arg(long)]
    pub skip_images: bool,

    /// Skip video assets
    #[arg(long)]
    pub skip_videos: bool,

    /// Skip people's profile images
    #[arg(long)]
    pub skip_people: bool,
}

impl FilterArgs {
    pub fn filters(&self, limit: Option<usize>) -> VerifyFilters {
        VerifyFilters {
            originals: !self.skip_originals,
            thumbnails: !self.skip_thumbnails,
            previews: !self.skip_previews,
            encoded_videos: !self.skip_encoded_videos,
            images: !self.skip_images,
            videos: !self.skip_videos,
            people: !self.skip_people,
            limit,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConsistencyArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Only check that files exist
    #[arg(long)]
    pub skip_checksums: bool,

    /// Check at most N files
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub immich: ImmichConfig,
}

#[derive(Args, Debug)]
pub struct OrphanedArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub immich: ImmichConfig,
}

#[derive(Args, Debug)]
pub struct FixTimezoneArgs {
    /// Timezone in effect over a local time span, as ZONE,START,END_EXCLUSIVE
    /// (e.g. Europe/Rome,2024-06-01T00:00,2024-06-15T00:00)
    #[arg(
        long = "timezone-range",
        short = 'z',
        required = true,
        value_name = "ZONE,START,END_EXCLUSIVE"
    )]
    pub timezone_ranges: Vec<TimezoneRange>,

    /// Also process invisible assets, such as the video half of live photos
    #[arg(long, overrides_with = "exclude_invisible")]
    pub include_invisible: bool,

    /// Only process visible assets (default)
    #[arg(long, overrides_with = "include_invisible")]
    pub exclude_invisible: bool,

    /// When to replace a timezone that is already recorded:
    /// never, if-different-offset or if-different
    #[arg(long, value_name = "POLICY", default_value_t = OverridePolicy::Never)]
    pub override_timezones: OverridePolicy,

    /// Only report the changes
    #[arg(long)]
    pub dry_run: bool,

    /// Write one line per edited asset to PATH, or to stdout with `-`
    #[arg(long, value_name = "PATH|-")]
    pub list_edited_assets: Option<PathBuf>,

    #[command(flatten)]
    pub immich: ImmichConfig,
}

impl FixTimezoneArgs {
    pub fn include_invisible(&self) -> bool {
        self.include_invisible && !self.exclude_invisible
    }
}
