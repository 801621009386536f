//! Summaries printed once a run has finished
//!
//! Every function returns the lines instead of printing them, so the
//! commands decide where they go.

use assistant_core::PathWithSize;
use assistant_timezone::{AssetOutcome, FixTimezoneResult, Zone};
use assistant_verify::{ConsistencyReport, DirReport};
use console::style;
use std::collections::BTreeMap;

pub fn nothing_to_validate() -> String {
    "Nothing to validate 🫤".to_string()
}

pub fn consistency_summary(report: &ConsistencyReport, verify_checksums: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.failures.len() + 4);

    if report.is_clean() {
        lines.push(style("🎉 All files verified successfully").green().to_string());
    } else {
        lines.push(
            style(format!(
                "⚠️ Some files ({}) failed verification!",
                report.failures.len()
            ))
            .yellow()
            .to_string(),
        );
    }

    let exist = if verify_checksums {
        "files exist and checksums match"
    } else {
        "files exist"
    };
    lines.push(format!("  ✔️ {} {exist}", report.ok));
    lines.push(format!("  ❗ {} files are missing", report.missing));
    if verify_checksums {
        lines.push(format!(
            "  🔢 {} files have mismatched checksums",
            report.checksum_mismatches
        ));
    }

    lines.extend(report.failures.iter().map(|f| style(f).red().to_string()));
    lines
}

pub fn dir_summary(report: &DirReport) -> Vec<String> {
    if report.not_found.is_empty() {
        return vec![style("🎉 All files verified successfully").green().to_string()];
    }

    let mut lines = vec![style(format!(
        "⚠️ Found {} files not present in Immich's database!",
        report.not_found.len()
    ))
    .yellow()
    .to_string()];
    lines.extend(
        report
            .not_found
            .iter()
            .map(|path| format!("{} not found in any asset!", path.display())),
    );
    lines
}

pub fn orphans_summary(orphans: &[PathWithSize]) -> Vec<String> {
    if orphans.is_empty() {
        return vec![style("🎉 All files verified successfully, no orphans found")
            .green()
            .to_string()];
    }

    let mut lines = vec![style(format!("⚠️ Found {} orphaned files!", orphans.len()))
        .yellow()
        .to_string()];
    lines.extend(
        orphans
            .iter()
            .map(|file| format!("{} not found in any asset!", file.path.display())),
    );
    lines
}

/// Outcomes of a timezone run, grouped for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneSummary {
    /// Assets per outcome, in summary order
    pub counts: BTreeMap<FixTimezoneResult, usize>,
    /// One log line per fixed asset, grouped like `counts`
    pub edited: Vec<String>,
}

impl TimezoneSummary {
    pub fn from_outcomes(outcomes: &[AssetOutcome<'_>]) -> Self {
        let mut counts = BTreeMap::new();
        let mut groups: BTreeMap<FixTimezoneResult, Vec<String>> = BTreeMap::new();
        for outcome in outcomes {
            *counts.entry(outcome.result.clone()).or_insert(0) += 1;
            if let Some(line) = outcome.result.log_line(outcome.asset) {
                groups.entry(outcome.result.clone()).or_default().push(line);
            }
        }
        let edited = groups.into_values().flatten().collect();

        Self { counts, edited }
    }

    pub fn lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|(result, count)| format!("{}: {count}", describe(result)))
            .collect()
    }
}

fn describe(result: &FixTimezoneResult) -> String {
    match result {
        FixTimezoneResult::Untouched => "🙌 Untouched".to_string(),
        FixTimezoneResult::MissingExifData => "💔 Missing EXIF data".to_string(),
        FixTimezoneResult::MissingTimezoneRange => "🕒 Missing timezone range".to_string(),
        FixTimezoneResult::TimezoneFixed { old, new } => format!(
            "🛠️ Fixed from {} to {}",
            style(old.as_ref().map_or("no timezone", Zone::id)).red(),
            style(new).green()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::{EntityKind, EntityRef, FileRole, TrackedFile};
    use assistant_verify::{VerifiedFile, VerifyResult};
    use std::path::PathBuf;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .iter()
            .map(|l| console::strip_ansi_codes(l).into_owned())
            .collect()
    }

    #[test]
    fn test_clean_consistency_summary() {
        let report = ConsistencyReport {
            ok: 3,
            ..ConsistencyReport::default()
        };

        assert_eq!(
            plain(consistency_summary(&report, true)),
            vec![
                "🎉 All files verified successfully",
                "  ✔️ 3 files exist and checksums match",
                "  ❗ 0 files are missing",
                "  🔢 0 files have mismatched checksums",
            ]
        );
    }

    #[test]
    fn test_failed_consistency_summary_lists_failures() {
        let failure = VerifiedFile {
            file: TrackedFile {
                entity: EntityRef::new(EntityKind::Asset, "a1"),
                role: FileRole::Original,
                path: PathBuf::from("/mnt/immich/library/a.jpg"),
                checksum: None,
            },
            result: VerifyResult::FileMissing,
        };
        let report = ConsistencyReport {
            ok: 1,
            missing: 1,
            checksum_mismatches: 0,
            failures: vec![failure],
        };

        let lines = plain(consistency_summary(&report, false));
        assert_eq!(lines[0], "⚠️ Some files (1) failed verification!");
        assert_eq!(lines[1], "  ✔️ 1 files exist");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("FILE_MISSING"));
        assert!(lines[3].ends_with("/mnt/immich/library/a.jpg"));
    }

    #[test]
    fn test_dir_summary() {
        let clean = DirReport {
            checked: 2,
            not_found: Vec::new(),
        };
        assert_eq!(plain(dir_summary(&clean)), vec!["🎉 All files verified successfully"]);

        let dirty = DirReport {
            checked: 2,
            not_found: vec![PathBuf::from("/photos/b.jpg")],
        };
        assert_eq!(
            plain(dir_summary(&dirty)),
            vec![
                "⚠️ Found 1 files not present in Immich's database!",
                "/photos/b.jpg not found in any asset!",
            ]
        );
    }

    #[test]
    fn test_orphans_summary() {
        assert_eq!(
            plain(orphans_summary(&[])),
            vec!["🎉 All files verified successfully, no orphans found"]
        );

        let orphans = vec![PathWithSize::new(PathBuf::from("/mnt/immich/library/x.jpg"), 4)];
        assert_eq!(
            plain(orphans_summary(&orphans)),
            vec![
                "⚠️ Found 1 orphaned files!",
                "/mnt/immich/library/x.jpg not found in any asset!",
            ]
        );
    }

    #[test]
    fn test_timezone_summary_groups_in_order() {
        use assistant_core::{Asset, MediaType};
        use assistant_timezone::parse_local_date_time;

        let local = parse_local_date_time("2024-06-02T10:00").unwrap();
        let assets = [
            Asset::new("a1", MediaType::Image, "/u/library/a1.jpg".into(), local),
            Asset::new("a2", MediaType::Image, "/u/library/a2.jpg".into(), local),
            Asset::new("a3", MediaType::Image, "/u/library/a3.jpg".into(), local),
        ];
        let fixed = FixTimezoneResult::TimezoneFixed {
            old: None,
            new: "Europe/Rome".parse().unwrap(),
        };
        let outcomes = vec![
            AssetOutcome { asset: &assets[0], result: fixed.clone() },
            AssetOutcome { asset: &assets[1], result: FixTimezoneResult::Untouched },
            AssetOutcome { asset: &assets[2], result: fixed },
        ];

        let summary = TimezoneSummary::from_outcomes(&outcomes);
        assert_eq!(
            plain(summary.lines()),
            vec![
                "🙌 Untouched: 1",
                "🛠️ Fixed from no timezone to Europe/Rome: 2",
            ]
        );
        assert_eq!(
            summary.edited,
            vec![
                "a1 (??? --> Europe/Rome): /u/library/a1.jpg",
                "a3 (??? --> Europe/Rome): /u/library/a3.jpg",
            ]
        );
    }
}
