//! Catalog to filesystem consistency check

use crate::{Result, VerifyError};
use assistant_core::digest::{sha1_file, to_hex};
use assistant_core::TrackedFile;
use assistant_tasks::FilesProgress;
use std::fmt;

/// Outcome of checking one tracked file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerifyResult {
    Ok,
    FileMissing,
    ChecksumMismatch,
}

impl fmt::Display for VerifyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerifyResult::Ok => "OK",
            VerifyResult::FileMissing => "FILE_MISSING",
            VerifyResult::ChecksumMismatch => "CHECKSUM_MISMATCH",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedFile {
    pub file: TrackedFile,
    pub result: VerifyResult,
}

impl fmt::Display for VerifiedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} failed due to {}: {}",
            self.file.role,
            self.file.entity,
            self.result,
            self.file.path.display()
        )
    }
}

/// Check a single file
///
/// The checksum is only compared when `verify_checksums` is set and the
/// catalog recorded one. A file that exists but cannot be read is an error.
pub fn check_file(file: &TrackedFile, verify_checksums: bool) -> Result<VerifyResult> {
    if !file.path.exists() {
        return Ok(VerifyResult::FileMissing);
    }

    if let (true, Some(expected)) = (verify_checksums, &file.checksum) {
        let actual = sha1_file(&file.path).map_err(|e| VerifyError::io(&file.path, e))?;
        if &actual != expected {
            tracing::debug!(
                path = %file.path.display(),
                expected = %to_hex(expected),
                actual = %to_hex(&actual),
                "Checksum mismatch"
            );
            return Ok(VerifyResult::ChecksumMismatch);
        }
    }

    Ok(VerifyResult::Ok)
}

/// Counts per outcome plus every file that did not verify, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub ok: usize,
    pub missing: usize,
    pub checksum_mismatches: usize,
    pub failures: Vec<VerifiedFile>,
}

impl ConsistencyReport {
    pub fn total(&self) -> usize {
        self.ok + self.missing + self.checksum_mismatches
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, verified: VerifiedFile) {
        match verified.result {
            VerifyResult::Ok => self.ok += 1,
            VerifyResult::FileMissing => self.missing += 1,
            VerifyResult::ChecksumMismatch => self.checksum_mismatches += 1,
        }
        if verified.result != VerifyResult::Ok {
            self.failures.push(verified);
        }
    }
}

/// Check every tracked file concurrently, advancing `progress` once per file
pub async fn verify_consistency(
    progress: &FilesProgress,
    files: Vec<TrackedFile>,
    verify_checksums: bool,
) -> Result<ConsistencyReport> {
    tracing::debug!(files = files.len(), verify_checksums, "Verifying tracked files");

    let checked = progress
        .process(files, |_| 1, move |file| {
            check_file(&file, verify_checksums).map(|result| VerifiedFile { file, result })
        })
        .await?;

    let mut report = ConsistencyReport::default();
    for verified in checked {
        report.record(verified?);
    }

    tracing::info!(
        ok = report.ok,
        missing = report.missing,
        checksum_mismatches = report.checksum_mismatches,
        "Verification finished"
    );
    Ok(report)
}
