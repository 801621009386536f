//! Checks whether the files of an arbitrary directory are in the catalog

use crate::{Result, VerifyError};
use assistant_core::digest::sha1_file;
use assistant_core::{Asset, PathWithSize};
use assistant_tasks::FilesProgress;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Checksums of every asset in the catalog
pub fn checksum_index(assets: &[Asset]) -> HashSet<Vec<u8>> {
    assets
        .iter()
        .filter(|asset| !asset.checksum.is_empty())
        .map(|asset| asset.checksum.clone())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirReport {
    pub checked: usize,
    /// Files whose content matches no asset, in listing order
    pub not_found: Vec<PathBuf>,
}

impl DirReport {
    pub fn found(&self) -> usize {
        self.checked - self.not_found.len()
    }
}

/// Hash every listed file and look it up in `index`
///
/// `progress` advances by each file's size.
pub async fn verify_dir(
    progress: &FilesProgress,
    files: Vec<PathWithSize>,
    index: Arc<HashSet<Vec<u8>>>,
) -> Result<DirReport> {
    let checked = files.len();
    let results = progress
        .process(files, |file| file.size, move |file| -> Result<(PathBuf, bool)> {
            let checksum = sha1_file(&file.path).map_err(|e| VerifyError::io(&file.path, e))?;
            Ok((file.path, index.contains(&checksum)))
        })
        .await?;

    let mut not_found = Vec::new();
    for result in results {
        let (path, found) = result?;
        if !found {
            not_found.push(path);
        }
    }

    tracing::info!(checked, not_found = not_found.len(), "Directory verified");
    Ok(DirReport { checked, not_found })
}
