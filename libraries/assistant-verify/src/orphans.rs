//! Files on disk that no catalog row references

use assistant_core::paths::normalize;
use assistant_core::{Asset, AssetFile, PathWithSize, Person, StorageLayout};
use std::collections::HashSet;
use std::path::PathBuf;

/// Every path the catalog references, resolved and normalized
///
/// Covers each asset's original, encoded video, sidecar, preview and
/// thumbnail, every asset file and every person's profile image.
pub fn referenced_paths(
    assets: &[Asset],
    asset_files: &[AssetFile],
    people: &[Person],
    layout: &StorageLayout,
) -> HashSet<PathBuf> {
    assets
        .iter()
        .flat_map(|asset| asset.referenced_paths().map(PathBuf::as_path))
        .chain(asset_files.iter().map(|file| file.path.as_path()))
        .chain(people.iter().filter_map(|person| person.thumbnail_path.as_deref()))
        .map(|path| layout.resolve(path))
        .collect()
}

/// Listed files missing from `referenced`, in listing order
pub fn find_orphans(files: &[PathWithSize], referenced: &HashSet<PathBuf>) -> Vec<PathWithSize> {
    let orphans: Vec<PathWithSize> = files
        .iter()
        .filter(|file| !referenced.contains(&normalize(&file.path)))
        .cloned()
        .collect();

    tracing::info!(
        files = files.len(),
        referenced = referenced.len(),
        orphans = orphans.len(),
        "Detected orphaned files"
    );
    orphans
}
