//! Filesystem enumeration

use crate::{Result, VerifyError, VerifyFilters};
use assistant_core::paths::{ENCODED_VIDEO_DIR, LIBRARY_DIR, THUMBS_DIR};
use assistant_core::{FileRole, PathWithSize};
use assistant_tasks::TaskScope;
use indicatif::HumanBytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Top-level storage directory a file was found under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageDir {
    Library,
    Thumbs,
    EncodedVideo,
}

impl StorageDir {
    const ALL: [StorageDir; 3] = [StorageDir::Library, StorageDir::Thumbs, StorageDir::EncodedVideo];

    fn name(self) -> &'static str {
        match self {
            StorageDir::Library => LIBRARY_DIR,
            StorageDir::Thumbs => THUMBS_DIR,
            StorageDir::EncodedVideo => ENCODED_VIDEO_DIR,
        }
    }

    /// Whether any file under this directory could pass the filters
    fn enabled(self, filters: &VerifyFilters) -> bool {
        match self {
            StorageDir::Library => filters.originals,
            StorageDir::Thumbs => filters.thumbnails || filters.previews || filters.people,
            StorageDir::EncodedVideo => filters.encoded_videos,
        }
    }

    fn role_of(self, path: &Path) -> FileRole {
        match self {
            StorageDir::Library => FileRole::Original,
            StorageDir::EncodedVideo => FileRole::EncodedVideo,
            StorageDir::Thumbs => {
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                if stem.ends_with("-preview") {
                    FileRole::Preview
                } else if stem.ends_with("-thumbnail") {
                    FileRole::Thumbnail
                } else {
                    FileRole::Profile
                }
            }
        }
    }
}

/// Files under `library/`, `thumbs/` and `encoded-video/` that pass a set
/// of [`VerifyFilters`]
///
/// Walks lazily, one directory after the other. The `upload/` staging area
/// is never visited, missing directories are skipped and the limit does not
/// apply.
pub struct FileSystemListing {
    roots: std::vec::IntoIter<(StorageDir, PathBuf)>,
    current: Option<(StorageDir, walkdir::IntoIter)>,
    filters: VerifyFilters,
}

impl FileSystemListing {
    pub(crate) fn new(upload_location: &Path, filters: VerifyFilters) -> Self {
        let roots: Vec<(StorageDir, PathBuf)> = StorageDir::ALL
            .into_iter()
            .filter(|dir| dir.enabled(&filters))
            .map(|dir| (dir, upload_location.join(dir.name())))
            .filter(|(dir, root)| {
                let exists = root.is_dir();
                if !exists {
                    tracing::debug!(directory = dir.name(), root = %root.display(), "Storage directory missing, skipping");
                }
                exists
            })
            .collect();

        Self {
            roots: roots.into_iter(),
            current: None,
            filters,
        }
    }
}

impl Iterator for FileSystemListing {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let (dir, root) = self.roots.next()?;
                self.current = Some((dir, WalkDir::new(root).into_iter()));
            }
            let (dir, walker) = self.current.as_mut()?;
            let dir = *dir;

            match walker.next() {
                None => self.current = None,
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(entry)) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if self.filters.role_enabled(dir.role_of(path))
                        && self.filters.file_media_enabled(path)
                    {
                        return Some(Ok(entry.into_path()));
                    }
                }
            }
        }
    }
}

/// Every regular file below `root`, lazily
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
}

/// Drain a listing, recording each file's size and reporting the running
/// totals on the task line
pub fn list_files(
    files: impl Iterator<Item = Result<PathBuf>>,
    scope: &TaskScope,
) -> Result<Vec<PathWithSize>> {
    let mut listed = Vec::new();
    let mut total_size = 0_u64;

    for path in files {
        let path = path?;
        let size = std::fs::metadata(&path)
            .map_err(|e| VerifyError::io(&path, e))?
            .len();

        total_size += size;
        listed.push(PathWithSize::new(path, size));
        scope.update(format!(
            "({} files discovered, {})",
            listed.len(),
            HumanBytes(total_size)
        ));
    }

    tracing::info!(files = listed.len(), bytes = total_size, "Listed files");
    Ok(listed)
}
