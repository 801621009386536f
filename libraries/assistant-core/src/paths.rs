//! Storage path resolution
//!
//! Immich records absolute paths as seen from inside its own container
//! (`/usr/src/app/upload/library/...`). The assistant usually runs elsewhere,
//! with the same directory mounted at `UPLOAD_LOCATION`, so every stored path is
//! re-rooted before it touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Default media location inside the Immich server container
pub const DEFAULT_MEDIA_LOCATION: &str = "/usr/src/app/upload";

/// Directory holding original files
pub const LIBRARY_DIR: &str = "library";
/// Directory holding previews, thumbnails and people's profile images
pub const THUMBS_DIR: &str = "thumbs";
/// Directory holding transcoded videos
pub const ENCODED_VIDEO_DIR: &str = "encoded-video";
/// Staging directory for in-flight uploads; never audited
pub const UPLOAD_DIR: &str = "upload";

/// Maps catalog paths onto the local upload location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    upload_location: PathBuf,
    media_location: PathBuf,
}

impl StorageLayout {
    /// `upload_location` is the local directory, `media_location` the same
    /// directory as recorded in the catalog.
    pub fn new(upload_location: impl Into<PathBuf>, media_location: impl Into<PathBuf>) -> Self {
        Self {
            upload_location: normalize(&upload_location.into()),
            media_location: normalize(&media_location.into()),
        }
    }

    pub fn upload_location(&self) -> &Path {
        &self.upload_location
    }

    pub fn media_location(&self) -> &Path {
        &self.media_location
    }

    /// Resolve a stored path to a normalized local absolute path.
    ///
    /// Paths under the media location are re-rooted onto the upload location,
    /// relative paths are joined onto it, anything else is kept as is.
    pub fn resolve(&self, stored: &Path) -> PathBuf {
        let stored = normalize(stored);
        if let Ok(relative) = stored.strip_prefix(&self.media_location) {
            return self.upload_location.join(relative);
        }
        if stored.is_relative() {
            return normalize(&self.upload_location.join(stored));
        }
        stored
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the parent.
///
/// The filesystem is never consulted, so symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
