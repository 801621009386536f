//! Which catalog files and storage files take part in a check

use crate::listing::FileSystemListing;
use assistant_core::{
    Asset, AssetFile, AssetFileType, EntityKind, EntityRef, FileRole, MediaType, Person,
    StorageLayout, TrackedFile,
};
use mime_guess::mime;
use std::collections::HashMap;
use std::path::Path;

/// Role, media type and count switches shared by the verify commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyFilters {
    pub originals: bool,
    pub thumbnails: bool,
    pub previews: bool,
    pub encoded_videos: bool,
    pub images: bool,
    pub videos: bool,
    pub people: bool,
    /// Only the first N tracked files are checked
    pub limit: Option<usize>,
}

impl Default for VerifyFilters {
    fn default() -> Self {
        Self {
            originals: true,
            thumbnails: true,
            previews: true,
            encoded_videos: true,
            images: true,
            videos: true,
            people: true,
            limit: None,
        }
    }
}

impl VerifyFilters {
    pub fn role_enabled(&self, role: FileRole) -> bool {
        match role {
            FileRole::Original => self.originals,
            FileRole::Thumbnail => self.thumbnails,
            FileRole::Preview => self.previews,
            FileRole::EncodedVideo => self.encoded_videos,
            FileRole::Profile => self.people,
        }
    }

    pub fn media_type_enabled(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Image => self.images,
            MediaType::Video => self.videos,
        }
    }

    /// Media filter for files found on disk, by guessed MIME type
    ///
    /// Files that are neither images nor videos always pass.
    pub fn file_media_enabled(&self, path: &Path) -> bool {
        match mime_guess::from_path(path).first() {
            Some(guess) if guess.type_() == mime::IMAGE => self.images,
            Some(guess) if guess.type_() == mime::VIDEO => self.videos,
            _ => true,
        }
    }

    /// Files the catalog expects on disk, in a stable order
    ///
    /// Per enabled asset: original, thumbnails, previews, encoded video.
    /// People's profile images follow all assets. Paths are resolved
    /// through `layout` and the list is cut at [`limit`](Self::limit).
    pub fn tracked_files(
        &self,
        assets: &[Asset],
        asset_files: &[AssetFile],
        people: &[Person],
        layout: &StorageLayout,
    ) -> Vec<TrackedFile> {
        let mut files_by_asset: HashMap<&str, Vec<&AssetFile>> = HashMap::new();
        for file in asset_files {
            files_by_asset
                .entry(file.asset_id.as_str())
                .or_default()
                .push(file);
        }

        let asset_tracked = assets
            .iter()
            .filter(|asset| self.media_type_enabled(asset.media_type))
            .flat_map(|asset| {
                let derivatives = files_by_asset
                    .get(asset.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                self.asset_tracked_files(asset, derivatives, layout)
            });

        let people_tracked = people
            .iter()
            .filter(|_| self.people)
            .filter_map(|person| {
                person.thumbnail_path.as_ref().map(|path| TrackedFile {
                    entity: EntityRef::new(EntityKind::Person, person.id.clone()),
                    path: layout.resolve(path),
                    role: FileRole::Profile,
                    checksum: None,
                })
            });

        let tracked: Vec<TrackedFile> = asset_tracked
            .chain(people_tracked)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        tracing::debug!(
            assets = assets.len(),
            asset_files = asset_files.len(),
            people = people.len(),
            tracked = tracked.len(),
            "Selected tracked files"
        );
        tracked
    }

    fn asset_tracked_files(
        &self,
        asset: &Asset,
        derivatives: &[&AssetFile],
        layout: &StorageLayout,
    ) -> Vec<TrackedFile> {
        let asset_ref = || EntityRef::new(EntityKind::Asset, asset.id.clone());
        let mut tracked = Vec::new();

        if self.originals {
            tracked.push(TrackedFile {
                entity: asset_ref(),
                path: layout.resolve(&asset.original_path),
                role: FileRole::Original,
                checksum: Some(asset.checksum.clone()).filter(|c| !c.is_empty()),
            });
        }

        for (enabled, file_type, role) in [
            (self.thumbnails, AssetFileType::Thumbnail, FileRole::Thumbnail),
            (self.previews, AssetFileType::Preview, FileRole::Preview),
        ] {
            if !enabled {
                continue;
            }
            tracked.extend(
                derivatives
                    .iter()
                    .filter(|file| file.file_type == file_type)
                    .map(|file| TrackedFile {
                        entity: EntityRef::new(EntityKind::AssetFile, file.id.clone()),
                        path: layout.resolve(&file.path),
                        role,
                        checksum: None,
                    }),
            );
        }

        if self.encoded_videos {
            if let Some(encoded) = &asset.encoded_video_path {
                tracked.push(TrackedFile {
                    entity: asset_ref(),
                    path: layout.resolve(encoded),
                    role: FileRole::EncodedVideo,
                    checksum: None,
                });
            }
        }

        tracked
    }

    /// Lazily enumerate the storage directories these filters cover
    pub fn filesystem_files(&self, layout: &StorageLayout) -> FileSystemListing {
        FileSystemListing::new(layout.upload_location(), *self)
    }
}
