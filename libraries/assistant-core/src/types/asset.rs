/// Asset domain type
use crate::CoreError;
use chrono::NaiveDateTime;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of media an asset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Catalog representation (`IMAGE` / `VIDEO`)
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
        }
    }
}

impl FromStr for MediaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMAGE" => Ok(MediaType::Image),
            "VIDEO" => Ok(MediaType::Video),
            other => Err(CoreError::unknown_variant("asset type", other)),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A photo or video tracked by the catalog
///
/// Two assets are equal when their ids are equal, regardless of the other fields.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Unique asset identifier
    pub id: String,

    /// Owning user
    pub owner_id: String,

    /// Image or video
    pub media_type: MediaType,

    /// Stored path of the original file
    pub original_path: PathBuf,

    /// Stored path of the preview (older catalogs only)
    pub preview_path: Option<PathBuf>,

    /// Stored path of the thumbnail (older catalogs only)
    pub thumbnail_path: Option<PathBuf>,

    /// Stored path of the transcoded video
    pub encoded_video_path: Option<PathBuf>,

    /// SHA-1 digest of the original file
    pub checksum: Vec<u8>,

    /// Hidden assets are companions of another asset (e.g. live photo videos)
    pub is_visible: bool,

    /// Motion part of a live photo
    pub live_photo_video_id: Option<String>,

    /// Stored path of the XMP sidecar
    pub sidecar_path: Option<PathBuf>,

    /// Capture date-time as shown to the user, without timezone
    pub local_date_time: NaiveDateTime,
}

impl Asset {
    /// Create a visible asset with only the mandatory fields set
    pub fn new(
        id: impl Into<String>,
        media_type: MediaType,
        original_path: PathBuf,
        local_date_time: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: String::new(),
            media_type,
            original_path,
            preview_path: None,
            thumbnail_path: None,
            encoded_video_path: None,
            checksum: Vec::new(),
            is_visible: true,
            live_photo_video_id: None,
            sidecar_path: None,
            local_date_time,
        }
    }

    /// Every stored path this asset references directly
    pub fn referenced_paths(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.original_path)
            .chain(self.encoded_video_path.as_ref())
            .chain(self.sidecar_path.as_ref())
            .chain(self.preview_path.as_ref())
            .chain(self.thumbnail_path.as_ref())
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Asset {}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
