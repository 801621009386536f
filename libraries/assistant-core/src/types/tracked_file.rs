/// Files tracked by the catalog, built fresh on every run
use std::fmt;
use std::path::PathBuf;

/// Which catalog table a tracked file comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Asset,
    AssetFile,
    Person,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Asset => "Asset",
            EntityKind::AssetFile => "AssetFile",
            EntityKind::Person => "Person",
        })
    }
}

/// Lightweight pointer back to the owning catalog row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Role a file plays for its owning entity
///
/// The declaration order is the order in which roles are emitted per asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileRole {
    Original,
    Thumbnail,
    Preview,
    EncodedVideo,
    Profile,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileRole::Original => "ORIGINAL",
            FileRole::Thumbnail => "THUMBNAIL",
            FileRole::Preview => "PREVIEW",
            FileRole::EncodedVideo => "ENCODED_VIDEO",
            FileRole::Profile => "PROFILE",
        })
    }
}

/// A file the catalog expects to find on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub entity: EntityRef,

    /// Absolute path on the local filesystem
    pub path: PathBuf,

    pub role: FileRole,

    /// Expected SHA-1, only known for originals
    pub checksum: Option<Vec<u8>>,
}
