/// Generated derivative files of an asset
use crate::CoreError;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of derivative stored in `assets_files`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFileType {
    Preview,
    Thumbnail,
}

impl FromStr for AssetFileType {
    type Err = CoreError;

    /// The catalog spelling has changed case between releases, so matching ignores it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("preview") {
            Ok(AssetFileType::Preview)
        } else if s.eq_ignore_ascii_case("thumbnail") {
            Ok(AssetFileType::Thumbnail)
        } else {
            Err(CoreError::unknown_variant("asset file type", s))
        }
    }
}

/// A preview or thumbnail belonging to one asset
#[derive(Debug, Clone)]
pub struct AssetFile {
    pub id: String,
    pub asset_id: String,
    pub file_type: AssetFileType,
    pub path: PathBuf,
}

impl PartialEq for AssetFile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AssetFile {}

impl Hash for AssetFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
