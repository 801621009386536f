/// EXIF data recorded for an asset
use chrono::{DateTime, Utc};

/// At most one row per asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifData {
    pub asset_id: String,

    /// Capture instant as extracted from the file
    pub date_time_original: Option<DateTime<Utc>>,

    /// Timezone name as recorded by Immich, if any
    pub time_zone: Option<String>,
}
