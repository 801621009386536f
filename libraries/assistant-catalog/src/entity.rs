//! Row mapping for the consumed catalog tables

use crate::{CatalogError, Result};
use assistant_core::{Asset, AssetFile, AssetFileType, ExifData, MediaType, Person};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{Decode, Row, Type};
use std::path::PathBuf;
use uuid::Uuid;

/// A domain type backed by one catalog table
pub trait CatalogEntity: Sized + Send + Unpin {
    /// Unquoted table name
    const TABLE_NAME: &'static str;

    /// Map one `SELECT *` row
    fn from_row(row: &PgRow) -> Result<Self>;
}

impl CatalogEntity for Asset {
    const TABLE_NAME: &'static str = "assets";

    fn from_row(row: &PgRow) -> Result<Self> {
        let media_type: String = row.try_get("type")?;
        let media_type = media_type
            .parse::<MediaType>()
            .map_err(|e| CatalogError::decode(Self::TABLE_NAME, e.to_string()))?;

        // Older schemas have no localDateTime; fileCreatedAt is what they displayed instead.
        let local_date_time = match optional_column::<DateTime<Utc>>(row, "localDateTime")? {
            Some(instant) => instant,
            None => row.try_get::<DateTime<Utc>, _>("fileCreatedAt")?,
        };

        Ok(Asset {
            id: row.try_get::<Uuid, _>("id")?.to_string(),
            owner_id: row.try_get::<Uuid, _>("ownerId")?.to_string(),
            media_type,
            original_path: PathBuf::from(row.try_get::<String, _>("originalPath")?),
            preview_path: optional_path(row, "previewPath")?,
            thumbnail_path: optional_path(row, "thumbnailPath")?,
            encoded_video_path: optional_path(row, "encodedVideoPath")?,
            checksum: row.try_get("checksum")?,
            is_visible: optional_column::<bool>(row, "isVisible")?.unwrap_or(true),
            live_photo_video_id: optional_column::<Uuid>(row, "livePhotoVideoId")?
                .map(|id| id.to_string()),
            sidecar_path: optional_path(row, "sidecarPath")?,
            local_date_time: local_date_time.naive_utc(),
        })
    }
}

impl CatalogEntity for AssetFile {
    const TABLE_NAME: &'static str = "assets_files";

    fn from_row(row: &PgRow) -> Result<Self> {
        let file_type: String = row.try_get("type")?;
        let file_type = file_type
            .parse::<AssetFileType>()
            .map_err(|e| CatalogError::decode(Self::TABLE_NAME, e.to_string()))?;

        Ok(AssetFile {
            id: row.try_get::<Uuid, _>("id")?.to_string(),
            asset_id: row.try_get::<Uuid, _>("assetId")?.to_string(),
            file_type,
            path: PathBuf::from(row.try_get::<String, _>("path")?),
        })
    }
}

impl CatalogEntity for Person {
    const TABLE_NAME: &'static str = "person";

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Person {
            id: row.try_get::<Uuid, _>("id")?.to_string(),
            owner_id: row.try_get::<Uuid, _>("ownerId")?.to_string(),
            thumbnail_path: optional_path(row, "thumbnailPath")?,
        })
    }
}

impl CatalogEntity for ExifData {
    const TABLE_NAME: &'static str = "exif";

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(ExifData {
            asset_id: row.try_get::<Uuid, _>("assetId")?.to_string(),
            date_time_original: optional_column(row, "dateTimeOriginal")?,
            time_zone: optional_column::<String>(row, "timeZone")?
                .filter(|tz| !tz.trim().is_empty()),
        })
    }
}

/// Read a nullable column that some schema versions do not have at all
fn optional_column<'r, T>(row: &'r PgRow, column: &str) -> Result<Option<T>>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn optional_path(row: &PgRow, column: &str) -> Result<Option<PathBuf>> {
    Ok(non_empty_path(optional_column::<String>(row, column)?))
}

/// Immich stores `''` rather than NULL for some never-generated files
fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value.filter(|p| !p.is_empty()).map(PathBuf::from)
}
