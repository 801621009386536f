/// Timezone-specific errors
use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias using `TimezoneError`
pub type Result<T> = std::result::Result<T, TimezoneError>;

/// Timezone error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("Unknown timezone \"{0}\"")]
    UnknownZone(String),

    #[error("Invalid date/time \"{0}\", expected e.g. 2024-01-01T10:00")]
    InvalidDateTime(String),

    #[error("Invalid timezone range \"{0}\", expected <zone>,<start>,<endExclusive>")]
    InvalidRangeSyntax(String),

    #[error("Start of date/time range must be less than end of date/time range ({start} >= {end_exclusive})")]
    EmptyRange {
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
    },

    #[error("Timezone ranges must be mutually exclusive: {first} overlaps {second}")]
    OverlappingRanges { first: String, second: String },

    #[error("Unknown override policy \"{0}\", expected never, if-different-offset or if-different")]
    UnknownPolicy(String),

    /// The catalog holds a timezone we cannot interpret
    #[error("Asset {asset_id} has an unrecognized timezone \"{value}\"")]
    UnrecognizedRecordedZone { asset_id: String, value: String },
}
