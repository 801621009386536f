//! Half-open local date-time ranges tagged with a zone

use crate::{Result, TimezoneError, Zone};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO local date-time, with or without seconds
pub fn parse_local_date_time(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .ok_or_else(|| TimezoneError::InvalidDateTime(s.to_string()))
}

/// `[start, end_exclusive)` in local time, during which assets were taken in `zone`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneRange {
    zone: Zone,
    start: NaiveDateTime,
    end_exclusive: NaiveDateTime,
}

impl TimezoneRange {
    pub fn new(zone: Zone, start: NaiveDateTime, end_exclusive: NaiveDateTime) -> Result<Self> {
        if start >= end_exclusive {
            return Err(TimezoneError::EmptyRange {
                start,
                end_exclusive,
            });
        }
        Ok(Self {
            zone,
            start,
            end_exclusive,
        })
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end_exclusive(&self) -> NaiveDateTime {
        self.end_exclusive
    }

    pub fn contains(&self, local: NaiveDateTime) -> bool {
        self.start <= local && local < self.end_exclusive
    }

    /// Whether the two ranges share at least one instant; symmetric
    pub fn intersects_with(&self, other: &TimezoneRange) -> bool {
        self.start < other.end_exclusive && other.start < self.end_exclusive
    }
}

impl fmt::Display for TimezoneRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.zone, self.start, self.end_exclusive)
    }
}

/// `<zone>,<start>,<endExclusive>`, e.g. `Europe/Rome,2024-07-01T00:00,2024-07-15T00:00`
impl FromStr for TimezoneRange {
    type Err = TimezoneError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        let [zone, start, end_exclusive] = parts.as_slice() else {
            return Err(TimezoneError::InvalidRangeSyntax(s.to_string()));
        };

        TimezoneRange::new(
            zone.parse()?,
            parse_local_date_time(start)?,
            parse_local_date_time(end_exclusive)?,
        )
    }
}

/// Whether no two ranges intersect
///
/// Only neighbors in start order need checking: if those are disjoint, every
/// later range starts after the current one ends.
pub fn are_mutually_exclusive(ranges: &[TimezoneRange]) -> bool {
    first_overlap(ranges).is_none()
}

fn first_overlap(ranges: &[TimezoneRange]) -> Option<(&TimezoneRange, &TimezoneRange)> {
    let mut sorted: Vec<&TimezoneRange> = ranges.iter().collect();
    sorted.sort_by_key(|range| range.start);
    sorted
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .find(|(a, b)| a.intersects_with(b))
}

/// A validated set of mutually exclusive ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimezoneRanges {
    ranges: Vec<TimezoneRange>,
}

impl TimezoneRanges {
    pub fn new(ranges: Vec<TimezoneRange>) -> Result<Self> {
        if let Some((first, second)) = first_overlap(&ranges) {
            return Err(TimezoneError::OverlappingRanges {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
        Ok(Self { ranges })
    }

    /// The range containing `local`; at most one can
    pub fn find(&self, local: NaiveDateTime) -> Option<&TimezoneRange> {
        self.ranges.iter().find(|range| range.contains(local))
    }
}
