//! Timezone identifiers: IANA regions and fixed offsets

use crate::{Result, TimezoneError};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const OFFSET_PREFIXES: [&str; 3] = ["UTC", "GMT", "UT"];
const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A timezone as recorded in EXIF data or given on the command line
///
/// Zones compare by identifier only: `America/Toronto` and `America/New_York`
/// are different zones even though their offsets always agree.
#[derive(Debug, Clone)]
pub enum Zone {
    /// IANA region such as `Europe/Rome`
    Named(Tz),
    /// Fixed offset such as `UTC+02:00` or `+05:30`
    Fixed { id: String, offset: FixedOffset },
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Named(Tz::UTC)
    }

    pub fn id(&self) -> &str {
        match self {
            Zone::Named(tz) => tz.name(),
            Zone::Fixed { id, .. } => id,
        }
    }

    /// The instant a local date-time denotes in this zone
    ///
    /// An ambiguous local time (clocks turned back) maps to the earlier
    /// instant. A local time inside a gap (clocks turned forward) is read
    /// with the offset in effect before the gap.
    pub fn to_instant(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Zone::Fixed { offset, .. } => shift(local, offset.local_minus_utc()),
            Zone::Named(tz) => match tz.from_local_datetime(&local) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                LocalResult::None => {
                    let before_gap = tz
                        .offset_from_local_datetime(&(local - TimeDelta::days(1)))
                        .earliest()
                        .unwrap_or_else(|| tz.offset_from_utc_datetime(&local));
                    shift(local, before_gap.fix().local_minus_utc())
                }
            },
        }
    }
}

fn shift(local: NaiveDateTime, offset_seconds: i32) -> DateTime<Utc> {
    (local - TimeDelta::seconds(i64::from(offset_seconds))).and_utc()
}

impl FromStr for Zone {
    type Err = TimezoneError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(tz) = s.parse::<Tz>() {
            return Ok(Zone::Named(tz));
        }
        parse_fixed(s).ok_or_else(|| TimezoneError::UnknownZone(s.to_string()))
    }
}

fn parse_fixed(s: &str) -> Option<Zone> {
    if s == "Z" {
        return fixed("Z".to_string(), 0);
    }

    let (prefix, rest) = OFFSET_PREFIXES
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix).map(|rest| (*prefix, rest)))
        .unwrap_or(("", s));

    if rest.is_empty() {
        return if prefix.is_empty() {
            None
        } else {
            fixed(prefix.to_string(), 0)
        };
    }

    let seconds = parse_offset(rest)?;
    let id = match (prefix, seconds) {
        ("", 0) => "Z".to_string(),
        (prefix, 0) => prefix.to_string(),
        (prefix, seconds) => format!("{prefix}{}", format_offset(seconds)),
    };
    fixed(id, seconds)
}

fn fixed(id: String, seconds: i32) -> Option<Zone> {
    FixedOffset::east_opt(seconds).map(|offset| Zone::Fixed { id, offset })
}

/// `+H`, `+HH`, `+HHMM`, `+HH:MM`, `+HHMMSS` or `+HH:MM:SS`, signed
fn parse_offset(s: &str) -> Option<i32> {
    let (sign, digits) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    if !digits.is_ascii() {
        return None;
    }

    let parts: Vec<&str> = if digits.contains(':') {
        digits.split(':').collect()
    } else {
        match digits.len() {
            1 | 2 => vec![digits],
            4 => vec![&digits[..2], &digits[2..]],
            6 => vec![&digits[..2], &digits[2..4], &digits[4..]],
            _ => return None,
        }
    };
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut fields = [0_i32; 3];
    for (field, part) in fields.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *field = part.parse().ok()?;
    }
    let [hours, minutes, seconds] = fields;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = hours * 3600 + minutes * 60 + seconds;
    (total <= MAX_OFFSET_SECONDS).then_some(sign * total)
}

fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    let (hours, minutes, secs) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if secs == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{secs:02}")
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Zone {}

impl Hash for Zone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for Zone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Zone {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}
