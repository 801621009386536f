use crate::Zone;
use assistant_core::Asset;
use std::fmt;

/// Outcome of resolving one asset's timezone
///
/// Ordered for summaries: untouched, missing EXIF data, missing range, then
/// fixes sorted by old zone (absent first) and new zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FixTimezoneResult {
    Untouched,
    MissingExifData,
    MissingTimezoneRange,
    TimezoneFixed { old: Option<Zone>, new: Zone },
}

impl FixTimezoneResult {
    /// `<id> (<old>|??? --> <new>): <originalPath>`, for fixed assets only
    pub fn log_line(&self, asset: &Asset) -> Option<String> {
        match self {
            FixTimezoneResult::TimezoneFixed { old, new } => Some(format!(
                "{} ({} --> {}): {}",
                asset.id,
                old.as_ref().map_or("???", Zone::id),
                new,
                asset.original_path.display()
            )),
            _ => None,
        }
    }
}

impl fmt::Display for FixTimezoneResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixTimezoneResult::Untouched => f.write_str("Untouched"),
            FixTimezoneResult::MissingExifData => f.write_str("Missing EXIF data"),
            FixTimezoneResult::MissingTimezoneRange => f.write_str("Missing timezone range"),
            FixTimezoneResult::TimezoneFixed { old, new } => write!(
                f,
                "Fixed from {} to {new}",
                old.as_ref().map_or("no timezone", Zone::id)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::MediaType;

    fn fixed(old: Option<&str>, new: &str) -> FixTimezoneResult {
        FixTimezoneResult::TimezoneFixed {
            old: old.map(|z| z.parse().unwrap()),
            new: new.parse().unwrap(),
        }
    }

    #[test]
    fn test_summary_order() {
        let mut results = vec![
            fixed(Some("UTC+2"), "Europe/Rome"),
            FixTimezoneResult::MissingTimezoneRange,
            fixed(Some("America/Toronto"), "Europe/Rome"),
            fixed(None, "Europe/Rome"),
            FixTimezoneResult::Untouched,
            fixed(None, "Asia/Tokyo"),
            FixTimezoneResult::MissingExifData,
        ];
        results.sort();

        assert_eq!(
            results,
            vec![
                FixTimezoneResult::Untouched,
                FixTimezoneResult::MissingExifData,
                FixTimezoneResult::MissingTimezoneRange,
                fixed(None, "Asia/Tokyo"),
                fixed(None, "Europe/Rome"),
                fixed(Some("America/Toronto"), "Europe/Rome"),
                fixed(Some("UTC+2"), "Europe/Rome"),
            ]
        );
    }

    #[test]
    fn test_log_line() {
        let mut asset = Asset::new(
            "a1",
            MediaType::Image,
            "/usr/src/app/upload/library/admin/IMG_1.jpg".into(),
            "2024-07-03T18:30:00".parse().unwrap(),
        );
        asset.owner_id = "u1".to_string();

        assert_eq!(
            fixed(None, "Europe/Rome").log_line(&asset).unwrap(),
            "a1 (??? --> Europe/Rome): /usr/src/app/upload/library/admin/IMG_1.jpg"
        );
        assert_eq!(
            fixed(Some("UTC+2"), "Europe/Rome").log_line(&asset).unwrap(),
            "a1 (UTC+02:00 --> Europe/Rome): /usr/src/app/upload/library/admin/IMG_1.jpg"
        );
        assert_eq!(FixTimezoneResult::Untouched.log_line(&asset), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            fixed(None, "Europe/Rome").to_string(),
            "Fixed from no timezone to Europe/Rome"
        );
        assert_eq!(FixTimezoneResult::MissingExifData.to_string(), "Missing EXIF data");
    }
}
