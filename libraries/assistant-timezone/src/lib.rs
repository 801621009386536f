//! Immich Assistant Timezone
//!
//! Detects the timezone an asset should carry from user-supplied ranges of
//! local date-times, and decides whether the recorded EXIF timezone should be
//! replaced. Everything here is pure; nothing is written back.
//!
//! # Example
//!
//! ```rust
//! use assistant_timezone::{OverridePolicy, TimezoneRange, TimezoneRanges, TimezoneResolver};
//!
//! let range: TimezoneRange = "Europe/Rome,2024-07-01T00:00,2024-07-15T00:00".parse().unwrap();
//! let ranges = TimezoneRanges::new(vec![range]).unwrap();
//! let resolver = TimezoneResolver::new(ranges, OverridePolicy::Never);
//!
//! let local = "2024-07-03T18:30:00".parse().unwrap();
//! assert_eq!(resolver.detect(local).map(|z| z.id()), Some("Europe/Rome"));
//! ```

mod error;
mod range;
mod resolver;
mod result;
mod zone;

pub use error::{Result, TimezoneError};
pub use range::{are_mutually_exclusive, parse_local_date_time, TimezoneRange, TimezoneRanges};
pub use resolver::{AssetOutcome, OverridePolicy, TimezoneResolver};
pub use result::FixTimezoneResult;
pub use zone::Zone;
