//! Property-based tests for timezone ranges
//!
//! Ranges are generated on a minute grid inside a few days so overlaps,
//! adjacency and containment all occur often.

use assistant_timezone::{are_mutually_exclusive, TimezoneRange, TimezoneRanges, Zone};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;

// ===== Helpers =====

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn at(minutes: i64) -> NaiveDateTime {
    base() + TimeDelta::minutes(minutes)
}

fn arbitrary_range() -> impl Strategy<Value = TimezoneRange> {
    (0i64..5_000, 1i64..1_000).prop_map(|(start, length)| {
        TimezoneRange::new(Zone::utc(), at(start), at(start + length)).unwrap()
    })
}

fn brute_force_exclusive(ranges: &[TimezoneRange]) -> bool {
    ranges.iter().enumerate().all(|(i, a)| {
        ranges
            .iter()
            .skip(i + 1)
            .all(|b| !a.intersects_with(b))
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: intersection does not depend on argument order
    #[test]
    fn intersection_is_symmetric(a in arbitrary_range(), b in arbitrary_range()) {
        prop_assert_eq!(a.intersects_with(&b), b.intersects_with(&a));
    }

    /// Property: two ranges intersect iff some minute lies in both
    #[test]
    fn intersection_matches_shared_minute(a in arbitrary_range(), b in arbitrary_range()) {
        let shared = (0i64..6_000).map(at).any(|t| a.contains(t) && b.contains(t));
        prop_assert_eq!(a.intersects_with(&b), shared);
    }

    /// Property: the sorted-neighbor check agrees with checking every pair
    #[test]
    fn exclusivity_matches_pairwise_check(
        ranges in prop::collection::vec(arbitrary_range(), 3..12)
    ) {
        prop_assert_eq!(are_mutually_exclusive(&ranges), brute_force_exclusive(&ranges));
    }

    /// Property: validation accepts exactly the mutually exclusive sets, and
    /// an accepted set finds at most one range per instant
    #[test]
    fn validated_sets_have_unique_matches(
        ranges in prop::collection::vec(arbitrary_range(), 1..8),
        probe in 0i64..6_000
    ) {
        let exclusive = brute_force_exclusive(&ranges);
        let validated = TimezoneRanges::new(ranges.clone());
        prop_assert_eq!(validated.is_ok(), exclusive);

        if let Ok(validated) = validated {
            let matches = ranges.iter().filter(|r| r.contains(at(probe))).count();
            prop_assert!(matches <= 1);
            prop_assert_eq!(validated.find(at(probe)).is_some(), matches == 1);
        }
    }
}

#[test]
fn non_adjacent_overlap_is_detected() {
    // Sorted by start the overlapping pair is still adjacent, whatever the input order
    let ranges = vec![
        TimezoneRange::new(Zone::utc(), at(0), at(10)).unwrap(),
        TimezoneRange::new(Zone::utc(), at(100), at(110)).unwrap(),
        TimezoneRange::new(Zone::utc(), at(20), at(30)).unwrap(),
        TimezoneRange::new(Zone::utc(), at(5), at(15)).unwrap(),
    ];
    assert!(!are_mutually_exclusive(&ranges));
    assert!(!brute_force_exclusive(&ranges));
}
