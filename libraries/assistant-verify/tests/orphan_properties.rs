//! Property-based tests for orphan detection
//!
//! Files on disk and catalog originals are drawn from one small pool of
//! names, and disk paths are spelled in lexically equivalent ways, so
//! matches and misses both occur often.

use assistant_core::paths::DEFAULT_MEDIA_LOCATION;
use assistant_core::{Asset, MediaType, PathWithSize, StorageLayout};
use assistant_verify::{find_orphans, referenced_paths};
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::PathBuf;

// ===== Helpers =====

const UPLOAD_LOCATION: &str = "/mnt/immich";

fn captured() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn name(index: u8) -> String {
    format!("library/admin/{index}.jpg")
}

/// One file, spelled one of three equivalent ways
fn on_disk_path(index: u8, spelling: u8) -> PathBuf {
    let name = name(index);
    PathBuf::from(match spelling.wrapping_add(index) % 3 {
        0 => format!("{UPLOAD_LOCATION}/{name}"),
        1 => format!("{UPLOAD_LOCATION}/./{name}"),
        _ => format!("{UPLOAD_LOCATION}/library/../{name}"),
    })
}

fn catalog(indices: &BTreeSet<u8>) -> Vec<Asset> {
    indices
        .iter()
        .map(|&i| {
            Asset::new(
                format!("a{i}"),
                MediaType::Image,
                PathBuf::from(format!("{DEFAULT_MEDIA_LOCATION}/{}", name(i))),
                captured(),
            )
        })
        .collect()
}

// ===== Property Tests =====

proptest! {
    /// Orphans are exactly the disk files the catalog does not reference,
    /// in listing order
    #[test]
    fn orphans_are_exact_set_difference(
        on_disk in prop::collection::btree_set(0u8..24, 0..16),
        in_catalog in prop::collection::btree_set(0u8..24, 0..16),
        spelling in any::<u8>(),
    ) {
        let layout = StorageLayout::new(UPLOAD_LOCATION, DEFAULT_MEDIA_LOCATION);
        let assets = catalog(&in_catalog);
        let files: Vec<PathWithSize> = on_disk
            .iter()
            .map(|&i| PathWithSize::new(on_disk_path(i, spelling), 1))
            .collect();

        let referenced = referenced_paths(&assets, &[], &[], &layout);
        let orphans: Vec<PathBuf> = find_orphans(&files, &referenced)
            .into_iter()
            .map(|file| file.path)
            .collect();

        let expected: Vec<PathBuf> = on_disk
            .difference(&in_catalog)
            .map(|&i| on_disk_path(i, spelling))
            .collect();
        prop_assert_eq!(orphans, expected);
    }

    /// Referencing every listed file leaves no orphans
    #[test]
    fn fully_referenced_disk_has_no_orphans(
        on_disk in prop::collection::btree_set(0u8..24, 0..16),
        spelling in any::<u8>(),
    ) {
        let layout = StorageLayout::new(UPLOAD_LOCATION, DEFAULT_MEDIA_LOCATION);
        let files: Vec<PathWithSize> = on_disk
            .iter()
            .map(|&i| PathWithSize::new(on_disk_path(i, spelling), 1))
            .collect();

        let referenced = referenced_paths(&catalog(&on_disk), &[], &[], &layout);
        prop_assert!(find_orphans(&files, &referenced).is_empty());
    }
}
