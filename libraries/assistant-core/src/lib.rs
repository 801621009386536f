//! Immich Assistant Core
//!
//! Catalog model types, storage-path resolution and checksum helpers shared by
//! every other crate in the workspace.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Asset`, `AssetFile`, `Person`, `ExifData` as read from the catalog
//! - **Derived Types**: `TrackedFile` and `PathWithSize`, built fresh on every run
//! - **Paths**: `StorageLayout` re-roots catalog paths onto the local upload location
//! - **Digest**: streaming SHA-1, the checksum Immich records for originals
//!
//! # Example
//!
//! ```rust
//! use assistant_core::{Asset, MediaType, StorageLayout};
//! use chrono::NaiveDate;
//! use std::path::{Path, PathBuf};
//!
//! let layout = StorageLayout::new("/mnt/photos", "/usr/src/app/upload");
//! let taken = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let asset = Asset::new(
//!     "a1",
//!     MediaType::Image,
//!     PathBuf::from("/usr/src/app/upload/library/admin/2024/IMG_0001.jpg"),
//!     taken,
//! );
//!
//! assert_eq!(
//!     layout.resolve(&asset.original_path),
//!     Path::new("/mnt/photos/library/admin/2024/IMG_0001.jpg"),
//! );
//! ```

#![forbid(unsafe_code)]

pub mod digest;
pub mod error;
pub mod paths;
pub mod types;

pub use error::{CoreError, Result};
pub use paths::StorageLayout;
pub use types::{
    Asset, AssetFile, AssetFileType, EntityKind, EntityRef, ExifData, FileRole, MediaType,
    PathWithSize, Person, TotalSize, TrackedFile,
};
