/// Domain types for Immich Assistant
mod asset;
mod asset_file;
mod exif;
mod files;
mod person;
mod tracked_file;

pub use asset::{Asset, MediaType};
pub use asset_file::{AssetFile, AssetFileType};
pub use exif::ExifData;
pub use files::{PathWithSize, TotalSize};
pub use person::Person;
pub use tracked_file::{EntityKind, EntityRef, FileRole, TrackedFile};
