//! Immich Assistant Verify
//!
//! Compares what the catalog records against what is on disk:
//!
//! - **Consistency**: every tracked file exists, and originals still match
//!   their recorded SHA-1
//! - **Orphans**: files under the storage root that no catalog row references
//! - **Directory**: which files of an arbitrary directory are already in the
//!   catalog, by checksum
//!
//! [`VerifyFilters`] decides which catalog files and which storage
//! directories take part. Per-file work fans out through a
//! [`FilesProgress`](assistant_tasks::FilesProgress).

mod consistency;
mod dir;
mod error;
mod filters;
mod listing;
mod orphans;

pub use consistency::{check_file, verify_consistency, ConsistencyReport, VerifiedFile, VerifyResult};
pub use dir::{checksum_index, verify_dir, DirReport};
pub use error::{Result, VerifyError};
pub use filters::VerifyFilters;
pub use listing::{list_files, walk_files, FileSystemListing};
pub use orphans::{find_orphans, referenced_paths};
