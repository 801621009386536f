/// Filesystem listing types
use std::path::PathBuf;

/// A file discovered on disk together with its size in bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathWithSize {
    pub path: PathBuf,
    pub size: u64,
}

impl PathWithSize {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Sum of the sizes of a set of files
pub trait TotalSize {
    fn total_size(&self) -> u64;
}

impl TotalSize for [PathWithSize] {
    fn total_size(&self) -> u64 {
        self.iter().map(|f| f.size).sum()
    }
}
