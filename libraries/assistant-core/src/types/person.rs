/// Person (face cluster) domain type
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// A detected identity with an optional profile thumbnail
#[derive(Debug, Clone)]
pub struct Person {
    pub id: String,
    pub owner_id: String,
    pub thumbnail_path: Option<PathBuf>,
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
