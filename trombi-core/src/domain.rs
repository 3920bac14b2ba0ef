// trombi_core/src/domain.rs
use serde::{Deserialize, Serialize};

use crate::photo::source::Photo;

/// One spreadsheet row. `id` is the 0-based index of the row among the data rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub reference: String,
}

/// Identity handed out when a photo enters the association engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhotoId(pub u64);

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed association between one person and one photo.
#[derive(Clone, Debug)]
pub struct PhotoMapping {
    pub person: Person,
    pub photo_id: PhotoId,
    pub photo: Photo,
    /// `data:<mime>;base64,...` rendering of the photo.
    pub photo_preview: String,
    pub file_name: String,
}

/// A photo sitting in the unassigned pool.
#[derive(Clone, Debug)]
pub struct PoolEntry {
    pub id: PhotoId,
    pub photo: Photo,
}
