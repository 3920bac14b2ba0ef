use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrombiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Auto-match needs both photos in the pool and persons to match against.
    #[error("nothing to match: {photos} unassigned photo(s), {persons} person(s)")]
    NothingToMatch { photos: usize, persons: usize },

    #[error("unknown person id {0}")]
    UnknownPerson(u32),

    #[error("photo index {index} out of range (pool holds {len})")]
    PhotoIndexOutOfRange { index: usize, len: usize },

    #[error("person {0} has no photo assigned")]
    NotMapped(u32),

    #[error("no photo mappings to archive")]
    EmptyArchive,

    #[error("Format error: {0}")]
    Format(String),
}

impl From<calamine::Error> for TrombiError {
    fn from(e: calamine::Error) -> Self {
        TrombiError::Sheet(e.to_string())
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, TrombiError>;
