#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod naming;
pub mod policy;

pub mod photo {
    pub mod intake;
    pub mod preview;
    pub mod source;
}

pub mod ingest {
    pub mod columns;
    pub mod sheet;
}

pub mod assoc {
    pub mod engine;
    pub mod matcher;
    pub mod store;
}

pub mod archive {
    pub mod builder;
    pub mod layout;
    pub mod name;
    pub mod summary;
}

// Re-exports: stable API surface
pub use archive::builder::{
    ArchiveOptions, BuiltArchive, Compression, build_archive, export_single, write_archive,
};
pub use archive::summary::{ArchiveSummary, ReferenceSummary, inspect_archive};
pub use assoc::engine::{AssociationEngine, MatchReport};
pub use domain::{Person, PhotoId, PhotoMapping, PoolEntry};
pub use error::{Result, TrombiError};
pub use ingest::columns::{ColumnReport, DetectedColumns, detect_columns};
pub use ingest::sheet::{read_persons, read_persons_from_path};
pub use photo::intake::{Inputs, collect_inputs};
pub use photo::source::Photo;
pub use policy::{AssociationPolicy, MatchEligibility, ReassignPolicy};
