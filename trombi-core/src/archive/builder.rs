use std::fs;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::archive::layout::group_by_reference;
use crate::archive::name::{archive_file_name, project_slug, today_utc};
use crate::archive::summary::{ArchiveSummary, LOGO_STEM, ReferenceSummary};
use crate::domain::PhotoMapping;
use crate::error::{Result, TrombiError};
use crate::photo::source::Photo;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl From<Compression> for CompressionMethod {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArchiveOptions {
    /// Goes into the archive name (spaces become `_`).
    pub project_name: Option<String>,
    /// Date in the archive name; today (UTC) when unset.
    pub date: Option<Date>,
    /// When true, every entry carries the zip epoch as timestamp so equal
    /// inputs give byte-identical archives.
    pub deterministic: bool,
    pub compression: Compression,
}

impl ArchiveOptions {
    /// Project as written into the archive name, so a summary read back from
    /// the file carries the same value.
    fn project(&self) -> Option<String> {
        project_slug(self.project_name.as_deref())
    }

    pub fn file_name(&self) -> String {
        archive_file_name(self.project_name.as_deref(), self.date.unwrap_or_else(today_utc))
    }
}

#[derive(Clone, Debug)]
pub struct BuiltArchive {
    pub path: PathBuf,
    pub summary: ArchiveSummary,
}

/// Name of the logo copy inside each folder: `logo.{ext}`, png when the logo
/// file has no extension.
pub fn logo_entry_name(logo: &Photo) -> String {
    let ext = logo
        .extension()
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "png".to_string());
    format!("{LOGO_STEM}.{ext}")
}

/// Writes one folder per reference holding every mapped photo under its
/// canonical name, plus a copy of `logo` in each folder when given.
///
/// All input bytes are read before anything is written, so a missing or
/// unreadable photo fails the build without emitting output.
pub fn build_archive<W: Write + Seek>(
    mappings: &[&PhotoMapping],
    logo: Option<&Photo>,
    opts: &ArchiveOptions,
    out: W,
) -> Result<ArchiveSummary> {
    if mappings.is_empty() {
        return Err(TrombiError::EmptyArchive);
    }

    let logo_name = logo.map(logo_entry_name);
    let reserved: Vec<String> = logo_name.iter().cloned().collect();
    let layout = group_by_reference(mappings.iter().copied(), &reserved);

    let planned: Vec<(&str, &str, &PhotoMapping)> = layout
        .folders
        .iter()
        .flat_map(|(folder, entries)| {
            entries
                .iter()
                .map(move |e| (folder.as_str(), e.entry_name.as_str(), e.mapping))
        })
        .collect();
    let contents: Vec<Vec<u8>> = planned
        .par_iter()
        .map(|(_, _, m)| m.photo.read_bytes())
        .collect::<Result<_>>()?;
    let logo_bytes = logo.map(Photo::read_bytes).transpose()?;

    let mut fo = FileOptions::default().compression_method(opts.compression.into());
    if opts.deterministic {
        fo = fo.last_modified_time(zip::DateTime::default());
    }

    let mut zip = ZipWriter::new(out);
    let mut summary = ArchiveSummary {
        project_name: opts.project(),
        ..Default::default()
    };
    for (folder, entries) in &layout.folders {
        zip.add_directory(format!("{folder}/"), fo)?;
        summary.references.insert(
            folder.clone(),
            ReferenceSummary {
                photo_count: entries.len(),
                has_logo: logo.is_some(),
            },
        );
    }
    for ((folder, name, _), bytes) in planned.iter().zip(&contents) {
        zip.start_file(format!("{folder}/{name}"), fo)?;
        zip.write_all(bytes)?;
        debug!(entry = %format!("{folder}/{name}"), size = bytes.len(), "photo written");
    }
    if let (Some(name), Some(bytes)) = (&logo_name, &logo_bytes) {
        for folder in layout.folders.keys() {
            zip.start_file(format!("{folder}/{name}"), fo)?;
            zip.write_all(bytes)?;
        }
    }
    let mut w = zip.finish()?;
    w.flush()?;

    summary.total_photos = layout.total_photos();
    Ok(summary)
}

/// Builds the archive into `dir` under its computed name. The file appears
/// only once complete; on error nothing is left behind.
pub fn write_archive(
    dir: &Path,
    mappings: &[&PhotoMapping],
    logo: Option<&Photo>,
    opts: &ArchiveOptions,
) -> Result<BuiltArchive> {
    fs::create_dir_all(dir)?;
    let path = dir.join(opts.file_name());
    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    let summary = build_archive(mappings, logo, opts, BufWriter::new(tmp.as_file()))?;
    tmp.persist(&path).map_err(|e| e.error)?;
    info!(
        path = %path.display(),
        folders = summary.references.len(),
        photos = summary.total_photos,
        "archive written"
    );
    Ok(BuiltArchive { path, summary })
}

/// Writes a single renamed copy of one mapped photo into `dir`.
pub fn export_single(mapping: &PhotoMapping, dir: &Path) -> Result<PathBuf> {
    let bytes = mapping.photo.read_bytes()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(&mapping.file_name);
    fs::write(&path, bytes)?;
    info!(path = %path.display(), person = mapping.person.id, "photo exported");
    Ok(path)
}
