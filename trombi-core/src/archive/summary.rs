use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zip::ZipArchive;

use crate::error::{Result, TrombiError};

pub const LOGO_STEM: &str = "logo";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSummary {
    pub photo_count: usize,
    pub has_logo: bool,
}

/// Per-reference content of a photo archive.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub project_name: Option<String>,
    pub references: BTreeMap<String, ReferenceSummary>,
    pub total_photos: usize,
}

fn is_logo_entry(name: &str) -> bool {
    name.to_lowercase()
        .strip_prefix(LOGO_STEM)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Project part of `photos_{project}_{YYYY-MM-DD}.zip`, if the name has one.
pub fn project_from_archive_name(file_name: &str) -> Option<String> {
    let body = file_name.strip_prefix("photos_")?.strip_suffix(".zip")?;
    // trailing "_YYYY-MM-DD"
    if body.len() <= 11 || !body.is_char_boundary(body.len() - 11) {
        return None;
    }
    let (project, date) = body.split_at(body.len() - 11);
    let date_ok = date.starts_with('_')
        && date[1..]
            .chars()
            .enumerate()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    date_ok.then(|| project.to_string())
}

/// Reads back an archive and counts photos and logos per reference folder.
pub fn inspect_archive(path: &Path) -> Result<ArchiveSummary> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if !file_name.to_lowercase().ends_with(".zip") {
        return Err(TrombiError::Format(format!(
            "not a zip archive: {}",
            path.display()
        )));
    }

    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut summary = ArchiveSummary {
        project_name: project_from_archive_name(&file_name),
        ..Default::default()
    };
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        let Some((folder, rest)) = name.split_once('/') else {
            // files at the root belong to no reference
            continue;
        };
        let refs = summary.references.entry(folder.to_string()).or_default();
        if rest.is_empty() || entry.is_dir() {
            continue;
        }
        if is_logo_entry(rest) {
            refs.has_logo = true;
        } else {
            refs.photo_count += 1;
            summary.total_photos += 1;
        }
    }
    Ok(summary)
}
