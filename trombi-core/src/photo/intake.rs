use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::photo::preview::is_image_name;
use crate::photo::source::Photo;

/// Input files split the way the upload drop zone split them.
#[derive(Debug, Default)]
pub struct Inputs {
    pub spreadsheets: Vec<PathBuf>,
    pub photos: Vec<Photo>,
    /// Files that are neither a spreadsheet nor an image.
    pub ignored: Vec<PathBuf>,
}

pub fn is_spreadsheet_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// Walks every input (files are taken as-is, directories recursively) and sorts
/// the files into spreadsheets and photos. Order is stable: inputs in the order
/// given, directory contents sorted by path.
pub fn collect_inputs(inputs: &[&Path]) -> Result<Inputs> {
    let mut out = Inputs::default();
    for root in inputs {
        let mut files: Vec<PathBuf> = Vec::new();
        for e in WalkDir::new(root).follow_links(true) {
            let e = e.map_err(std::io::Error::from)?;
            if e.file_type().is_file() {
                files.push(e.path().to_path_buf());
            }
        }
        files.sort();

        for p in files {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if is_spreadsheet_name(&name) {
                out.spreadsheets.push(p);
            } else if is_image_name(&name) {
                out.photos.push(Photo::from_path(p)?);
            } else {
                debug!(path = %p.display(), "skipping non-image input");
                out.ignored.push(p);
            }
        }
    }
    Ok(out)
}
