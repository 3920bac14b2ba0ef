use std::collections::{BTreeMap, HashMap};

use crate::domain::PhotoMapping;
use crate::naming::{numbered, path_safe};

/// Folder a reference asks for inside the archive. Only separators and names
/// the archive cannot hold are rewritten, so distinct references can still
/// land on the same name; `group_by_reference` settles that.
pub fn folder_name(reference: &str) -> String {
    let name = path_safe(reference);
    match name.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => name,
    }
}

#[derive(Clone, Debug)]
pub struct LayoutEntry<'a> {
    pub mapping: &'a PhotoMapping,
    /// Name inside the folder; the canonical name unless it collided.
    pub entry_name: String,
}

/// Mappings bucketed by reference folder. Folders iterate in name order,
/// entries in the order the mappings were given.
#[derive(Clone, Debug, Default)]
pub struct ArchiveLayout<'a> {
    pub folders: BTreeMap<String, Vec<LayoutEntry<'a>>>,
}

impl<'a> ArchiveLayout<'a> {
    pub fn total_photos(&self) -> usize {
        self.folders.values().map(Vec::len).sum()
    }
}

/// Folder for `reference`, claiming `{name}_2`, `{name}_3`, ... when its name
/// already belongs to another reference.
fn claim_folder<'a>(owners: &mut HashMap<String, &'a str>, reference: &'a str) -> String {
    let base = folder_name(reference);
    let mut candidate = base.clone();
    let mut n = 2;
    loop {
        match owners.get(&candidate) {
            Some(owner) if *owner == reference => return candidate,
            Some(_) => {
                candidate = format!("{base}_{n}");
                n += 1;
            }
            None => {
                owners.insert(candidate.clone(), reference);
                return candidate;
            }
        }
    }
}

/// Groups mappings by reference, one folder per distinct reference. Two
/// photos landing on the same name in one folder (or on a name in `reserved`)
/// get `_2`, `_3`, ... suffixes.
pub fn group_by_reference<'a>(
    mappings: impl IntoIterator<Item = &'a PhotoMapping>,
    reserved: &[String],
) -> ArchiveLayout<'a> {
    let mut layout = ArchiveLayout::default();
    let mut owners: HashMap<String, &'a str> = HashMap::new();
    for mapping in mappings {
        let folder = claim_folder(&mut owners, &mapping.person.reference);
        let entries = layout.folders.entry(folder).or_default();
        let taken = |n: &str| {
            reserved.iter().any(|r| r.eq_ignore_ascii_case(n))
                || entries.iter().any(|e| e.entry_name.eq_ignore_ascii_case(n))
        };
        let mut entry_name = mapping.file_name.clone();
        let mut n = 2;
        while taken(&entry_name) {
            entry_name = numbered(&mapping.file_name, n);
            n += 1;
        }
        entries.push(LayoutEntry {
            mapping,
            entry_name,
        });
    }
    layout
}
