use crate::domain::Person;
use crate::photo::source::extension_of;

pub const DEFAULT_EXTENSION: &str = "jpg";

/// Replaces characters that would split an archive path.
pub fn path_safe(s: &str) -> String {
    s.replace(['/', '\\'], "_")
}

/// `{last}_{first}_{reference}.{ext}`, keeping the original extension as written.
pub fn canonical_file_name(person: &Person, original_name: &str) -> String {
    let ext = extension_of(original_name).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    path_safe(&format!(
        "{}_{}_{}.{}",
        person.last_name, person.first_name, person.reference, ext
    ))
}

/// Inserts `_{n}` before the extension: `a.jpg` -> `a_2.jpg`.
pub fn numbered(name: &str, n: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{n}.{ext}"),
        _ => format!("{name}_{n}"),
    }
}
