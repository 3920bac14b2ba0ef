//! Header heuristics for the person spreadsheet.
//!
//! Headers come from hand-made sheets in French or English, so a column is
//! recognised by substring or exact match on its lowercased title. The first
//! header (left to right) that matches a role wins.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DetectedColumns {
    pub first_name: Option<usize>,
    pub last_name: Option<usize>,
    pub reference: Option<usize>,
}

fn is_first_name(h: &str) -> bool {
    h.contains("prénom") || h.contains("prenom") || h == "first name" || h == "firstname"
}

fn is_last_name(h: &str) -> bool {
    // "prenom" contains "nom"; both spellings must be ruled out.
    (h.contains("nom") && !h.contains("prénom") && !h.contains("prenom"))
        || h == "last name"
        || h == "lastname"
}

fn is_reference(h: &str) -> bool {
    h.contains("référence") || h.contains("reference") || h == "ref"
}

pub fn detect_columns<S: AsRef<str>>(headers: &[S]) -> DetectedColumns {
    let lowered: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();
    let find = |pred: fn(&str) -> bool| lowered.iter().position(|h| pred(h));
    DetectedColumns {
        first_name: find(is_first_name),
        last_name: find(is_last_name),
        reference: find(is_reference),
    }
}

/// Header names picked for each role, for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub headers: Vec<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub reference: Option<String>,
}

impl ColumnReport {
    pub fn new(headers: Vec<String>) -> Self {
        let cols = detect_columns(&headers);
        let pick = |i: Option<usize>| i.map(|i| headers[i].clone());
        Self {
            first_name: pick(cols.first_name),
            last_name: pick(cols.last_name),
            reference: pick(cols.reference),
            headers,
        }
    }
}
