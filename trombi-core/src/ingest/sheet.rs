use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tracing::{debug, info};

use crate::domain::Person;
use crate::error::{Result, TrombiError};
use crate::ingest::columns::{ColumnReport, detect_columns};

/// First sheet of a workbook as a header row plus data rows of the same width.
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn cell_text(c: &Data) -> String {
    match c {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Header titles with blanks and repeats made unique (`__EMPTY`, `Nom_1`, ...).
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .map(|h| {
            let base = if h.is_empty() { "__EMPTY".to_string() } else { h };
            let n = seen.entry(base.clone()).or_insert(0);
            let name = if *n == 0 {
                base
            } else {
                format!("{base}_{n}")
            };
            *n += 1;
            name
        })
        .collect()
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Table::default();
    };
    let headers = unique_headers(header_row.iter().map(cell_text).collect());
    let width = headers.len();
    let rows = rows
        .map(|r| {
            let mut cells: Vec<String> = r.iter().take(width).map(cell_text).collect();
            cells.resize(width, String::new());
            cells
        })
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();
    Table { headers, rows }
}

/// Parses the first sheet of an xlsx/xls/xlsb/ods workbook held in memory.
pub fn read_table(bytes: Vec<u8>) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TrombiError::Sheet("workbook contains no sheets".into()))?;
    let range = workbook.worksheet_range(&sheet)?;
    let table = table_from_range(&range);
    debug!(sheet = %sheet, columns = table.headers.len(), rows = table.rows.len(), "read sheet");
    Ok(table)
}

pub fn read_table_from_path(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    read_table(bytes)
}

impl Table {
    pub fn column_report(&self) -> ColumnReport {
        ColumnReport::new(self.headers.clone())
    }

    /// One person per data row. Columns are looked up among the headers whose
    /// cell is filled in that row, so a blank cell falls back to the next
    /// matching column or to a numbered placeholder.
    pub fn persons(&self) -> Result<Vec<Person>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, cells)| -> Result<Person> {
                let id = person_id(index)?;
                let present: Vec<(usize, &str)> = self
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !cells[*i].is_empty())
                    .map(|(i, h)| (i, h.as_str()))
                    .collect();
                let titles: Vec<&str> = present.iter().map(|(_, h)| *h).collect();
                let cols = detect_columns(&titles);
                let value = |col: Option<usize>| col.map(|c| cells[present[c].0].clone());

                let n = index + 1;
                Ok(Person {
                    id,
                    first_name: value(cols.first_name).unwrap_or_else(|| format!("Prénom {n}")),
                    last_name: value(cols.last_name).unwrap_or_else(|| format!("Nom {n}")),
                    reference: value(cols.reference).unwrap_or_else(|| format!("REF-{n}")),
                })
            })
            .collect()
    }
}

/// Person ids are `u32`; a sheet with more data rows is refused.
fn person_id(row_index: usize) -> Result<u32> {
    u32::try_from(row_index).map_err(|_| {
        TrombiError::Sheet(format!(
            "too many rows: row {} has no person id",
            row_index + 1
        ))
    })
}

pub fn read_persons(bytes: Vec<u8>) -> Result<Vec<Person>> {
    let persons = read_table(bytes)?.persons()?;
    info!(count = persons.len(), "persons loaded from spreadsheet");
    Ok(persons)
}

pub fn read_persons_from_path(path: &Path) -> Result<Vec<Person>> {
    let persons = read_table_from_path(path)?.persons()?;
    info!(count = persons.len(), path = %path.display(), "persons loaded from spreadsheet");
    Ok(persons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn placeholders_use_one_based_row_numbers() {
        let t = table(&["Col A", "Col B"], &[&["x", "y"], &["z", "w"]]);
        let persons = t.persons().unwrap();
        assert_eq!(persons.len(), 2);
        assert_eq!(persons[1].id, 1);
        assert_eq!(persons[1].first_name, "Prénom 2");
        assert_eq!(persons[1].last_name, "Nom 2");
        assert_eq!(persons[1].reference, "REF-2");
    }

    #[test]
    fn blank_cell_falls_back_per_row() {
        let t = table(
            &["Nom", "Prénom", "Référence"],
            &[&["Dupont", "Jean", "A"], &["Martin", "", "B"]],
        );
        let persons = t.persons().unwrap();
        assert_eq!(persons[0].first_name, "Jean");
        assert_eq!(persons[1].first_name, "Prénom 2");
        assert_eq!(persons[1].last_name, "Martin");
    }

    #[test]
    fn blank_cell_uses_next_matching_column() {
        let t = table(&["Nom usage", "Nom", "Prénom"], &[&["", "Durand", "Léa"]]);
        assert_eq!(t.persons().unwrap()[0].last_name, "Durand");
    }

    #[test]
    fn header_names_made_unique() {
        let h = unique_headers(vec!["Nom".into(), "".into(), "Nom".into(), "".into()]);
        assert_eq!(h, vec!["Nom", "__EMPTY", "Nom_1", "__EMPTY_1"]);
    }

    #[test]
    fn person_ids_stop_at_u32() {
        assert_eq!(person_id(0).unwrap(), 0);
        assert_eq!(person_id(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn row_past_u32_is_refused() {
        let err = person_id(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, TrombiError::Sheet(_)));
    }
}
