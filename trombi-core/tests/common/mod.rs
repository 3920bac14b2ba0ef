#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use trombi_core::{Person, Photo};

/// In-memory .xlsx whose first sheet holds `headers` then `rows`.
pub fn xlsx(headers: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (c, h) in headers.iter().enumerate() {
        ws.write_string(0, c as u16, *h).expect("write header");
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            if !v.is_empty() {
                ws.write_string(r as u32 + 1, c as u16, *v).expect("write cell");
            }
        }
    }
    wb.save_to_buffer().expect("serialize workbook")
}

pub fn person(id: u32, first: &str, last: &str, reference: &str) -> Person {
    Person {
        id,
        first_name: first.into(),
        last_name: last.into(),
        reference: reference.into(),
    }
}

pub fn photo(name: &str) -> Photo {
    Photo::from_bytes(name, format!("bytes of {name}").into_bytes())
}
