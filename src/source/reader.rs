//! CSV / workbook → `Table` readers.

use crate::errors::{AppError, AppResult};
use crate::models::{Table, Value};
use crate::utils::date::{excel_serial_to_datetime, format_timestamp};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Parse CSV text (first record is the header row).
pub fn read_csv_str(text: &str, text_columns: &[String]) -> AppResult<Table> {
    read_csv(csv::ReaderBuilder::new().flexible(true).from_reader(text.as_bytes()), text_columns)
}

pub fn read_csv_path(path: &Path, text_columns: &[String]) -> AppResult<Table> {
    let rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    read_csv(rdr, text_columns)
}

fn read_csv<R: std::io::Read>(mut rdr: csv::Reader<R>, text_columns: &[String]) -> AppResult<Table> {
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        // righe completamente vuote (export di Google Sheets)
        if rec.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        records.push(rec.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Table::from_raw(headers, records, text_columns))
}

/// Sheet names of a workbook, in file order.
pub fn workbook_sheets(path: &Path) -> AppResult<Vec<String>> {
    let wb = open_workbook_auto(path)?;
    Ok(wb.sheet_names().to_vec())
}

/// Read one sheet of an xlsx/xls/ods workbook.
pub fn read_workbook_sheet(path: &Path, sheet: &str, text_columns: &[String]) -> AppResult<Table> {
    let mut wb = open_workbook_auto(path)?;
    let range = wb.worksheet_range(sheet)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };
    let headers: Vec<String> = header_row.iter().map(|c| c.to_string().trim().to_string()).collect();
    let keep_text: Vec<bool> = headers.iter().map(|h| text_columns.contains(h)).collect();

    let mut table = Table::new(headers);
    for cells in rows {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let mut row: Vec<Value> = cells
            .iter()
            .take(table.columns.len())
            .enumerate()
            .map(|(i, c)| {
                let v = cell_value(c);
                if keep_text[i] && !v.is_missing() {
                    Value::Text(v.to_string())
                } else {
                    v
                }
            })
            .collect();
        row.resize(table.columns.len(), Value::Null);
        table.rows.push(row);
    }

    Ok(table)
}

fn cell_value(c: &Data) -> Value {
    match c {
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::parse_cell(s),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|d| Value::Text(format_timestamp(&d)))
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        _ => Value::Null,
    }
}

/// Dispatch on extension: `.csv` (or none) → CSV, workbook extensions → first sheet.
pub fn read_table_file(path: &Path, text_columns: &[String]) -> AppResult<Table> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => {
            let sheets = workbook_sheets(path)?;
            let first = sheets
                .first()
                .ok_or_else(|| AppError::Other(format!("{} has no sheets", path.display())))?;
            read_workbook_sheet(path, first, text_columns)
        }
        _ => read_csv_path(path, text_columns),
    }
}
