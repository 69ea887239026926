// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::model::{get_headers, table_to_records};
use crate::export::notify_export_success;
use crate::models::Table;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed (array of row objects).
pub(crate) fn export_json(table: &Table, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(&table_to_records(table))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", table.len(), path);
    Ok(())
}

/// Export CSV con header = colonne della tabella; celle vuote per i null.
pub(crate) fn export_csv(table: &Table, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(get_headers(table))?;

    for row in &table.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", table.len(), path);
    Ok(())
}
