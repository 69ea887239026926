//! Loader for the uploaded web-events export.

use super::reader::{read_csv_path, read_workbook_sheet, workbook_sheets};
use crate::errors::{AppError, AppResult};
use crate::models::Table;
use std::path::Path;

/// Read the web-events sheet from `path`.
///
/// Workbooks must contain a sheet named `sheet`; a workbook with exactly one
/// sheet is accepted whatever its name. CSV files are a single sheet by
/// definition. The identifier column must be present. Every failure is a
/// `MalformedUpload`, fatal for the merge only.
pub fn load_upload(path: &Path, sheet: &str, id_column: &str) -> AppResult<Table> {
    if !path.is_file() {
        return Err(AppError::MalformedUpload(format!(
            "file '{}' not found",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let text_columns = [id_column.to_string()];

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => {
            let sheets = workbook_sheets(path).map_err(malformed)?;
            let chosen = if sheets.iter().any(|s| s == sheet) {
                sheet.to_string()
            } else if sheets.len() == 1 {
                tracing::debug!(found = %sheets[0], expected = %sheet, "using the only sheet of the workbook");
                sheets[0].clone()
            } else {
                return Err(AppError::MalformedUpload(format!(
                    "'{sheet}' sheet not found in uploaded file (sheets: {})",
                    sheets.join(", ")
                )));
            };
            read_workbook_sheet(path, &chosen, &text_columns).map_err(malformed)?
        }
        "csv" | "txt" => read_csv_path(path, &text_columns).map_err(malformed)?,
        other => {
            return Err(AppError::MalformedUpload(format!(
                "unsupported file type '.{other}' (expected .xlsx or .csv)"
            )));
        }
    };

    if !table.has_column(id_column) {
        return Err(AppError::MalformedUpload(format!(
            "identifier column '{id_column}' not found in uploaded sheet"
        )));
    }

    Ok(table)
}

fn malformed(e: AppError) -> AppError {
    match e {
        AppError::MalformedUpload(_) => e,
        other => AppError::MalformedUpload(other.to_string()),
    }
}
