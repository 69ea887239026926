// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::models::Table;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export della tabella lead filtrata (con colonne KPI).
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: path del file di output (`~` espanso)
    /// - `force`: sovrascrive senza chiedere
    ///
    /// An empty table is still written (header only / empty array / note sheet).
    pub fn export(table: &Table, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        let path = expand_tilde(file);

        ensure_writable(&path, force)?;
        ensure_parent(&path)?;

        if table.is_empty() {
            warning("No leads match the selected filters; writing an empty export.");
        }

        tracing::info!(format = format.as_str(), path = %path.display(), rows = table.len(), "exporting");

        match format {
            ExportFormat::Csv => export_csv(table, &path)?,
            ExportFormat::Json => export_json(table, &path)?,
            ExportFormat::Xlsx => export_xlsx(table, &path)?,
        }

        Ok(())
    }
}
