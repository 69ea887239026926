// src/export/xlsx.rs

use crate::core::kpi::INTENT;
use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::get_headers;
use crate::export::notify_export_success;
use crate::models::{IntentTag, Table, Value};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: usize = 50;

/// Export XLSX con styling, intent colorato e auto-larghezza colonne.
pub(crate) fn export_xlsx(table: &Table, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Leads")?;

    // ---------------------------
    // Caso dataset vuoto
    // ---------------------------
    if table.is_empty() {
        worksheet.write(0, 0, "No leads match the selected filters")?;
        workbook.save(path_str(path)?)?;
        notify_export_success("XLSX (empty dataset)", 0, path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers(table);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Scrittura righe
    // ---------------------------
    for (row_index, values) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            let bg = if headers[col] == INTENT {
                intent_color(value).unwrap_or(band)
            } else {
                band
            };
            write_xlsx_cell(worksheet, row, col as u16, value, bg)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.to_string().as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, (*w).min(MAX_WIDTH) as f64 + 2.0)?;
    }

    workbook.save(path_str(path)?)?;

    notify_export_success("XLSX", table.len(), path);
    Ok(())
}

fn intent_color(v: &Value) -> Option<Color> {
    let tag = IntentTag::from_label(&v.key_text()?)?;
    Some(match tag {
        IntentTag::Cold => Color::RGB(0xDDEBF7),
        IntentTag::Warm => Color::RGB(0xFFF2CC),
        IntentTag::Hot => Color::RGB(0xF8CBAD),
        IntentTag::VeryHot => Color::RGB(0xE4C1F9),
    })
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Scrive una singola cella: numeri e booleani nativi, testi-data come seriali Excel.
fn write_xlsx_cell(worksheet: &mut Worksheet, row: u32, col: u16, v: &Value, bg: Color) -> AppResult<()> {
    match v {
        Value::Null => {
            worksheet.write_blank(row, col, &base_format(bg))?;
        }
        Value::Number(n) => {
            let fmt = base_format(bg).set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, *n, &fmt)?;
        }
        Value::Bool(b) => {
            worksheet.write_with_format(row, col, *b, &base_format(bg))?;
        }
        Value::Text(s) => {
            if let Some((num_format, serial)) = parse_to_excel_date(s) {
                let fmt = base_format(bg).set_num_format(num_format);
                worksheet.write_with_format(row, col, serial, &fmt)?;
            } else {
                worksheet.write_with_format(row, col, s.as_str(), &base_format(bg))?;
            }
        }
    }
    Ok(())
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))
}
