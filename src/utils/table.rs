//! Table rendering utilities for CLI outputs.

use crate::models::Table;
use crate::utils::colors::colorize_cell;
use crate::utils::formatting::{pad_right, truncate};
use unicode_width::UnicodeWidthStr;

/// Widest a single column may grow before values are truncated.
pub const MAX_COL_WIDTH: usize = 28;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct TextTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Size every column on header + cell widths (capped at `MAX_COL_WIDTH`).
    pub fn from_table(table: &Table, limit: usize) -> Self {
        let shown = if limit == 0 { table.len() } else { limit.min(table.len()) };
        let rows: Vec<Vec<String>> = table.rows[..shown]
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect();

        let columns = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let cells = rows.iter().map(|r| UnicodeWidthStr::width(r[i].as_str()));
                let width = cells
                    .chain(std::iter::once(UnicodeWidthStr::width(h.as_str())))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_COL_WIDTH);
                Column {
                    header: h.clone(),
                    width,
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            let h = truncate(&col.header, col.width);
            out.push_str(&format!("\x1b[1m{}\x1b[0m ", pad_right(&h, col.width)));
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"─".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let raw = row.get(i).map(String::as_str).unwrap_or("");
                let shown = if raw.is_empty() { "-" } else { raw };
                let padded = pad_right(&truncate(shown, col.width), col.width);
                out.push_str(&colorize_cell(&col.header, raw, &padded));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
