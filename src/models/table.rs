//! Uniform row/column table shared by every pipeline stage.

use super::value::{NULL, Value};
use serde::Serialize;
use std::collections::BTreeSet;

pub type Row = Vec<Value>;

/// Ordered columns plus rows aligned with them.
///
/// All column access is by name and never fails: an unknown column reads as
/// `Value::Null`. Presence is validated where it matters (join keys, rendering).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string headers and raw string records, typing each
    /// cell with `Value::parse_cell`. Columns listed in `text_columns` are kept
    /// verbatim as text (identifiers like `00123` must not become numbers).
    /// Short records are padded with `Null`, long ones truncated.
    pub fn from_raw<I, R, S>(headers: Vec<String>, records: I, text_columns: &[String]) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep_text: Vec<bool> = headers
            .iter()
            .map(|h| text_columns.iter().any(|t| t == h))
            .collect();

        let mut table = Table::new(headers);
        for record in records {
            let mut row: Row = record
                .into_iter()
                .take(table.columns.len())
                .enumerate()
                .map(|(i, cell)| {
                    let raw = cell.as_ref();
                    if keep_text[i] && !raw.trim().is_empty() {
                        Value::Text(raw.trim().to_string())
                    } else {
                        Value::parse_cell(raw)
                    }
                })
                .collect();
            row.resize(table.columns.len(), Value::Null);
            table.rows.push(row);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Schema-aware accessor: absent column → `Value::Null`.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> &'a Value {
        match self.column_index(column) {
            Some(i) => row.get(i).unwrap_or(&NULL),
            None => &NULL,
        }
    }

    /// Same as [`Table::value`] but addressed by row position.
    pub fn cell(&self, row_idx: usize, column: &str) -> &Value {
        match self.rows.get(row_idx) {
            Some(row) => self.value(row, column),
            None => &NULL,
        }
    }

    /// Add (or overwrite) a column with one value per row.
    pub fn push_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(i) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[i] = v;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
    }

    /// Set every row's `column` to the same value, creating it if needed.
    pub fn fill_column(&mut self, name: &str, value: Value) {
        let values = vec![value; self.rows.len()];
        self.push_column(name, values);
    }

    /// Stack tables vertically using the union of their columns (first-seen
    /// order); columns a table lacks are `Null` for its rows.
    pub fn concat<'a, I>(tables: I) -> Table
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let tables: Vec<&Table> = tables.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for t in &tables {
            for c in &t.columns {
                if !columns.contains(c) {
                    columns.push(c.clone());
                }
            }
        }

        let mut out = Table::new(columns);
        for t in tables {
            let mapping: Vec<Option<usize>> =
                out.columns.iter().map(|c| t.column_index(c)).collect();
            for row in &t.rows {
                let new_row = mapping
                    .iter()
                    .map(|m| m.and_then(|i| row.get(i).cloned()).unwrap_or(Value::Null))
                    .collect();
                out.rows.push(new_row);
            }
        }
        out
    }

    /// Distinct non-missing display values of a column, sorted.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let Some(i) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| r.get(i).and_then(Value::key_text))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Keep only the given columns (unknown names are ignored).
    pub fn select(&self, columns: &[String]) -> Table {
        let picked: Vec<(String, usize)> = columns
            .iter()
            .filter_map(|c| self.column_index(c).map(|i| (c.clone(), i)))
            .collect();

        Table {
            columns: picked.iter().map(|(c, _)| c.clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| picked.iter().map(|(_, i)| r[*i].clone()).collect())
                .collect(),
        }
    }

    /// Rows as display strings, in column order.
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect()
    }
}

/// Full-row equality (column order), used by OR-mode dedup.
pub fn rows_equal(a: &Row, b: &Row) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
}
