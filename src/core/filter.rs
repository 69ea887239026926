//! Filter pipeline: structured column predicates combined with AND / OR.

use crate::errors::AppError;
use crate::models::table::rows_equal;
use crate::models::{CombineMode, FilterSet, FilterSpec, Operator, Row, Table, Value};
use std::collections::HashMap;

/// Filtered table plus the specs that were skipped.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub table: Table,
    /// One `FilterColumnMissing` per spec whose column (or gate) is absent.
    pub skipped: Vec<AppError>,
    /// Specs that actually took part in filtering.
    pub applied: Vec<FilterSpec>,
}

/// Apply `filters` to `table`, discarding the skip report.
pub fn apply_filters(table: &Table, filters: &FilterSet) -> Table {
    apply_filters_with_report(table, filters).table
}

/// Apply `filters` to `table`.
///
/// Inactive and inert specs (no operand) are ignored. A spec naming an
/// unknown column, or gated by an unknown column, is skipped and reported.
/// With no applicable spec the table comes back unchanged in both modes.
pub fn apply_filters_with_report(table: &Table, filters: &FilterSet) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for spec in filters.specs.iter().filter(|s| s.active && !s.operator.is_inert()) {
        let missing = std::iter::once(&spec.column)
            .chain(spec.gate.iter())
            .find(|c| !table.has_column(c));
        match missing {
            Some(col) => {
                tracing::debug!(column = %col, spec = %spec, "filter column missing, spec skipped");
                outcome.skipped.push(AppError::FilterColumnMissing(col.clone()));
            }
            None => outcome.applied.push(spec.clone()),
        }
    }

    if outcome.applied.is_empty() {
        outcome.table = table.clone();
        return outcome;
    }

    let mut out = Table::new(table.columns.clone());
    match filters.mode {
        CombineMode::And => {
            out.rows = table
                .rows
                .iter()
                .filter(|row| {
                    outcome
                        .applied
                        .iter()
                        .all(|s| row_satisfies(table, row, s).unwrap_or(true))
                })
                .cloned()
                .collect();
        }
        CombineMode::Or => {
            // a row no spec applies to (every gate off) is not excluded
            let selected = table.rows.iter().filter(|row| {
                let mut verdicts = outcome
                    .applied
                    .iter()
                    .filter_map(|s| row_satisfies(table, row, s))
                    .peekable();
                verdicts.peek().is_none() || verdicts.any(|ok| ok)
            });
            out.rows = dedup_rows(selected);
        }
    }

    tracing::debug!(
        input = table.len(),
        output = out.len(),
        specs = outcome.applied.len(),
        mode = ?filters.mode,
        "filters applied"
    );

    outcome.table = out;
    outcome
}

/// Whether `row` satisfies `spec`, or `None` when the spec does not apply.
///
/// A gated spec only applies to rows whose gate column is `true`. AND mode
/// treats a non-applicable spec as passed; OR mode leaves it out of the
/// union. Under an applicable spec a missing value (null, NaN, empty text)
/// never satisfies.
pub fn row_satisfies(table: &Table, row: &Row, spec: &FilterSpec) -> Option<bool> {
    if let Some(gate) = &spec.gate
        && table.value(row, gate).as_bool() != Some(true)
    {
        return None;
    }

    let v = table.value(row, &spec.column);
    if v.is_missing() {
        return Some(false);
    }

    Some(match &spec.operator {
        Operator::Range { min, max } => match v.as_f64() {
            Some(n) => min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi),
            None => false,
        },
        Operator::Membership { values } => match v.key_text() {
            Some(k) => values
                .iter()
                .any(|candidate| candidate.trim() == k || operand_key(candidate) == k),
            None => false,
        },
        Operator::Equals { value } => match value {
            Some(expected) => values_match(v, expected),
            None => true,
        },
        Operator::Compare { cmp, threshold } => match (v.as_f64(), threshold) {
            (Some(n), Some(t)) => cmp.holds(n, *t),
            (_, None) => true,
            (None, _) => false,
        },
    })
}

/// Membership operand typed like a cell, so `1.50` matches a numeric `1.5`.
fn operand_key(candidate: &str) -> String {
    Value::parse_cell(candidate).key_text().unwrap_or_default()
}

fn values_match(actual: &Value, expected: &Value) -> bool {
    match expected {
        Value::Bool(b) => actual.as_bool() == Some(*b),
        Value::Number(n) => actual.as_f64() == Some(*n),
        Value::Text(_) => actual.key_text() == expected.key_text(),
        Value::Null => actual.is_missing(),
    }
}

/// Keep the first occurrence of each distinct row (full-row equality), in order.
fn dedup_rows<'a, I>(rows: I) -> Vec<Row>
where
    I: Iterator<Item = &'a Row>,
{
    let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
    let mut kept: Vec<Row> = Vec::new();

    for row in rows {
        let fingerprint = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\u{1f}");
        let bucket = buckets.entry(fingerprint).or_default();
        if bucket.iter().any(|&i| rows_equal(&kept[i], row)) {
            continue;
        }
        bucket.push(kept.len());
        kept.push(row.clone());
    }

    kept
}
