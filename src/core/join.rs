//! Join engine: attach web-event columns to lead rows on a shared identifier.

use crate::errors::{AppError, AppResult};
use crate::models::{Row, Table, Value};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Suffix applied to a secondary column whose name is already taken.
pub const COLLISION_SUFFIX: &str = "_web";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Every primary row survives; unmatched rows get `Null` web columns.
    #[default]
    Left,
    /// Only rows whose key exists on both sides.
    Inner,
}

/// Join `primary` with `secondary` on `key`.
///
/// - The key column is taken from `primary` only, verbatim.
/// - Duplicate keys in `secondary` fan out: one output row per match.
/// - Rows with a missing key never match.
/// - A secondary column colliding with an existing name becomes
///   `<name>_web`, then `<name>_web_2`, `<name>_web_3`, …
pub fn join(primary: &Table, secondary: &Table, key: &str, mode: JoinMode) -> AppResult<Table> {
    let p_key = primary
        .column_index(key)
        .ok_or_else(|| AppError::SchemaMismatch {
            table: "primary (leads)".into(),
            column: key.into(),
        })?;
    let s_key = secondary
        .column_index(key)
        .ok_or_else(|| AppError::SchemaMismatch {
            table: "secondary (web events)".into(),
            column: key.into(),
        })?;

    // colonne secondarie (senza la chiave) con nome disambiguato
    let mut columns = primary.columns.clone();
    let mut s_cols: Vec<usize> = Vec::new();
    for (i, name) in secondary.columns.iter().enumerate() {
        if i == s_key {
            continue;
        }
        let resolved = disambiguate(name, &columns);
        columns.push(resolved);
        s_cols.push(i);
    }

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in secondary.rows.iter().enumerate() {
        if let Some(k) = row.get(s_key).and_then(Value::key_text) {
            index.entry(k).or_default().push(i);
        }
    }

    let mut out = Table::new(columns);
    let mut matched = 0usize;
    for p_row in &primary.rows {
        let hits = p_row
            .get(p_key)
            .and_then(Value::key_text)
            .and_then(|k| index.get(&k));

        match hits {
            Some(hits) => {
                matched += 1;
                for &s_idx in hits {
                    let s_row = &secondary.rows[s_idx];
                    let mut row: Row = p_row.clone();
                    row.extend(
                        s_cols
                            .iter()
                            .map(|&c| s_row.get(c).cloned().unwrap_or(Value::Null)),
                    );
                    out.rows.push(row);
                }
            }
            None if mode == JoinMode::Left => {
                let mut row: Row = p_row.clone();
                row.resize(p_row.len() + s_cols.len(), Value::Null);
                out.rows.push(row);
            }
            None => {}
        }
    }

    tracing::debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        matched,
        output = out.len(),
        ?mode,
        "join completed"
    );

    Ok(out)
}

fn disambiguate(name: &str, taken: &[String]) -> String {
    if !taken.iter().any(|c| c == name) {
        return name.to_string();
    }
    let base = format!("{name}{COLLISION_SUFFIX}");
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
