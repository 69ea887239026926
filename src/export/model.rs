// src/export/model.rs

use crate::models::{Table, Value};
use serde_json::{Map, Value as Json};

/// Header per CSV / JSON / XLSX: le colonne della tabella, in ordine.
pub fn get_headers(table: &Table) -> Vec<&str> {
    table.columns.iter().map(String::as_str).collect()
}

fn to_json(v: &Value) -> Json {
    match v {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Text(s) => Json::String(s.clone()),
    }
}

/// One JSON object per row, keys in column order.
pub fn table_to_records(table: &Table) -> Vec<Map<String, Json>> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .zip(row)
                .map(|(c, v)| (c.clone(), to_json(v)))
                .collect()
        })
        .collect()
}
