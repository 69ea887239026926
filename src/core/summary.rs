//! Aggregate KPI scalars and chart series for the presentation layer.

use super::kpi::{INTENT, LEAD_SCORE, PAGE_DEPTH, TOTAL_TIME};
use crate::models::{IntentTag, Table};
use crate::utils::date::parse_timestamp;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSummary {
    pub leads: usize,
    pub avg_page_depth: Option<f64>,
    pub avg_total_time: Option<f64>,
    pub avg_lead_score: Option<f64>,
    pub most_recent_visit: Option<NaiveDateTime>,
    /// Count per intent tag, in ordinal order (every tag present).
    pub intent_distribution: Vec<(IntentTag, usize)>,
    pub leads_by_project: BTreeMap<String, usize>,
    pub leads_by_source: BTreeMap<String, usize>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn column_mean(table: &Table, column: &str) -> Option<f64> {
    let values: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|r| table.value(r, column).as_f64())
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

fn counts_by(table: &Table, column: &str) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    if !table.has_column(column) {
        return out;
    }
    for row in &table.rows {
        let key = table
            .value(row, column)
            .key_text()
            .unwrap_or_else(|| "(blank)".to_string());
        *out.entry(key).or_insert(0) += 1;
    }
    out
}

/// Summarize a KPI-derived table.
pub fn summarize(
    table: &Table,
    timestamp_column: &str,
    project_column: &str,
    source_column: &str,
) -> DashboardSummary {
    let most_recent_visit = table
        .rows
        .iter()
        .filter_map(|r| parse_timestamp(table.value(r, timestamp_column)))
        .max();

    let mut intent_counts: BTreeMap<IntentTag, usize> =
        IntentTag::ALL.iter().map(|t| (*t, 0)).collect();
    for row in &table.rows {
        if let Some(tag) = table
            .value(row, INTENT)
            .key_text()
            .and_then(|s| IntentTag::from_label(&s))
        {
            *intent_counts.entry(tag).or_insert(0) += 1;
        }
    }

    DashboardSummary {
        leads: table.len(),
        avg_page_depth: column_mean(table, PAGE_DEPTH),
        avg_total_time: column_mean(table, TOTAL_TIME),
        avg_lead_score: column_mean(table, LEAD_SCORE),
        most_recent_visit,
        intent_distribution: intent_counts.into_iter().collect(),
        leads_by_project: counts_by(table, project_column),
        leads_by_source: counts_by(table, source_column),
    }
}

impl DashboardSummary {
    pub fn most_recent_visit_label(&self) -> String {
        self.most_recent_visit
            .map(|d| d.date().to_string())
            .unwrap_or_else(|| "NA".to_string())
    }
}
