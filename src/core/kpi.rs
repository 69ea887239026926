//! KPI deriver: per-row engagement columns computed after filtering.

use crate::models::{IntentTag, Row, Table, Value};
use crate::utils::date::{parse_timestamp, recency_days};
use chrono::{DateTime, Utc};

pub const PAGE_DEPTH: &str = "Page Depth";
pub const TOTAL_TIME: &str = "Total Time";
pub const RECENCY_DAYS: &str = "Recency Days";
pub const LEAD_SCORE: &str = "Lead Score";
pub const INTENT: &str = "Intent";

pub const DEFAULT_CLICK_EVENTS_COLUMN: &str = "Total Click Events";
pub const DEFAULT_CALL_DURATION_COLUMN: &str = "Call Duration";

const W_PAGE_DEPTH: f64 = 0.4;
const W_CLICK_EVENTS: f64 = 0.4;
const W_CALL_DURATION: f64 = 0.2;

/// `0.4*page_depth + 0.4*click_events + 0.2*call_duration`, rounded to 4 decimals.
pub fn lead_score(page_depth: usize, click_events: f64, call_duration: f64) -> f64 {
    let raw = W_PAGE_DEPTH * page_depth as f64
        + W_CLICK_EVENTS * click_events
        + W_CALL_DURATION * call_duration;
    (raw * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone)]
pub struct KpiDeriver {
    pub page_columns: Vec<String>,
    pub timestamp_column: String,
    pub click_events_column: String,
    pub call_duration_column: String,
    pub now: DateTime<Utc>,
}

impl KpiDeriver {
    pub fn new(page_columns: Vec<String>, timestamp_column: impl Into<String>) -> Self {
        Self {
            page_columns,
            timestamp_column: timestamp_column.into(),
            click_events_column: DEFAULT_CLICK_EVENTS_COLUMN.to_string(),
            call_duration_column: DEFAULT_CALL_DURATION_COLUMN.to_string(),
            now: Utc::now(),
        }
    }

    pub fn with_score_columns(mut self, click_events: &str, call_duration: &str) -> Self {
        self.click_events_column = click_events.to_string();
        self.call_duration_column = call_duration.to_string();
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn page_depth(&self, table: &Table, row: &Row) -> usize {
        self.page_columns
            .iter()
            .filter(|c| matches!(table.value(row, c).as_f64(), Some(n) if n > 0.0))
            .count()
    }

    pub fn total_time(&self, table: &Table, row: &Row) -> f64 {
        self.page_columns
            .iter()
            .filter_map(|c| table.value(row, c).as_f64())
            .sum()
    }

    pub fn recency(&self, table: &Table, row: &Row) -> Option<i64> {
        parse_timestamp(table.value(row, &self.timestamp_column)).map(|ts| recency_days(&ts, &self.now))
    }

    /// Return a copy of `table` with the five KPI columns appended (or
    /// overwritten when re-deriving). Input columns are left untouched.
    pub fn derive(&self, table: &Table) -> Table {
        let mut depth = Vec::with_capacity(table.len());
        let mut total = Vec::with_capacity(table.len());
        let mut recency = Vec::with_capacity(table.len());
        let mut score = Vec::with_capacity(table.len());
        let mut intent = Vec::with_capacity(table.len());

        for row in &table.rows {
            let d = self.page_depth(table, row);
            let clicks = table.value(row, &self.click_events_column).as_f64().unwrap_or(0.0);
            let call = table.value(row, &self.call_duration_column).as_f64().unwrap_or(0.0);
            let s = lead_score(d, clicks, call);

            depth.push(Value::Number(d as f64));
            total.push(Value::Number(self.total_time(table, row)));
            recency.push(Value::from(self.recency(table, row)));
            score.push(Value::Number(s));
            intent.push(Value::from(IntentTag::from_score(s).map(|t| t.as_str())));
        }

        let mut out = table.clone();
        out.push_column(PAGE_DEPTH, depth);
        out.push_column(TOTAL_TIME, total);
        out.push_column(RECENCY_DAYS, recency);
        out.push_column(LEAD_SCORE, score);
        out.push_column(INTENT, intent);
        out
    }
}

/// Derive KPIs with the default score columns, relative to the current time.
pub fn derive(table: &Table, page_columns: &[String], timestamp_column: &str) -> Table {
    KpiDeriver::new(page_columns.to_vec(), timestamp_column).derive(table)
}
