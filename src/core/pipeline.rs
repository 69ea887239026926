//! fetch → merge → filter → derive → summarize, in one forward pass.

use super::filter::apply_filters_with_report;
use super::join::{JoinMode, join};
use super::kpi::KpiDeriver;
use super::summary::{DashboardSummary, summarize};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{FilterSet, Table};
use crate::source::upload::load_upload;
use crate::source::{RecordFetcher, SourceAdapter};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DashboardRequest {
    /// Web-events export to merge; `None` shows the leads alone.
    pub upload: Option<PathBuf>,
    pub join_mode: JoinMode,
    pub filters: FilterSet,
    pub now: DateTime<Utc>,
}

impl DashboardRequest {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            upload: None,
            join_mode: cfg.join_mode,
            filters: FilterSet::new(cfg.combine_mode),
            now: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub baseline_rows: usize,
    /// Filtered rows with KPI columns.
    pub table: Table,
    pub summary: DashboardSummary,
    pub merged: bool,
    /// Non-fatal problems: failed sources, rejected upload, skipped filters.
    pub notices: Vec<AppError>,
    pub projects: Vec<String>,
}

pub struct Pipeline<'c, F: RecordFetcher> {
    cfg: &'c Config,
    adapter: SourceAdapter<F>,
}

impl<'c, F: RecordFetcher> Pipeline<'c, F> {
    pub fn new(cfg: &'c Config, adapter: SourceAdapter<F>) -> Self {
        Self { cfg, adapter }
    }

    pub fn adapter_mut(&mut self) -> &mut SourceAdapter<F> {
        &mut self.adapter
    }

    /// Run once. Only `AllSourcesFailed` (or an empty source list) is fatal.
    pub fn run(&mut self, request: &DashboardRequest) -> AppResult<DashboardView> {
        let report = self.adapter.load_all(&self.cfg.sources)?;
        let web = request
            .upload
            .as_ref()
            .map(|p| load_upload(p, &self.cfg.upload_sheet, &self.cfg.id_column));

        let mut view = build_view(self.cfg, &report.combined, web, request);
        view.projects = report.by_project.keys().cloned().collect();

        let mut notices: Vec<AppError> = report.failures.into_iter().map(|f| f.error).collect();
        notices.append(&mut view.notices);
        view.notices = notices;
        Ok(view)
    }
}

/// Everything after loading: merge (with fallback to the baseline), filter,
/// derive KPIs and summarize. Never fails; problems become notices.
pub fn build_view(
    cfg: &Config,
    baseline: &Table,
    web: Option<AppResult<Table>>,
    request: &DashboardRequest,
) -> DashboardView {
    let mut notices = Vec::new();

    let (working, merged) = match web {
        None => (baseline.clone(), false),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "upload rejected, showing unmerged data");
            notices.push(e);
            (baseline.clone(), false)
        }
        Some(Ok(events)) => match join(baseline, &events, &cfg.id_column, request.join_mode) {
            Ok(t) => (t, true),
            Err(e) => {
                tracing::warn!(error = %e, "merge failed, showing unmerged data");
                notices.push(e);
                (baseline.clone(), false)
            }
        },
    };

    let filtered = apply_filters_with_report(&working, &request.filters);
    notices.extend(filtered.skipped);

    let page_columns = cfg.resolve_page_columns(&filtered.table.columns);
    let deriver = KpiDeriver::new(page_columns, cfg.timestamp_column.clone())
        .with_score_columns(&cfg.click_events_column, &cfg.call_duration_column)
        .at(request.now);
    let table = deriver.derive(&filtered.table);

    let summary = summarize(
        &table,
        &cfg.timestamp_column,
        &cfg.project_column,
        &cfg.source_column,
    );

    DashboardView {
        baseline_rows: baseline.len(),
        table,
        summary,
        merged,
        notices,
        projects: Vec::new(),
    }
}
