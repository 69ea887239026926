//! Sidebar-style filter flags → structured `FilterSet`.

use crate::config::{Config, SourceEntry};
use crate::errors::{AppError, AppResult};
use crate::models::{CombineMode, CompareOp, FilterSet, FilterSpec, Operator, Value};
use crate::utils::path::expand_tilde;
use clap::Args;
use regex::Regex;
use std::fs;
use std::sync::OnceLock;

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Combine filters with AND (all must hold) or OR (any may hold)
    #[arg(long, value_enum)]
    pub mode: Option<CombineMode>,

    /// Minimum call duration (seconds)
    #[arg(long = "min-call-duration", value_name = "N")]
    pub min_call_duration: Option<f64>,

    /// Score range, inclusive (e.g. 0.5:1.0)
    #[arg(long = "score-range", value_name = "MIN:MAX")]
    pub score_range: Option<String>,

    /// Keep only these micro markets (repeatable)
    #[arg(long = "micro-market", value_name = "VALUE")]
    pub micro_market: Vec<String>,

    /// Keep only these source channels (repeatable)
    #[arg(long = "source", value_name = "VALUE")]
    pub source: Vec<String>,

    /// Keep only flagged leads (flag column = true)
    #[arg(long = "flagged-only")]
    pub flagged_only: bool,

    /// Questionnaire field filter applied to flagged leads only, e.g. "Budget=1Cr,2Cr"
    #[arg(long = "flag-field", value_name = "FIELD=V1,V2")]
    pub flag_field: Vec<String>,

    /// Tracked page for a time-on-page filter (Home, Plans, Price, ...)
    #[arg(long, value_name = "PAGE")]
    pub page: Option<String>,

    /// Comparison for --page: >, >=, =, <, <=
    #[arg(long = "op", value_name = "OP", default_value = ">", requires = "page")]
    pub page_op: String,

    /// Seconds threshold for --page
    #[arg(long = "seconds", value_name = "N", default_value_t = 0.0, requires = "page")]
    pub page_seconds: f64,

    /// Generic inclusive range, e.g. "Call Duration=60:1000" (either end may be empty)
    #[arg(long = "range", value_name = "COL=MIN:MAX")]
    pub range: Vec<String>,

    /// Generic set membership, e.g. "Stage=New,Contacted"
    #[arg(long = "in", value_name = "COL=V1,V2")]
    pub within: Vec<String>,

    /// Generic equality, e.g. "Orange=true"
    #[arg(long = "eq", value_name = "COL=VALUE")]
    pub equals: Vec<String>,

    /// Generic numeric comparison, e.g. "Price Page Time>=30"
    #[arg(long = "cmp", value_name = "COL<OP>N")]
    pub compare: Vec<String>,

    /// YAML/JSON file with a filter set ({mode, specs: [...]})
    #[arg(long = "filters", value_name = "FILE")]
    pub filters_file: Option<String>,
}

/// Source overrides shared by every data command.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Lead sheet as PROJECT=LOCATION (URL or file); replaces the configured sources
    #[arg(long = "sheet", value_name = "PROJECT=LOCATION")]
    pub sheets: Vec<String>,
}

impl SourceArgs {
    pub fn resolve(&self, cfg: &Config) -> AppResult<Vec<SourceEntry>> {
        if self.sheets.is_empty() {
            return Ok(cfg.sources.clone());
        }
        self.sheets
            .iter()
            .map(|s| {
                let (project, location) = split_assignment(s, "--sheet")?;
                Ok(SourceEntry {
                    project: project.to_string(),
                    location: location.to_string(),
                    token_env: None,
                })
            })
            .collect()
    }
}

fn split_assignment<'a>(s: &'a str, flag: &str) -> AppResult<(&'a str, &'a str)> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim(), v.trim())),
        _ => Err(AppError::InvalidFilter(format!(
            "{flag} expects NAME=VALUE, got '{s}'"
        ))),
    }
}

fn parse_number(s: &str, ctx: &str) -> AppResult<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| AppError::InvalidFilter(format!("{ctx}: '{s}' is not a number")))
}

fn parse_bound(s: &str, ctx: &str) -> AppResult<Option<f64>> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(s, ctx).map(Some)
    }
}

/// `MIN:MAX`, either side optional.
pub fn parse_range(s: &str) -> AppResult<(Option<f64>, Option<f64>)> {
    let (lo, hi) = s
        .split_once(':')
        .ok_or_else(|| AppError::InvalidFilter(format!("range '{s}' must look like MIN:MAX")))?;
    let lo = parse_bound(lo, "range")?;
    let hi = parse_bound(hi, "range")?;
    if let (Some(a), Some(b)) = (lo, hi)
        && a > b
    {
        return Err(AppError::InvalidFilter(format!("range '{s}': min is greater than max")));
    }
    Ok((lo, hi))
}

fn split_values(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn compare_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+?)\s*(>=|<=|==|>|<|=)\s*(\S+)$").expect("valid regex")
    })
}

/// `COL>=N` and friends.
pub fn parse_compare(s: &str) -> AppResult<FilterSpec> {
    let caps = compare_regex()
        .captures(s.trim())
        .ok_or_else(|| AppError::InvalidFilter(format!("comparison '{s}' must look like COL>=N")))?;
    let op = CompareOp::parse(&caps[2])?;
    let threshold = parse_number(&caps[3], "comparison")?;
    Ok(FilterSpec::compare(caps[1].trim(), op, threshold))
}

impl FilterArgs {
    /// Build the filter set in a stable order: dashboard presets first, then
    /// generic flags, then the specs from `--filters`.
    pub fn to_filter_set(&self, cfg: &Config) -> AppResult<FilterSet> {
        let from_file = match &self.filters_file {
            Some(path) => Some(load_filter_file(path)?),
            None => None,
        };

        let mode = self
            .mode
            .or(from_file.as_ref().map(|f| f.mode))
            .unwrap_or(cfg.combine_mode);
        let mut set = FilterSet::new(mode);

        if let Some(min) = self.min_call_duration {
            set.push(FilterSpec::at_least(&cfg.call_duration_column, min));
        }

        if let Some(r) = &self.score_range {
            let (min, max) = parse_range(r)?;
            set.push(FilterSpec::new(&cfg.score_column, Operator::Range { min, max }));
        }

        if !self.micro_market.is_empty() {
            set.push(FilterSpec::membership(&cfg.micro_market_column, self.micro_market.clone()));
        }

        if !self.source.is_empty() {
            set.push(FilterSpec::membership(&cfg.source_column, self.source.clone()));
        }

        if self.flagged_only {
            set.push(FilterSpec::equals(&cfg.flag_column, true));
        }

        for ff in &self.flag_field {
            let (field, values) = split_assignment(ff, "--flag-field")?;
            if !cfg.flag_fields.iter().any(|f| f == field) {
                tracing::debug!(%field, "flag field is not one of the configured questionnaire fields");
            }
            set.push(FilterSpec::membership(field, split_values(values)).gated_by(&cfg.flag_column));
        }

        if let Some(page) = &self.page {
            let column = format!("{}{}", page.trim(), cfg.page_suffix);
            let op = CompareOp::parse(&self.page_op)?;
            set.push(FilterSpec::compare(column, op, self.page_seconds));
        }

        for r in &self.range {
            let (col, bounds) = split_assignment(r, "--range")?;
            let (min, max) = parse_range(bounds)?;
            set.push(FilterSpec::new(col, Operator::Range { min, max }));
        }

        for m in &self.within {
            let (col, values) = split_assignment(m, "--in")?;
            set.push(FilterSpec::membership(col, split_values(values)));
        }

        for e in &self.equals {
            let (col, value) = split_assignment(e, "--eq")?;
            set.push(FilterSpec::equals(col, Value::parse_cell(value)));
        }

        for c in &self.compare {
            set.push(parse_compare(c)?);
        }

        if let Some(file) = from_file {
            set.specs.extend(file.specs);
        }

        Ok(set)
    }
}

/// Read a `FilterSet` from YAML (JSON is valid YAML).
pub fn load_filter_file(path: &str) -> AppResult<FilterSet> {
    let content = fs::read_to_string(expand_tilde(path))?;
    serde_yaml::from_str(&content)
        .map_err(|e| AppError::InvalidFilter(format!("{path}: {e}")))
}
