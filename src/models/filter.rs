use super::value::Value;
use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the active filter specs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl CompareOp {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim() {
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Ge),
            "=" | "==" => Ok(CompareOp::Eq),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Le),
            other => Err(AppError::InvalidFilter(format!(
                "unknown comparison operator '{other}' (use >, >=, =, <, <=)"
            ))),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    pub fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Eq => lhs == rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
        }
    }
}

/// Operator plus operand. `None` operands make the spec inert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operator {
    /// Inclusive on both ends; an open end is unbounded.
    Range { min: Option<f64>, max: Option<f64> },
    Membership { values: Vec<String> },
    Equals { value: Option<Value> },
    Compare { cmp: CompareOp, threshold: Option<f64> },
}

impl Operator {
    /// A spec with nothing to compare against neither filters nor errors.
    pub fn is_inert(&self) -> bool {
        match self {
            Operator::Range { min, max } => min.is_none() && max.is_none(),
            Operator::Membership { values } => values.is_empty(),
            Operator::Equals { value } => value.as_ref().is_none_or(Value::is_missing),
            Operator::Compare { threshold, .. } => threshold.is_none(),
        }
    }
}

/// One column-level predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub column: String,
    #[serde(flatten)]
    pub operator: Operator,
    /// Boolean column that switches this spec on per row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, operator: Operator) -> Self {
        Self {
            column: column.into(),
            operator,
            gate: None,
            active: true,
        }
    }

    pub fn range(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(
            column,
            Operator::Range {
                min: Some(min),
                max: Some(max),
            },
        )
    }

    pub fn at_least(column: impl Into<String>, min: f64) -> Self {
        Self::new(
            column,
            Operator::Range {
                min: Some(min),
                max: None,
            },
        )
    }

    pub fn membership<S: Into<String>>(column: impl Into<String>, values: Vec<S>) -> Self {
        Self::new(
            column,
            Operator::Membership {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(
            column,
            Operator::Equals {
                value: Some(value.into()),
            },
        )
    }

    pub fn compare(column: impl Into<String>, cmp: CompareOp, threshold: f64) -> Self {
        Self::new(
            column,
            Operator::Compare {
                cmp,
                threshold: Some(threshold),
            },
        )
    }

    pub fn gated_by(mut self, gate: impl Into<String>) -> Self {
        self.gate = Some(gate.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operator {
            Operator::Range { min, max } => {
                let lo = min.map(|v| v.to_string()).unwrap_or_default();
                let hi = max.map(|v| v.to_string()).unwrap_or_default();
                write!(f, "{} in [{}..{}]", self.column, lo, hi)?;
            }
            Operator::Membership { values } => {
                write!(f, "{} in {{{}}}", self.column, values.join(", "))?
            }
            Operator::Equals { value } => write!(
                f,
                "{} = {}",
                self.column,
                value.as_ref().map(|v| v.to_string()).unwrap_or_default()
            )?,
            Operator::Compare { cmp, threshold } => write!(
                f,
                "{} {} {}",
                self.column,
                cmp.symbol(),
                threshold.map(|v| v.to_string()).unwrap_or_default()
            )?,
        }
        if let Some(g) = &self.gate {
            write!(f, " (when {g})")?;
        }
        Ok(())
    }
}

/// Ordered predicates plus the combination mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub mode: CombineMode,
    #[serde(default)]
    pub specs: Vec<FilterSpec>,
}

impl FilterSet {
    pub fn new(mode: CombineMode) -> Self {
        Self {
            mode,
            specs: Vec::new(),
        }
    }

    pub fn with(mut self, spec: FilterSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn push(&mut self, spec: FilterSpec) {
        self.specs.push(spec);
    }
}
